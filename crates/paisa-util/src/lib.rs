pub mod result_ext;

/// Split an amount string into the part before the decimal point, the decimal point itself
/// and the part after it, the last two are empty when there is no decimal point
pub fn split_at_decimal_point(amount: &str) -> (&str, &str, &str) {
    let decimal_index = match memchr::memchr(b'.', amount.as_bytes()) {
        Some(decimal_index) => decimal_index,
        None => return (amount, "", ""),
    };

    let before_decimal = &amount[..decimal_index];
    let after_decimal = &amount[decimal_index + 1..];
    (before_decimal, ".", after_decimal)
}
