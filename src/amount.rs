use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use paisa_util::split_at_decimal_point;

use crate::currency::Currency;

/// Number of minor units (paise, cents, pence) in one major unit, the same for every currency
pub const MINOR_PER_MAJOR: u64 = 100;

const FRACTION_DIGITS: usize = 2;

/// Largest amount, in minor units, that survives the major-unit JSON layout exactly
const MAX_MINOR: u64 = 10_000_000_000_000 * MINOR_PER_MAJOR;

/// A non-negative money amount, held as integer minor units
///
/// Serialized as a plain JSON number in major units (`12.5`), which is the layout the
/// persisted wallet state uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

uniffi::custom_newtype!(Amount, u64);

#[derive(Debug, Clone, Hash, Eq, PartialEq, uniffi::Error, thiserror::Error)]
pub enum AmountError {
    #[error("amount can not be negative")]
    Negative,

    #[error("amount is not a finite number")]
    NotFinite,

    #[error("amount has more than two decimal places")]
    TooManyDecimals,

    #[error("amount is too large")]
    TooLarge,

    #[error("unable to parse amount: {0}")]
    Parse(String),
}

// rust only
impl Amount {
    pub const ZERO: Self = Self(0);

    /// 10 trillion in major units, anything above is rejected
    pub const MAX: Self = Self(MAX_MINOR);

    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    pub const fn from_whole(major: u64) -> Self {
        Self(major * MINOR_PER_MAJOR)
    }

    /// Amount from a major unit float, rounded half-up to two decimal places
    pub fn from_major(major: f64) -> Result<Self, AmountError> {
        if !major.is_finite() {
            return Err(AmountError::NotFinite);
        }

        if major < 0.0 {
            return Err(AmountError::Negative);
        }

        let minor = (major * MINOR_PER_MAJOR as f64).round();
        if minor > MAX_MINOR as f64 {
            return Err(AmountError::TooLarge);
        }

        Ok(Self(minor as u64))
    }

    pub const fn as_minor(&self) -> u64 {
        self.0
    }

    pub fn as_major(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// `None` past [`Amount::MAX`]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).filter(|sum| *sum <= MAX_MINOR).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// `₹1000.00`
    pub fn fmt_with_symbol(&self, currency: Currency) -> String {
        format!("{}{self}", currency.symbol())
    }

    /// `1000.00 INR`
    pub fn fmt_with_code(&self, currency: Currency) -> String {
        format!("{self} {currency}")
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let major = self.0 / MINOR_PER_MAJOR;
        let minor = self.0 % MINOR_PER_MAJOR;
        write!(f, "{major}.{minor:0width$}", width = FRACTION_DIGITS)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(amount: &str) -> Result<Self, Self::Err> {
        let amount = amount.trim();
        if amount.starts_with('-') {
            return Err(AmountError::Negative);
        }

        let (whole, _decimal, fraction) = split_at_decimal_point(amount);
        if whole.is_empty() && fraction.is_empty() {
            return Err(AmountError::Parse(format!("no digits in {amount:?}")));
        }

        if fraction.len() > FRACTION_DIGITS {
            return Err(AmountError::TooManyDecimals);
        }

        let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(AmountError::Parse(format!("not a decimal number: {amount:?}")));
        }

        let whole: u64 = match whole {
            "" => 0,
            whole => whole.parse().map_err(|_| AmountError::TooLarge)?,
        };

        // "5" after the decimal point is 50 minor units
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| AmountError::TooLarge)? * 10,
            _ => fraction.parse().map_err(|_| AmountError::TooLarge)?,
        };

        whole
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|minor| minor.checked_add(fraction))
            .filter(|minor| *minor <= MAX_MINOR)
            .map(Self)
            .ok_or(AmountError::TooLarge)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % MINOR_PER_MAJOR == 0 {
            return serializer.serialize_u64(self.0 / MINOR_PER_MAJOR);
        }

        serializer.serialize_f64(self.as_major())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let major = f64::deserialize(deserializer)?;
        Self::from_major(major).map_err(serde::de::Error::custom)
    }
}

#[uniffi::export]
fn amount_from_string(amount: String) -> Result<Amount, AmountError> {
    amount.parse()
}

#[uniffi::export]
fn amount_fmt_with_symbol(amount: Amount, currency: Currency) -> String {
    amount.fmt_with_symbol(currency)
}
