use serde::{Deserialize, Serialize};

use crate::amount::Amount;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    uniffi::Enum,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Inr,
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Inr, Currency::Usd, Currency::Eur, Currency::Gbp];

    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }

    pub fn code(&self) -> &'static str {
        self.into()
    }
}

/// Exchange rates are fixed point, `120` at this scale is a rate of `0.012`
const RATE_SCALE: u64 = 10_000;

/// The fixed rate table, `from` to `to`, authored as the reciprocal of the INR rates
const fn scaled_rate(from: Currency, to: Currency) -> u64 {
    use Currency::*;

    match (from, to) {
        (Inr, Inr) | (Usd, Usd) | (Eur, Eur) | (Gbp, Gbp) => RATE_SCALE,

        (Inr, Usd) => 120,
        (Inr, Eur) => 110,
        (Inr, Gbp) => 90,

        (Usd, Inr) => 833_300,
        (Usd, Eur) => 9_170,
        (Usd, Gbp) => 7_500,

        (Eur, Inr) => 909_100,
        (Eur, Usd) => 10_910,
        (Eur, Gbp) => 8_180,

        (Gbp, Inr) => 1_111_100,
        (Gbp, Usd) => 13_330,
        (Gbp, Eur) => 12_220,
    }
}

/// Table rate for one unit of `from` in `to`, for display
#[uniffi::export]
pub fn exchange_rate(from: Currency, to: Currency) -> f64 {
    scaled_rate(from, to) as f64 / RATE_SCALE as f64
}

/// Convert at the table rate, rounding half-up to whole minor units
///
/// Returns `None` when the result is above [`Amount::MAX`]
pub fn convert(amount: Amount, from: Currency, to: Currency) -> Option<Amount> {
    let scale = RATE_SCALE as u128;
    let scaled = amount.as_minor() as u128 * scaled_rate(from, to) as u128;
    let minor = (scaled + scale / 2) / scale;

    u64::try_from(minor)
        .ok()
        .map(Amount::from_minor)
        .filter(|converted| *converted <= Amount::MAX)
}

#[uniffi::export]
fn currency_symbol(currency: Currency) -> String {
    currency.symbol().to_string()
}

#[uniffi::export]
fn all_currencies() -> Vec<Currency> {
    Currency::ALL.to_vec()
}
