use serde::{Deserialize, Serialize};

use crate::{amount::Amount, currency::Currency};

/// Per-currency balance, every supported currency always has an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "UPPERCASE")]
pub struct Balance {
    pub inr: Amount,
    pub usd: Amount,
    pub eur: Amount,
    pub gbp: Amount,
}

impl Balance {
    /// What a wallet starts with before anything was ever saved
    pub const OPENING: Self = Self {
        inr: Amount::from_whole(1000),
        usd: Amount::ZERO,
        eur: Amount::from_whole(10),
        gbp: Amount::from_whole(15),
    };

    pub const ZERO: Self =
        Self { inr: Amount::ZERO, usd: Amount::ZERO, eur: Amount::ZERO, gbp: Amount::ZERO };

    pub const fn get(&self, currency: Currency) -> Amount {
        match currency {
            Currency::Inr => self.inr,
            Currency::Usd => self.usd,
            Currency::Eur => self.eur,
            Currency::Gbp => self.gbp,
        }
    }

    pub fn set(&mut self, currency: Currency, amount: Amount) {
        let slot = match currency {
            Currency::Inr => &mut self.inr,
            Currency::Usd => &mut self.usd,
            Currency::Eur => &mut self.eur,
            Currency::Gbp => &mut self.gbp,
        };

        *slot = amount;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Currency, Amount)> + '_ {
        Currency::ALL.into_iter().map(move |currency| (currency, self.get(currency)))
    }
}

impl Default for Balance {
    fn default() -> Self {
        Self::OPENING
    }
}

#[uniffi::export]
fn balance_opening() -> Balance {
    Balance::OPENING
}

#[uniffi::export]
fn balance_for_currency(balance: Balance, currency: Currency) -> Amount {
    balance.get(currency)
}
