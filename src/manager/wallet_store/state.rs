use std::collections::VecDeque;

use crate::{
    amount::Amount,
    balance::Balance,
    bank_details::{BankDetails, BankDetailsError},
    currency::{self, Currency},
    transaction::{ExchangeDetails, Transaction},
    user::{DEMO_OTP, SessionState, User},
};

/// Everything the wallet owns, the ledger is kept newest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalletState {
    pub user: Option<User>,
    pub balance: Balance,
    pub transactions: VecDeque<Transaction>,
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, uniffi::Error, thiserror::Error)]
pub enum WalletError {
    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("insufficient {currency} balance, requested {requested}, available {available}")]
    InsufficientFunds { currency: Currency, requested: Amount, available: Amount },

    #[error("invalid bank details: {0}")]
    InvalidBankDetails(#[from] BankDetailsError),

    #[error("{currency} balance is too large")]
    Overflow { currency: Currency },
}

type Result<T, E = WalletError> = std::result::Result<T, E>;

impl WalletState {
    pub fn session_state(&self) -> SessionState {
        SessionState::of(self.user.as_ref())
    }

    pub fn login(&mut self, mobile_number: String) {
        self.user = Some(User::unverified(mobile_number));
    }

    /// Only the demo code is accepted, and only once someone has logged in
    pub fn verify(&mut self, otp: &str) -> bool {
        match &mut self.user {
            Some(user) if otp == DEMO_OTP => {
                user.is_verified = true;
                true
            }
            _ => false,
        }
    }

    /// Ends the session, the balance and ledger are kept for the next login
    pub fn logout(&mut self) {
        self.user = None;
    }

    pub fn add_funds(&mut self, amount: Amount, currency: Currency) -> Result<Transaction> {
        ensure_positive(amount)?;

        let credited = self
            .balance
            .get(currency)
            .checked_add(amount)
            .ok_or(WalletError::Overflow { currency })?;

        self.balance.set(currency, credited);
        Ok(self.record(Transaction::add(amount, currency)))
    }

    pub fn withdraw_funds(
        &mut self,
        amount: Amount,
        currency: Currency,
        bank_details: BankDetails,
    ) -> Result<Transaction> {
        let remaining = self.debit(amount, currency)?;
        bank_details.validate()?;

        self.balance.set(currency, remaining);
        Ok(self.record(Transaction::withdraw(amount, currency, bank_details)))
    }

    pub fn exchange_currency(
        &mut self,
        from: Currency,
        to: Currency,
        amount: Amount,
    ) -> Result<Transaction> {
        let remaining = self.debit(amount, from)?;
        let converted =
            currency::convert(amount, from, to).ok_or(WalletError::Overflow { currency: to })?;

        // work on a copy so a failed credit leaves the balance untouched
        let mut balance = self.balance;
        balance.set(from, remaining);

        let credited = balance
            .get(to)
            .checked_add(converted)
            .ok_or(WalletError::Overflow { currency: to })?;

        balance.set(to, credited);
        self.balance = balance;

        let details = ExchangeDetails::new(from, to, amount, converted);
        Ok(self.record(Transaction::exchange(details)))
    }

    /// What would be left of `currency` after taking `amount` out
    fn debit(&self, amount: Amount, currency: Currency) -> Result<Amount> {
        ensure_positive(amount)?;

        let available = self.balance.get(currency);
        available.checked_sub(amount).ok_or(WalletError::InsufficientFunds {
            currency,
            requested: amount,
            available,
        })
    }

    fn record(&mut self, txn: Transaction) -> Transaction {
        self.transactions.push_front(txn.clone());
        txn
    }
}

fn ensure_positive(amount: Amount) -> Result<()> {
    if amount.is_zero() {
        return Err(WalletError::ZeroAmount);
    }

    Ok(())
}
