pub mod filter;

use nid::Nanoid;
use serde::{Deserialize, Serialize};

use paisa_macros::{impl_default_for, new_type};

use crate::{amount::Amount, bank_details::BankDetails, currency::Currency};

pub use filter::TransactionFilter;

new_type!(TransactionId, String);
impl_default_for!(TransactionId);

impl TransactionId {
    pub fn new() -> Self {
        let nanoid: Nanoid = Nanoid::new();
        Self(nanoid.to_string())
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    uniffi::Enum,
    strum::Display,
    strum::EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Add,
    Withdraw,
    Exchange,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    uniffi::Enum,
    strum::Display,
    strum::EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Completed,
    // never produced today, operations either complete or are rejected up front
    Pending,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeDetails {
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub from_amount: Amount,
    pub to_amount: Amount,
    /// Realized rate, `to_amount / from_amount` after rounding
    pub rate: f64,
}

/// A ledger entry, never modified once recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,

    /// Principal amount, for an exchange this is the amount debited
    pub amount: Amount,
    pub currency: Currency,

    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub status: TransactionStatus,

    /// Milliseconds since the unix epoch
    pub timestamp: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_details: Option<ExchangeDetails>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdraw_details: Option<BankDetails>,
}

impl ExchangeDetails {
    pub fn new(
        from_currency: Currency,
        to_currency: Currency,
        from_amount: Amount,
        to_amount: Amount,
    ) -> Self {
        let rate = to_amount.as_minor() as f64 / from_amount.as_minor() as f64;
        Self { from_currency, to_currency, from_amount, to_amount, rate }
    }
}

impl Transaction {
    pub fn add(amount: Amount, currency: Currency) -> Self {
        let description = format!("Added {}", amount.fmt_with_code(currency));
        Self::completed(TransactionType::Add, amount, currency, description)
    }

    pub fn withdraw(amount: Amount, currency: Currency, bank_details: BankDetails) -> Self {
        let description = format!("Withdrew {}", amount.fmt_with_code(currency));
        Self {
            withdraw_details: Some(bank_details),
            ..Self::completed(TransactionType::Withdraw, amount, currency, description)
        }
    }

    pub fn exchange(details: ExchangeDetails) -> Self {
        let description = format!(
            "Exchanged {} to {}",
            details.from_amount.fmt_with_code(details.from_currency),
            details.to_amount.fmt_with_code(details.to_currency)
        );

        Self {
            exchange_details: Some(details),
            ..Self::completed(
                TransactionType::Exchange,
                details.from_amount,
                details.from_currency,
                description,
            )
        }
    }

    fn completed(
        kind: TransactionType,
        amount: Amount,
        currency: Currency,
        description: String,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            amount,
            currency,
            kind,
            status: TransactionStatus::Completed,
            timestamp: now_millis(),
            description: Some(description),
            exchange_details: None,
            withdraw_details: None,
        }
    }
}

fn now_millis() -> u64 {
    jiff::Timestamp::now().as_millisecond().cast_unsigned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let first = TransactionId::new();
        let second = TransactionId::new();

        assert_eq!(first.as_str().len(), 21);
        assert_ne!(first, second);
    }

    #[test]
    fn test_add_transaction() {
        let txn = Transaction::add(Amount::from_whole(250), Currency::Usd);

        assert_eq!(txn.kind, TransactionType::Add);
        assert_eq!(txn.status, TransactionStatus::Completed);
        assert_eq!(txn.amount, Amount::from_whole(250));
        assert_eq!(txn.currency, Currency::Usd);
        assert_eq!(txn.description.as_deref(), Some("Added 250.00 USD"));
        assert!(txn.timestamp > 0);
        assert!(txn.exchange_details.is_none());
        assert!(txn.withdraw_details.is_none());
    }

    #[test]
    fn test_exchange_records_realized_rate() {
        let details = ExchangeDetails::new(
            Currency::Inr,
            Currency::Usd,
            Amount::from_whole(100),
            Amount::from_minor(120),
        );
        assert_eq!(details.rate, 0.012);

        let txn = Transaction::exchange(details);
        assert_eq!(txn.amount, Amount::from_whole(100));
        assert_eq!(txn.currency, Currency::Inr);
        assert_eq!(txn.description.as_deref(), Some("Exchanged 100.00 INR to 1.20 USD"));
        assert_eq!(txn.exchange_details, Some(details));
    }

    #[test]
    fn test_json_layout() {
        let mut txn = Transaction::add(Amount::from_whole(250), Currency::Usd);
        txn.id = TransactionId::from("abc");
        txn.timestamp = 1_700_000_000_000;

        let json = serde_json::to_string(&txn).unwrap();
        assert_eq!(
            json,
            r#"{"id":"abc","amount":250,"currency":"USD","type":"ADD","status":"COMPLETED","timestamp":1700000000000,"description":"Added 250.00 USD"}"#
        );

        let parsed: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, txn);
    }

    #[test]
    fn test_json_with_withdraw_details() {
        let json = r#"{
            "id": "w1",
            "amount": 100,
            "currency": "INR",
            "type": "WITHDRAW",
            "status": "COMPLETED",
            "timestamp": 1700000000000,
            "withdrawDetails": {
                "bankName": "State Bank",
                "accountNumber": "123456789",
                "ifscCode": "SBIN0001234"
            }
        }"#;

        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.kind, TransactionType::Withdraw);
        assert_eq!(txn.description, None);
        assert_eq!(txn.withdraw_details.map(|details| details.bank_name).as_deref(), Some("State Bank"));
    }
}
