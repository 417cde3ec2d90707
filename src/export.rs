use csv::WriterBuilder;
use jiff::{Timestamp, tz::TimeZone};
use serde::Serialize;
use tracing::warn;

use paisa_util::result_ext::ResultExt as _;

use crate::transaction::{Transaction, TransactionStatus, TransactionType};

const DATE_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// Transaction history, rendered for download
pub struct TransactionReport {
    txns: Vec<Transaction>,
    timezone: TimeZone,
}

#[derive(Debug)]
pub struct Csv(Vec<u8>);

#[derive(Debug, thiserror::Error)]
pub enum CsvCreationError {
    #[error("failed to finalize csv: {0}")]
    FinalizeCsv(String),

    #[error("failed to write csv row: {0}")]
    WriteCsvRow(#[from] csv::Error),

    #[error("csv is not valid utf8: {0}")]
    InvalidUtf8(String),
}

#[derive(Debug, Clone, Eq, PartialEq, uniffi::Error, thiserror::Error)]
pub enum ExportError {
    #[error("unable to create csv: {0}")]
    Csv(String),
}

impl From<CsvCreationError> for ExportError {
    fn from(error: CsvCreationError) -> Self {
        Self::Csv(error.to_string())
    }
}

impl Csv {
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn into_string(self) -> Result<String, CsvCreationError> {
        String::from_utf8(self.into_bytes()).map_err_str(CsvCreationError::InvalidUtf8)
    }
}

#[derive(Debug, Serialize)]
struct Row<'a> {
    date: String,
    kind: TransactionType,
    amount: String,
    status: TransactionStatus,
    description: &'a str,
}

impl TransactionReport {
    pub fn new(txns: Vec<Transaction>, timezone: TimeZone) -> Self {
        Self { txns, timezone }
    }

    pub fn create_csv(self) -> Result<Csv, CsvCreationError> {
        let mut csv = WriterBuilder::new().has_headers(false).from_writer(vec![]);

        // custom header, the row field names are not meant for people
        csv.write_record(["Date", "Type", "Amount", "Status", "Description"])?;

        for txn in &self.txns {
            csv.serialize(self.create_row(txn))?;
        }

        let csv = csv.into_inner().map_err_str(CsvCreationError::FinalizeCsv)?;

        Ok(Csv(csv))
    }

    fn create_row<'a>(&self, txn: &'a Transaction) -> Row<'a> {
        Row {
            date: format_date(txn.timestamp, &self.timezone),
            kind: txn.kind,
            amount: txn.amount.fmt_with_code(txn.currency),
            status: txn.status,
            description: txn.description.as_deref().unwrap_or_default(),
        }
    }
}

/// `Oct 18, 2026, 11:16 PM` in the given timezone
fn format_date(millis: u64, timezone: &TimeZone) -> String {
    let timestamp = i64::try_from(millis).ok().and_then(|millis| Timestamp::from_millisecond(millis).ok());

    match timestamp {
        Some(timestamp) => timestamp.to_zoned(timezone.clone()).strftime(DATE_FORMAT).to_string(),
        None => {
            warn!("timestamp {millis} is out of range");
            millis.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{amount::Amount, bank_details::BankDetails, currency::Currency, transaction::ExchangeDetails};

    // 2023-11-14T22:13:20Z
    const NOV_14: u64 = 1_700_000_000_000;

    fn at(mut txn: Transaction, timestamp: u64) -> Transaction {
        txn.timestamp = timestamp;
        txn
    }

    #[test]
    fn test_date_format() {
        assert_eq!(format_date(NOV_14, &TimeZone::UTC), "Nov 14, 2023, 10:13 PM");
        assert_eq!(format_date(NOV_14 - 13 * 60 * 60 * 1000, &TimeZone::UTC), "Nov 14, 2023, 09:13 AM");
        assert_eq!(format_date(u64::MAX, &TimeZone::UTC), u64::MAX.to_string());
    }

    #[test]
    fn test_empty_report_has_header_only() {
        let csv = TransactionReport::new(vec![], TimeZone::UTC).create_csv().unwrap();
        assert_eq!(csv.into_string().unwrap(), "Date,Type,Amount,Status,Description\n");
    }

    #[test]
    fn test_report_rows() {
        let bank = BankDetails {
            bank_name: "State Bank".into(),
            account_number: "123456789".into(),
            ifsc_code: "SBIN0001234".into(),
        };

        let exchange = ExchangeDetails::new(
            Currency::Inr,
            Currency::Usd,
            Amount::from_whole(100),
            Amount::from_minor(120),
        );

        let mut no_description = Transaction::add(Amount::from_minor(5), Currency::Gbp);
        no_description.description = None;

        let txns = vec![
            at(Transaction::exchange(exchange), NOV_14),
            at(Transaction::withdraw(Amount::from_whole(400), Currency::Inr, bank), NOV_14),
            at(no_description, NOV_14),
        ];

        let csv = TransactionReport::new(txns, TimeZone::UTC).create_csv().unwrap();

        let expected = [
            "Date,Type,Amount,Status,Description",
            r#""Nov 14, 2023, 10:13 PM",EXCHANGE,100.00 INR,COMPLETED,Exchanged 100.00 INR to 1.20 USD"#,
            r#""Nov 14, 2023, 10:13 PM",WITHDRAW,400.00 INR,COMPLETED,Withdrew 400.00 INR"#,
            r#""Nov 14, 2023, 10:13 PM",ADD,0.05 GBP,COMPLETED,"#,
            "",
        ]
        .join("\n");

        assert_eq!(csv.into_string().unwrap(), expected);
    }
}
