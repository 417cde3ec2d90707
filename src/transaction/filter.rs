use jiff::{Timestamp, tz::TimeZone};
use tracing::warn;

use super::{Transaction, TransactionStatus, TransactionType};

/// Filters over the ledger, every filter that is set must match
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, uniffi::Record)]
pub struct TransactionFilter {
    /// Inclusive lower bound, milliseconds since the unix epoch
    #[uniffi(default = None)]
    pub start_date: Option<u64>,

    /// Inclusive upper bound, widened to the last millisecond of that calendar day
    #[uniffi(default = None)]
    pub end_date: Option<u64>,

    #[uniffi(default = None)]
    pub kind: Option<TransactionType>,

    #[uniffi(default = None)]
    pub status: Option<TransactionStatus>,
}

impl TransactionFilter {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Matching transactions, in the order they were given
    pub fn apply<'a>(
        &self,
        transactions: impl IntoIterator<Item = &'a Transaction>,
        timezone: &TimeZone,
    ) -> Vec<Transaction> {
        let end = self.end_date.map(|end_date| end_of_day(end_date, timezone));

        transactions
            .into_iter()
            .filter(|txn| self.matches(txn, end))
            .cloned()
            .collect()
    }

    fn matches(&self, txn: &Transaction, end: Option<u64>) -> bool {
        if self.start_date.is_some_and(|start| txn.timestamp < start) {
            return false;
        }

        if end.is_some_and(|end| txn.timestamp > end) {
            return false;
        }

        if self.kind.is_some_and(|kind| txn.kind != kind) {
            return false;
        }

        if self.status.is_some_and(|status| txn.status != status) {
            return false;
        }

        true
    }
}

/// 23:59:59.999 on the calendar day (in `timezone`) that `millis` falls on
fn end_of_day(millis: u64, timezone: &TimeZone) -> u64 {
    let timestamp = match i64::try_from(millis).map(Timestamp::from_millisecond) {
        Ok(Ok(timestamp)) => timestamp,
        _ => {
            warn!("end date {millis} is out of range, using it as is");
            return millis;
        }
    };

    let date = timestamp.to_zoned(timezone.clone()).date();
    match date.at(23, 59, 59, 999_000_000).to_zoned(timezone.clone()) {
        Ok(end) => u64::try_from(end.timestamp().as_millisecond()).unwrap_or(millis),
        Err(error) => {
            warn!("unable to find the end of day for {date}: {error}");
            millis
        }
    }
}
