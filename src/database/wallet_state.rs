use std::{collections::VecDeque, sync::Arc};

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error};

use paisa_util::result_ext::ResultExt as _;

use crate::{
    balance::Balance, manager::wallet_store::state::WalletState, transaction::Transaction,
    user::User,
};

use super::{Error, KeyValueStore};

/// Keys of the three independent entries the wallet is stored as
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr, strum::EnumIter)]
pub enum WalletStateKey {
    #[strum(serialize = "wallet_user")]
    User,

    #[strum(serialize = "wallet_balance")]
    Balance,

    #[strum(serialize = "wallet_transactions")]
    Transactions,
}

impl WalletStateKey {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Reads and writes [`WalletState`] using the JSON layout shared with the web frontend
#[derive(Debug, Clone)]
pub struct WalletStateTable {
    store: Arc<dyn KeyValueStore>,
}

impl WalletStateTable {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Rehydrate the wallet, missing or unreadable entries fall back to their defaults
    pub fn load(&self) -> WalletState {
        let user = self.read_or_default(WalletStateKey::User, || None);
        let balance = self.read_or_default(WalletStateKey::Balance, Balance::default);
        let transactions = self.read_or_default(WalletStateKey::Transactions, VecDeque::new);

        debug!(
            "loaded wallet state, user: {}, transactions: {}",
            user.is_some(),
            transactions.len()
        );

        WalletState { user, balance, transactions }
    }

    /// A logged out user removes the entry instead of storing `null`
    pub fn save_user(&self, user: Option<&User>) -> Result<(), Error> {
        match user {
            Some(user) => self.write(WalletStateKey::User, user),
            None => self.store.delete(WalletStateKey::User.as_str()),
        }
    }

    pub fn save_balance(&self, balance: &Balance) -> Result<(), Error> {
        self.write(WalletStateKey::Balance, balance)
    }

    pub fn save_transactions(&self, transactions: &VecDeque<Transaction>) -> Result<(), Error> {
        self.write(WalletStateKey::Transactions, transactions)
    }

    pub fn save_all(&self, state: &WalletState) -> Result<(), Error> {
        self.save_user(state.user.as_ref())?;
        self.save_balance(&state.balance)?;
        self.save_transactions(&state.transactions)
    }

    /// Remove every entry, the next load starts from the defaults
    #[cfg(any(test, debug_assertions))]
    pub fn clear(&self) -> Result<(), Error> {
        use strum::IntoEnumIterator as _;

        for key in WalletStateKey::iter() {
            self.store.delete(key.as_str())?;
        }

        Ok(())
    }

    fn read_or_default<T>(&self, key: WalletStateKey, default: impl FnOnce() -> T) -> T
    where
        T: DeserializeOwned,
    {
        match self.read(key) {
            Ok(Some(value)) => value,
            Ok(None) => default(),
            Err(err) => {
                error!("unable to load {key:?}, using the default: {err}");
                default()
            }
        }
    }

    fn read<T: DeserializeOwned>(&self, key: WalletStateKey) -> Result<Option<T>, Error> {
        let key = key.as_str();
        let Some(json) = self.store.get(key)? else { return Ok(None) };

        let value = serde_json::from_str(&json).map_err(|error| Error::Deserialization {
            key: key.to_string(),
            error: error.to_string(),
        })?;

        Ok(Some(value))
    }

    fn write<T: Serialize + ?Sized>(&self, key: WalletStateKey, value: &T) -> Result<(), Error> {
        let json = serde_json::to_string(value).map_err_str(Error::Serialization)?;
        self.store.set(key.as_str(), json)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator as _;

    use super::*;
    use crate::{amount::Amount, currency::Currency, database::MemoryStore};

    fn table() -> (Arc<MemoryStore>, WalletStateTable) {
        let store = Arc::new(MemoryStore::new());
        let table = WalletStateTable::new(store.clone());
        (store, table)
    }

    #[test]
    fn test_key_names() {
        let keys: Vec<&'static str> = WalletStateKey::iter().map(Into::into).collect();
        assert_eq!(keys, vec!["wallet_user", "wallet_balance", "wallet_transactions"]);
    }

    #[test]
    fn test_empty_store_loads_defaults() {
        let (_store, table) = table();
        let state = table.load();

        assert_eq!(state.user, None);
        assert_eq!(state.balance, Balance::OPENING);
        assert!(state.transactions.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let (_store, table) = table();

        let mut balance = Balance::OPENING;
        balance.set(Currency::Usd, Amount::from_minor(120));

        let transactions = VecDeque::from(vec![
            Transaction::add(Amount::from_whole(5), Currency::Gbp),
            Transaction::add(Amount::from_whole(3), Currency::Eur),
        ]);

        let state = WalletState {
            user: Some(User::unverified("9876543210")),
            balance,
            transactions,
        };

        table.save_all(&state).unwrap();
        assert_eq!(table.load(), state);
    }

    #[test]
    fn test_logged_out_user_removes_entry() {
        let (store, table) = table();

        table.save_user(Some(&User::unverified("9876543210"))).unwrap();
        assert!(store.contains("wallet_user"));

        table.save_user(None).unwrap();
        assert!(!store.contains("wallet_user"));
        assert_eq!(table.load().user, None);
    }

    #[test]
    fn test_reads_web_layout() {
        let (store, table) = table();
        store
            .set("wallet_user", r#"{"mobileNumber":"9876543210","isVerified":true}"#.into())
            .unwrap();
        store.set("wallet_balance", r#"{"INR":900,"USD":1.2,"EUR":10,"GBP":15}"#.into()).unwrap();
        store
            .set(
                "wallet_transactions",
                r#"[{"id":"x1","amount":100,"currency":"INR","type":"EXCHANGE","status":"COMPLETED","timestamp":1700000000000,"description":"Exchanged 100 INR to 1.2 USD","exchangeDetails":{"fromCurrency":"INR","toCurrency":"USD","fromAmount":100,"toAmount":1.2,"rate":0.012}}]"#.into(),
            )
            .unwrap();

        let state = table.load();
        assert_eq!(state.user.map(|user| user.is_verified), Some(true));
        assert_eq!(state.balance.inr, Amount::from_whole(900));
        assert_eq!(state.transactions.len(), 1);

        let details = state.transactions[0].exchange_details.unwrap();
        assert_eq!(details.to_amount, Amount::from_minor(120));
        assert_eq!(details.rate, 0.012);
    }

    #[test]
    fn test_clear_removes_every_entry() {
        let (store, table) = table();
        let mut state = WalletState::default();
        state.login("9876543210".into());
        table.save_all(&state).unwrap();
        assert_eq!(store.len(), 3);

        table.clear().unwrap();
        assert!(store.is_empty());
        assert_eq!(table.load(), WalletState::default());
    }

    #[test]
    fn test_corrupt_entry_falls_back_to_default() {
        let (store, table) = table();
        store.set("wallet_balance", "not json".into()).unwrap();
        store.set("wallet_transactions", r#"{"wrong":"shape"}"#.into()).unwrap();

        let state = table.load();
        assert_eq!(state.balance, Balance::OPENING);
        assert!(state.transactions.is_empty());
    }
}
