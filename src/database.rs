//! Persistence for the wallet, a plain string key-value store holding the JSON encoded user,
//! balance and ledger. Survives app restarts, nothing in here is sensitive.

pub mod error;
pub mod memory;
pub mod redb_store;
pub mod wallet_state;

pub use error::DatabaseError;
pub use memory::MemoryStore;
pub use redb_store::RedbStore;
pub use wallet_state::WalletStateTable;

pub type Error = DatabaseError;

/// String key-value storage the wallet state is written through to
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, Error>;
    fn set(&self, key: &str, value: String) -> Result<(), Error>;
    fn delete(&self, key: &str) -> Result<(), Error>;
}
