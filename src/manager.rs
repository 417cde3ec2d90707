pub mod deferred_sender;
pub mod wallet_store;
