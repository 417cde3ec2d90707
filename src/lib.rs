pub mod amount;
pub mod balance;
pub mod bank_details;
pub mod currency;
pub mod database;
pub mod export;
pub mod manager;
pub mod transaction;
pub mod user;

/// Install the log subscriber, call once from the frontend on launch
#[uniffi::export]
pub fn init_logging() {
    paisa_common::logging::init();
}

uniffi::setup_scaffolding!();
