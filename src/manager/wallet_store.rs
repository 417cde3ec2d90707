pub mod state;

use std::sync::Arc;

use flume::Receiver;
use jiff::tz::TimeZone;
use parking_lot::RwLock;
use tap::TapFallible as _;
use tracing::{debug, error, trace, warn};

use crate::{
    amount::Amount,
    balance::Balance,
    bank_details::BankDetails,
    currency::Currency,
    database::{DatabaseError, KeyValueStore, RedbStore, WalletStateTable},
    export::{ExportError, TransactionReport},
    manager::deferred_sender::{self, DeferredSender, MessageSender},
    transaction::{Transaction, TransactionFilter},
    user::{SessionState, User, is_valid_mobile_number},
};

pub use state::{WalletError, WalletState};

type Message = WalletStoreReconcileMessage;
type Reconciler = dyn WalletStoreReconciler;
type SingleOrMany = deferred_sender::SingleOrMany<Message>;

const RECONCILE_QUEUE_SIZE: usize = 1000;

#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum WalletStoreReconcileMessage {
    UserChanged(Option<User>),
    BalanceChanged(Balance),
    TransactionAdded(Transaction),
}

#[uniffi::export(callback_interface)]
pub trait WalletStoreReconciler: Send + Sync + std::fmt::Debug + 'static {
    /// Tells the frontend to reconcile the wallet changes
    fn reconcile(&self, message: Message);
    fn reconcile_many(&self, messages: Vec<Message>);
}

#[derive(Debug, Clone, Eq, PartialEq, uniffi::Error, thiserror::Error)]
pub enum WalletStoreError {
    #[error("unable to open the wallet database: {0}")]
    Database(#[from] DatabaseError),
}

/// Single source of truth for the user, the balances and the ledger
///
/// Every mutation is applied to memory, written through to the store, and then announced to
/// the frontend reconciler, in that order
#[derive(Debug, uniffi::Object)]
pub struct WalletStore {
    state: RwLock<WalletState>,
    table: WalletStateTable,
    timezone: TimeZone,
    reconciler: MessageSender<Message>,
    pub reconcile_receiver: Arc<Receiver<SingleOrMany>>,
}

#[uniffi::export]
impl WalletStore {
    /// Open the wallet stored in the app data directory
    #[uniffi::constructor]
    pub fn new() -> Result<Arc<Self>, WalletStoreError> {
        let store = RedbStore::open_default()?;
        Ok(Arc::new(Self::from_store(Arc::new(store))))
    }

    /// Forward state changes to the frontend, call right after construction
    ///
    /// Messages queued before a listener attaches are dropped, the frontend reads the current
    /// state when it attaches
    #[uniffi::method]
    pub fn listen_for_updates(&self, reconciler: Box<Reconciler>) {
        let reconcile_receiver = self.reconcile_receiver.clone();

        let stale = reconcile_receiver.drain().count();
        if stale > 0 {
            debug!("dropped {stale} messages queued before a listener attached");
        }

        std::thread::spawn(move || {
            while let Ok(field) = reconcile_receiver.recv() {
                trace!("reconcile_receiver: {field:?}");
                match field {
                    SingleOrMany::Single(message) => reconciler.reconcile(message),
                    SingleOrMany::Many(messages) => reconciler.reconcile_many(messages),
                }
            }
        });
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn balance(&self) -> Balance {
        self.state.read().balance
    }

    /// The whole ledger, newest first
    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.read().transactions.iter().cloned().collect()
    }

    pub fn session_state(&self) -> SessionState {
        self.state.read().session_state()
    }

    /// Only a verified user may see the wallet screens
    pub fn is_authenticated(&self) -> bool {
        self.session_state() == SessionState::Verified
    }

    /// Start a session as an unverified user, replacing any previous user
    pub fn login(&self, mobile_number: String) {
        if !is_valid_mobile_number(&mobile_number) {
            warn!("logging in with a malformed mobile number");
        }

        let mut sender = DeferredSender::new(self.reconciler.clone());
        let mut state = self.state.write();

        state.login(mobile_number);
        debug!("user logged in, awaiting verification");

        let _ = self.table.save_user(state.user.as_ref()).tap_err(|error| {
            error!("unable to save user: {error}");
        });

        sender.queue(Message::UserChanged(state.user.clone()));
    }

    pub fn verify(&self, otp: String) -> bool {
        let mut sender = DeferredSender::new(self.reconciler.clone());
        let mut state = self.state.write();

        if !state.verify(&otp) {
            warn!("verification rejected");
            return false;
        }

        debug!("user verified");
        let _ = self.table.save_user(state.user.as_ref()).tap_err(|error| {
            error!("unable to save user: {error}");
        });

        sender.queue(Message::UserChanged(state.user.clone()));
        true
    }

    /// Ends the session, balances and ledger are kept
    pub fn logout(&self) {
        let mut sender = DeferredSender::new(self.reconciler.clone());
        let mut state = self.state.write();

        state.logout();
        debug!("user logged out");

        let _ = self.table.save_user(None).tap_err(|error| {
            error!("unable to remove user: {error}");
        });

        sender.queue(Message::UserChanged(None));
    }

    /// Credit the wallet, a zero amount is ignored and returns `None`
    pub fn add_funds(&self, amount: Amount, currency: Currency) -> Option<Transaction> {
        let mut sender = DeferredSender::new(self.reconciler.clone());
        let mut state = self.state.write();

        let txn = state
            .add_funds(amount, currency)
            .tap_err(|error| warn!("add funds ignored: {error}"))
            .ok()?;

        debug!("added {}", amount.fmt_with_code(currency));
        self.persist_ledger(&state, &mut sender, &txn);

        Some(txn)
    }

    pub fn withdraw_funds(
        &self,
        amount: Amount,
        currency: Currency,
        bank_details: BankDetails,
    ) -> Result<Transaction, WalletError> {
        let mut sender = DeferredSender::new(self.reconciler.clone());
        let mut state = self.state.write();

        let txn = state
            .withdraw_funds(amount, currency, bank_details)
            .tap_err(|error| warn!("withdrawal rejected: {error}"))?;

        debug!("withdrew {}", amount.fmt_with_code(currency));
        self.persist_ledger(&state, &mut sender, &txn);

        Ok(txn)
    }

    pub fn exchange_currency(
        &self,
        from: Currency,
        to: Currency,
        amount: Amount,
    ) -> Result<Transaction, WalletError> {
        let mut sender = DeferredSender::new(self.reconciler.clone());
        let mut state = self.state.write();

        let txn = state
            .exchange_currency(from, to, amount)
            .tap_err(|error| warn!("exchange rejected: {error}"))?;

        debug!("exchanged {amount} {from} to {to}");
        self.persist_ledger(&state, &mut sender, &txn);

        Ok(txn)
    }

    /// Ledger entries matching every set filter, newest first
    pub fn filtered_transactions(&self, filter: TransactionFilter) -> Vec<Transaction> {
        filter.apply(&self.state.read().transactions, &self.timezone)
    }

    /// Filtered ledger as CSV text, dates in the device timezone
    pub fn export_csv(&self, filter: TransactionFilter) -> Result<String, ExportError> {
        let transactions = self.filtered_transactions(filter);
        let csv = TransactionReport::new(transactions, self.timezone.clone()).create_csv()?;
        Ok(csv.into_string()?)
    }
}

// rust only
impl WalletStore {
    /// Build a store on top of any key-value backend, loading whatever it already holds
    pub fn from_store(store: Arc<dyn KeyValueStore>) -> Self {
        let (sender, receiver) = flume::bounded(RECONCILE_QUEUE_SIZE);

        let table = WalletStateTable::new(store);
        let state = table.load();

        Self {
            state: RwLock::new(state),
            table,
            timezone: TimeZone::system(),
            reconciler: MessageSender::new(sender),
            reconcile_receiver: Arc::new(receiver),
        }
    }

    pub fn with_timezone(mut self, timezone: TimeZone) -> Self {
        self.timezone = timezone;
        self
    }

    /// Wipe the stored wallet and start over with the opening balance
    #[cfg(any(test, debug_assertions))]
    pub fn reset(&self) {
        let mut sender = DeferredSender::new(self.reconciler.clone());
        let mut state = self.state.write();

        *state = WalletState::default();
        warn!("wallet data reset");

        let _ = self.table.clear().tap_err(|error| {
            error!("unable to clear wallet data: {error}");
        });

        sender.queue(Message::UserChanged(None));
        sender.queue(Message::BalanceChanged(state.balance));
    }

    /// Write the balance and ledger after a money movement, then queue the matching messages
    fn persist_ledger(
        &self,
        state: &WalletState,
        sender: &mut DeferredSender<Message>,
        txn: &Transaction,
    ) {
        let _ = self.table.save_balance(&state.balance).tap_err(|error| {
            error!("unable to save balance: {error}");
        });

        let _ = self.table.save_transactions(&state.transactions).tap_err(|error| {
            error!("unable to save transactions: {error}");
        });

        sender.queue(Message::BalanceChanged(state.balance));
        sender.queue(Message::TransactionAdded(txn.clone()));
    }
}
