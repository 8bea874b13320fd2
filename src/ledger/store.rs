use super::{
    account::{Account, AccountSnapshot},
    transaction::Transaction,
    AccountId, LedgerError, LedgerResult,
};

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Where accounts and transaction records live.
///
/// The store doesn't validate anything: admissibility is the transfer
/// engine's job. Implementations must be shareable between threads.
pub trait LedgerStore: Send + Sync {
    /// Append an account, and hand back the shared handle the store keeps.
    /// Saving an id that is already there returns the existing handle.
    fn save_account(&self, account: Account) -> Arc<Account>;

    fn find_account_by_id(&self, id: AccountId) -> LedgerResult<Arc<Account>>;

    /// Append a transaction record, and return it unchanged.
    fn save_transaction(&self, transaction: Transaction) -> Transaction;

    /// A consistent copy of every account, in insertion order.
    fn list_accounts(&self) -> Vec<AccountSnapshot>;

    /// Every transaction record, in insertion order.
    fn list_transactions(&self) -> Vec<Transaction>;
}

/// A store that keeps everything in memory, for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    accounts: RwLock<IndexMap<AccountId, Arc<Account>>>,
    transactions: RwLock<Vec<Transaction>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    // An id already in the store keeps its first account: handing out a
    // second one would leave holders of the first mutating an orphan.
    fn save_account(&self, account: Account) -> Arc<Account> {
        let id = account.id();
        let mut accounts = self.accounts.write();

        if let Some(existing) = accounts.get(&id) {
            tracing::warn!(account = %id, "account already saved, keeping the first one");
            return Arc::clone(existing);
        }

        let account = Arc::new(account);
        accounts.insert(id, Arc::clone(&account));
        tracing::debug!(account = %id, "account saved");

        account
    }

    fn find_account_by_id(&self, id: AccountId) -> LedgerResult<Arc<Account>> {
        self.accounts
            .read()
            .get(&id)
            .cloned()
            .ok_or(LedgerError::NotFound(id))
    }

    fn save_transaction(&self, transaction: Transaction) -> Transaction {
        self.transactions.write().push(transaction.clone());
        tracing::debug!(tx = %transaction.id(), "transaction saved");

        transaction
    }

    fn list_accounts(&self) -> Vec<AccountSnapshot> {
        // Clone the handles first, so the collection lock is not held while
        // waiting on balance locks.
        let accounts: Vec<Arc<Account>> = self.accounts.read().values().cloned().collect();

        // Take every balance lock, in the same (id) order as transfers do, so
        // the snapshot never sees half of a transfer and can't deadlock with one.
        let mut by_id: Vec<(usize, &Arc<Account>)> = accounts.iter().enumerate().collect();
        by_id.sort_by_key(|(_, account)| account.id());
        let mut guards: Vec<_> = by_id
            .into_iter()
            .map(|(position, account)| (position, account.balance.lock()))
            .collect();
        guards.sort_by_key(|(position, _)| *position);

        accounts
            .iter()
            .zip(guards.iter())
            .map(|(account, (_, balance))| account.snapshot(balance))
            .collect()
    }

    fn list_transactions(&self) -> Vec<Transaction> {
        self.transactions.read().clone()
    }
}
