use super::{
    account::{balance::Balance, ownership_permits, Account},
    store::LedgerStore,
    transaction::Transaction,
    Amount, LedgerError, LedgerResult, Timestamp,
};
use crate::config::Config;

use parking_lot::MutexGuard;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// The transfer engine is the only thing that moves money.
///
/// A transfer goes through these checks, in this order, and the first one to
/// fail decides the error:
/// 1. transfers must not be switched off (`ServiceUnavailable`),
/// 2. both accounts must be given (`InvalidRequest`),
/// 3. a SAVING account only deals with its own owner (`OwnershipViolation`),
/// 4. sender and receiver must be two different accounts (`InvalidRequest`),
/// 5. both accounts must be in the store (`NotFound`), with the owner and
///    kind they were given as (`InvalidRequest`),
/// 6. the amount must be positive (`InvalidRequest`),
/// 7. the sender must keep strictly more than zero (`InsufficientBalance`).
///
/// Only then are both balances updated, together, and the record stored.
/// Nothing is ever retried: the caller decides whether to try again.
pub struct TransferEngine<S: LedgerStore + ?Sized> {
    store: Arc<S>,

    // Can be flipped while the engine is running. Read once per transfer.
    under_construction: AtomicBool,
}

impl<S: LedgerStore + ?Sized> TransferEngine<S> {
    pub fn new(store: Arc<S>, config: Config) -> Self {
        Self {
            store,
            under_construction: AtomicBool::new(config.under_construction),
        }
    }

    pub fn set_under_construction(&self, under_construction: bool) {
        self.under_construction
            .store(under_construction, Ordering::Release);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Move `amount` from `sender` to `receiver`, and record it.
    ///
    /// Accounts are optional so that a caller who failed to get hold of one
    /// gets a proper `InvalidRequest` instead of having to invent one.
    pub fn make_transfer(
        &self,
        amount: Amount,
        created_at: Timestamp,
        sender: Option<&Account>,
        receiver: Option<&Account>,
        memo: impl Into<String>,
    ) -> LedgerResult<Transaction> {
        let result = self.try_transfer(amount, created_at, sender, receiver, memo.into());

        match &result {
            Ok(transaction) => tracing::info!(
                tx = %transaction.id(),
                sender = %transaction.sender(),
                receiver = %transaction.receiver(),
                %amount,
                "transfer applied"
            ),
            Err(err) => tracing::warn!(
                sender = ?sender.map(Account::id),
                receiver = ?receiver.map(Account::id),
                %amount,
                %err,
                "transfer refused"
            ),
        }

        result
    }

    /// Same as `make_transfer`, for callers holding both accounts.
    pub fn transfer(
        &self,
        amount: Amount,
        created_at: Timestamp,
        sender: &Account,
        receiver: &Account,
        memo: impl Into<String>,
    ) -> LedgerResult<Transaction> {
        self.make_transfer(amount, created_at, Some(sender), Some(receiver), memo)
    }

    /// Every transaction recorded so far, oldest first.
    pub fn find_all(&self) -> Vec<Transaction> {
        self.store.list_transactions()
    }

    fn try_transfer(
        &self,
        amount: Amount,
        created_at: Timestamp,
        sender: Option<&Account>,
        receiver: Option<&Account>,
        memo: String,
    ) -> LedgerResult<Transaction> {
        if self.under_construction.load(Ordering::Acquire) {
            return Err(LedgerError::ServiceUnavailable);
        }

        let (sender, receiver) = match (sender, receiver) {
            (Some(sender), Some(receiver)) => (sender, receiver),
            _ => {
                return Err(LedgerError::invalid_request(
                    "sender or receiver can not be absent",
                ))
            }
        };

        if !ownership_permits(
            sender.kind(),
            receiver.kind(),
            sender.owner_id(),
            receiver.owner_id(),
        ) {
            return Err(LedgerError::OwnershipViolation);
        }

        if sender.id() == receiver.id() {
            return Err(LedgerError::invalid_request(
                "sender must differ from receiver",
            ));
        }

        let sender = self.resolve(sender)?;
        let receiver = self.resolve(receiver)?;

        if amount <= Amount::ZERO {
            return Err(LedgerError::invalid_request("amount must be positive"));
        }

        self.execute(amount, created_at, &sender, &receiver, memo)
    }

    // The handles we were given may come from somewhere else than this store,
    // and only the store's own accounts are ever mutated. The ownership rule
    // was judged on the handle, so it must agree with the stored account.
    fn resolve(&self, handle: &Account) -> LedgerResult<Arc<Account>> {
        let stored = self.store.find_account_by_id(handle.id())?;

        if stored.owner_id() != handle.owner_id() || stored.kind() != handle.kind() {
            return Err(LedgerError::invalid_request(format!(
                "account {} does not match the ledger",
                handle.id()
            )));
        }

        Ok(stored)
    }

    // Everything from the balance check to the stored record happens while
    // holding both account locks: nobody can see one side updated without
    // the other, or slip a debit in between the check and the update.
    fn execute(
        &self,
        amount: Amount,
        created_at: Timestamp,
        sender: &Account,
        receiver: &Account,
        memo: String,
    ) -> LedgerResult<Transaction> {
        let (mut sender_balance, mut receiver_balance) = lock_pair(sender, receiver);

        if !sender_balance.covers(amount) {
            return Err(LedgerError::InsufficientBalance);
        }

        // Work on copies, so an overflow on either side leaves both untouched.
        let mut debited = sender_balance.clone();
        debited.subtract(amount)?;
        let mut credited = receiver_balance.clone();
        credited.add(amount)?;

        *sender_balance = debited;
        *receiver_balance = credited;

        let transaction = Transaction::new(amount, created_at, sender.id(), receiver.id(), memo);
        Ok(self.store.save_transaction(transaction))
    }
}

/// Lock both balances, always lowest account id first, whichever way the
/// money flows. Two opposite transfers between the same pair therefore can't
/// each hold one lock while waiting for the other.
/// Guards are returned as (sender, receiver).
fn lock_pair<'a>(
    sender: &'a Account,
    receiver: &'a Account,
) -> (MutexGuard<'a, Balance>, MutexGuard<'a, Balance>) {
    if sender.id() < receiver.id() {
        let sender_balance = sender.balance.lock();
        let receiver_balance = receiver.balance.lock();
        (sender_balance, receiver_balance)
    } else {
        let receiver_balance = receiver.balance.lock();
        let sender_balance = sender.balance.lock();
        (sender_balance, receiver_balance)
    }
}
