//! Accounts, transfers between them, and the store that keeps both.
//!
//! Store: holds accounts and transaction records, in insertion order.
//! Engine: the only thing allowed to touch a balance. It checks whether a
//! transfer is admissible, moves the funds, and records the transaction.

pub mod account;
pub mod engine;
pub mod error;
pub mod store;
pub mod transaction;

pub use account::{create_account, Account, AccountSnapshot, Kind};
pub use engine::TransferEngine;
pub use error::{LedgerError, LedgerResult};
pub use store::{InMemoryLedgerStore, LedgerStore};
pub use transaction::Transaction;

// Using named types doesn't provide any compiler help, but it helps a lot with
// readability.
// Consider the following, when looking up an account:
// (1) fn find_account_by_id(&self, id: Uuid)
// (2) fn find_account_by_id(&self, id: AccountId)
// Implementation (2) is self-explanatory.
// Besides, maintenance is easier: changing owner ids e.g. from u64 to a uuid is trivial.
pub type AccountId = uuid::Uuid;
pub type TransactionId = uuid::Uuid;
pub type OwnerId = u64;
pub type Timestamp = chrono::DateTime<chrono::Utc>;

// Money is never stored as a float: a decimal keeps balances exact.
pub type Amount = rust_decimal::Decimal;
