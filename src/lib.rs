//! A minimal bank ledger.
//!
//! Accounts hold a decimal balance. The only way money moves is through the
//! [`TransferEngine`](ledger::TransferEngine), which checks that a transfer is
//! admissible, updates both balances atomically, and records the transaction
//! in a [`LedgerStore`](ledger::LedgerStore).

pub mod config;
pub mod ledger;
pub mod logging;
pub mod output;
