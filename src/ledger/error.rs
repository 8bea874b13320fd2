use super::AccountId;

use thiserror::Error;

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Every reason a ledger operation can be refused.
///
/// Each kind is distinct so callers can branch on the cause. None of them
/// leave a partially applied transfer behind: every check runs before any
/// balance is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Transfers are switched off by configuration.
    #[error("make transfer is not possible for now, please try again later")]
    ServiceUnavailable,

    /// A SAVING account tried to transact with an account of another owner.
    #[error("when one of the accounts is SAVING, sender and receiver must have the same owner")]
    OwnershipViolation,

    /// The request itself is malformed (same account on both sides, missing
    /// account, non-positive amount).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No account with that identifier is in the store.
    #[error("account {0} is not in the ledger")]
    NotFound(AccountId),

    /// The sender would be left with a balance of zero or less.
    #[error("balance is not enough")]
    InsufficientBalance,

    /// Applying the transfer would overflow a balance.
    #[error("balance overflow")]
    Overflow,
}

impl LedgerError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest(reason.into())
    }
}
