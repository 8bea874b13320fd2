pub mod balance;

use super::{store::LedgerStore, AccountId, Amount, OwnerId, Timestamp};
use balance::Balance;

use parking_lot::Mutex;
use serde::Serialize;
use std::{fmt, sync::Arc};

/// The closed set of account categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Kind {
    Checking,
    Saving,
}

impl Kind {
    /// A SAVING account may only exchange money with its own owner's accounts.
    pub fn requires_same_owner(self) -> bool {
        matches!(self, Kind::Saving)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Checking => write!(f, "CHECKING"),
            Kind::Saving => write!(f, "SAVING"),
        }
    }
}

/// Whether two accounts are allowed to exchange money, judging only by who
/// owns them and what kind they are.
pub fn ownership_permits(
    sender_kind: Kind,
    receiver_kind: Kind,
    sender_owner: OwnerId,
    receiver_owner: OwnerId,
) -> bool {
    let restricted = sender_kind.requires_same_owner() || receiver_kind.requires_same_owner();
    !restricted || sender_owner == receiver_owner
}

/// An account in the ledger.
///
/// Everything but the balance is fixed at creation. The balance sits behind
/// its own lock, so transfers on unrelated accounts never wait on each other,
/// and only the transfer engine ever takes that lock to write.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    owner_id: OwnerId,
    kind: Kind,
    created_at: Timestamp,
    pub(super) balance: Mutex<Balance>,
}

impl Account {
    pub fn new(owner_id: OwnerId, kind: Kind, balance: Amount, created_at: Timestamp) -> Self {
        Self::with_id(uuid::Uuid::new_v4(), owner_id, kind, balance, created_at)
    }

    /// Build an account with a known identifier, e.g. when reloading one.
    pub fn with_id(
        id: AccountId,
        owner_id: OwnerId,
        kind: Kind,
        balance: Amount,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner_id,
            kind,
            created_at,
            balance: Mutex::new(Balance::new(balance)),
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Current balance. Reading it takes the account lock for an instant.
    pub fn balance(&self) -> Amount {
        self.balance.lock().amount()
    }

    pub(super) fn snapshot(&self, balance: &Balance) -> AccountSnapshot {
        AccountSnapshot {
            id: self.id,
            owner_id: self.owner_id,
            kind: self.kind,
            balance: balance.amount(),
            created_at: self.created_at,
        }
    }
}

/// A point-in-time copy of an account, safe to hand out and print.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSnapshot {
    #[serde(rename = "account")]
    pub id: AccountId,

    #[serde(rename = "owner")]
    pub owner_id: OwnerId,

    pub kind: Kind,

    pub balance: Amount,

    pub created_at: Timestamp,
}

/// Open a new account and register it in the store.
pub fn create_account<S: LedgerStore + ?Sized>(
    store: &S,
    balance: Amount,
    created_at: Timestamp,
    kind: Kind,
    owner_id: OwnerId,
) -> Arc<Account> {
    let account = store.save_account(Account::new(owner_id, kind, balance, created_at));
    tracing::info!(
        account = %account.id(),
        owner = owner_id,
        %kind,
        %balance,
        "account created"
    );

    account
}

#[cfg(test)]
mod tests {
    use super::{create_account, ownership_permits, Account, Kind};
    use crate::ledger::store::{InMemoryLedgerStore, LedgerStore};

    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ownership_permits() {
        for (sender_kind, receiver_kind, sender_owner, receiver_owner, want) in vec![
            (Kind::Checking, Kind::Checking, 1, 2, true),
            (Kind::Checking, Kind::Checking, 1, 1, true),
            (Kind::Saving, Kind::Checking, 1, 2, false),
            (Kind::Checking, Kind::Saving, 1, 2, false),
            (Kind::Saving, Kind::Saving, 1, 2, false),
            (Kind::Saving, Kind::Checking, 1, 1, true),
            (Kind::Saving, Kind::Saving, 3, 3, true),
        ] {
            assert_eq!(
                want,
                ownership_permits(sender_kind, receiver_kind, sender_owner, receiver_owner),
                "{} ({}) -> {} ({})",
                sender_kind,
                sender_owner,
                receiver_kind,
                receiver_owner
            );
        }
    }

    #[test]
    fn test_new_accounts_get_distinct_ids() {
        let now = Utc::now();
        let a = Account::new(1, Kind::Checking, dec!(10), now);
        let b = Account::new(1, Kind::Checking, dec!(10), now);

        assert_ne!(a.id(), b.id());
        assert_eq!(dec!(10), a.balance());
    }

    #[test]
    fn test_create_account() {
        let store = InMemoryLedgerStore::new();
        let created_at = Utc::now();

        let account = create_account(&store, dec!(70), created_at, Kind::Saving, 7);

        assert_eq!(7, account.owner_id());
        assert_eq!(Kind::Saving, account.kind());
        assert_eq!(created_at, account.created_at());
        assert_eq!(dec!(70), account.balance());

        let found = store
            .find_account_by_id(account.id())
            .expect("created account should be in the store");
        assert_eq!(account.id(), found.id());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!("CHECKING", Kind::Checking.to_string());
        assert_eq!("SAVING", Kind::Saving.to_string());
    }
}
