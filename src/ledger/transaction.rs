use super::{AccountId, Amount, Timestamp, TransactionId};

use serde::Serialize;

/// The record of one successful transfer.
///
/// It only references the two accounts by identifier, so a record never keeps
/// an account alive. Fields are private: once built, a record can't change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    #[serde(rename = "tx")]
    id: TransactionId,

    amount: Amount,

    created_at: Timestamp,

    sender: AccountId,

    receiver: AccountId,

    memo: String,
}

impl Transaction {
    pub(super) fn new(
        amount: Amount,
        created_at: Timestamp,
        sender: AccountId,
        receiver: AccountId,
        memo: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            amount,
            created_at,
            sender,
            receiver,
            memo,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn sender(&self) -> AccountId {
        self.sender
    }

    pub fn receiver(&self) -> AccountId {
        self.receiver
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }
}

#[test]
fn test_new_transactions_get_distinct_ids() {
    use rust_decimal_macros::dec;

    let now = chrono::Utc::now();
    let (sender, receiver) = (uuid::Uuid::new_v4(), uuid::Uuid::new_v4());

    let first = Transaction::new(dec!(10), now, sender, receiver, "a".to_string());
    let second = Transaction::new(dec!(10), now, sender, receiver, "a".to_string());

    assert_ne!(first.id(), second.id());
    assert_ne!(first, second);
    assert_eq!(sender, first.sender());
    assert_eq!(receiver, first.receiver());
    assert_eq!("a", first.memo());
}
