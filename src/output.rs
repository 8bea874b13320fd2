use crate::ledger::{AccountSnapshot, Transaction};

use serde::Serialize;

// Writes the accounts to the given stream, as CSV.
pub fn write_accounts(
    output_stream: impl std::io::Write,
    accounts: &[AccountSnapshot],
) -> Result<(), csv::Error> {
    write(output_stream, accounts)
}

// Writes the transaction records to the given stream, as CSV.
pub fn write_transactions(
    output_stream: impl std::io::Write,
    transactions: &[Transaction],
) -> Result<(), csv::Error> {
    write(output_stream, transactions)
}

fn write<T: Serialize>(output_stream: impl std::io::Write, records: &[T]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(output_stream);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod write_tests {
    use crate::ledger::{AccountSnapshot, Kind};

    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn test_write_accounts() {
        let created_at = Utc.with_ymd_and_hms(2022, 3, 1, 12, 0, 0).unwrap();
        let mut output_stream = Vec::new();
        let accounts: Vec<AccountSnapshot> = vec![
            (1, 1, Kind::Checking, dec!(35)),
            (2, 1, Kind::Saving, dec!(45.5)),
            (3, 2, Kind::Checking, dec!(0.0001)),
        ]
        .into_iter()
        .map(|(id, owner_id, kind, balance)| AccountSnapshot {
            id: Uuid::from_u128(id),
            owner_id,
            kind,
            balance,
            created_at,
        })
        .collect();

        super::write_accounts(&mut output_stream, &accounts).unwrap();

        let want = r#"account,owner,kind,balance,created_at
00000000-0000-0000-0000-000000000001,1,CHECKING,35,2022-03-01T12:00:00Z
00000000-0000-0000-0000-000000000002,1,SAVING,45.5,2022-03-01T12:00:00Z
00000000-0000-0000-0000-000000000003,2,CHECKING,0.0001,2022-03-01T12:00:00Z
"#;
        assert_eq!(want.to_string(), String::from_utf8(output_stream).unwrap());
    }

    #[test]
    fn test_write_transactions() {
        use crate::{
            config::Config,
            ledger::{create_account, InMemoryLedgerStore, TransferEngine},
        };
        use std::sync::Arc;

        let engine = TransferEngine::new(Arc::new(InMemoryLedgerStore::new()), Config::default());
        let sender = create_account(engine.store(), dec!(70), Utc::now(), Kind::Checking, 1);
        let receiver = create_account(engine.store(), dec!(10), Utc::now(), Kind::Checking, 1);
        engine
            .transfer(dec!(10), Utc::now(), &sender, &receiver, "transfer no:1")
            .unwrap();

        let mut output_stream = Vec::new();
        super::write_transactions(&mut output_stream, &engine.find_all()).unwrap();
        let output = String::from_utf8(output_stream).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(2, lines.len());
        assert_eq!("tx,amount,created_at,sender,receiver,memo", lines[0]);
        assert!(lines[1].contains(&sender.id().to_string()));
        assert!(lines[1].contains(&receiver.id().to_string()));
        assert!(lines[1].ends_with(",transfer no:1"));
    }
}
