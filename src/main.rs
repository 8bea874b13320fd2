use bank_ledger::{
    config::Config,
    ledger::{create_account, InMemoryLedgerStore, Kind, LedgerStore, TransferEngine},
    logging, output,
};

use chrono::Utc;
use rust_decimal_macros::dec;
use std::{error::Error, io, sync::Arc};

fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let config = Config::from_env()?;
    let store = Arc::new(InMemoryLedgerStore::new());
    let engine = TransferEngine::new(Arc::clone(&store), config);

    let receiver = create_account(&*store, dec!(10), Utc::now(), Kind::Checking, 1);
    let sender = create_account(&*store, dec!(70), Utc::now(), Kind::Checking, 1);
    output::write_accounts(io::stdout(), &store.list_accounts())?;

    for (amount, memo) in [(dec!(10), "transfer no:1"), (dec!(25), "transfer no:2")] {
        let transaction = engine.transfer(amount, Utc::now(), &sender, &receiver, memo)?;

        println!();
        output::write_transactions(io::stdout(), &[transaction])?;
        println!();
        output::write_accounts(io::stdout(), &store.list_accounts())?;
    }

    Ok(())
}
