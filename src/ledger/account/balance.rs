use crate::ledger::{Amount, LedgerError};

/// The money currently held by an account.
///
/// Only the current amount is kept, not every movement: the movements
/// themselves are the transaction records in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    amount: Amount,
}

impl Balance {
    pub const fn new(amount: Amount) -> Self {
        Self { amount }
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn add(&mut self, amount: Amount) -> Result<(), LedgerError> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        Ok(())
    }

    pub fn subtract(&mut self, amount: Amount) -> Result<(), LedgerError> {
        self.amount = self
            .amount
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;

        Ok(())
    }

    /// Whether `amount` can be taken out while leaving strictly more than zero.
    /// An emptied account is refused as well as an overdrawn one.
    pub fn covers(&self, amount: Amount) -> bool {
        self.amount
            .checked_sub(amount)
            .map_or(false, |left| left > Amount::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use crate::ledger::LedgerError;

    use super::Balance;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_add() {
        let mut balance = Balance::new(dec!(10));
        balance.add(dec!(7)).expect("should not overflow");

        assert_eq!(dec!(17), balance.amount());
    }

    #[test]
    fn test_add_overflow() {
        let very_big_number = Decimal::from_str("70000000000000000000000000000").unwrap();
        let mut balance = Balance::new(very_big_number);

        assert_eq!(Err(LedgerError::Overflow), balance.add(very_big_number));
        assert_eq!(very_big_number, balance.amount());
    }

    #[test]
    fn test_subtract() {
        let mut balance = Balance::new(dec!(10));
        balance.subtract(dec!(7)).expect("should not overflow");

        assert_eq!(dec!(3), balance.amount());
    }

    #[test]
    // Large amounts moving out and back in must not overflow as long as the
    // balance itself stays in range.
    fn test_round_trip_near_limit() {
        let start = Decimal::from_str("50000000000000000000000000000").unwrap();
        let moved = Decimal::from_str("40000000000000000000000000000").unwrap();
        let mut balance = Balance::new(start);

        for _ in 0..3 {
            balance.subtract(moved).expect("should not overflow");
            balance.add(moved).expect("should not overflow");
        }

        assert_eq!(start, balance.amount());
    }

    #[test]
    fn test_covers() {
        for (available, amount, want) in vec![
            (dec!(70), dec!(10), true),
            (dec!(10.01), dec!(10), true),
            (dec!(10), dec!(10), false), // would leave exactly zero
            (dec!(10), dec!(10.0001), false),
            (dec!(0), dec!(1), false),
        ] {
            assert_eq!(
                want,
                Balance::new(available).covers(amount),
                "{} covers {}",
                available,
                amount
            );
        }
    }
}
