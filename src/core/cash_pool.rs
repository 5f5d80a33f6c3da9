//! Physical cash held by the machine
//!
//! One pool per process, created at startup from the configured total and
//! shared by every operation. Withdrawals drain it; nothing refills it.

use crate::types::{Amount, AtmError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashPool {
    available: Amount,
}

impl CashPool {
    pub fn new(total_cash: Amount) -> Self {
        CashPool {
            available: total_cash,
        }
    }

    /// Cash currently in the machine
    pub fn available(&self) -> Amount {
        self.available
    }

    pub fn can_dispense(&self, amount: Amount) -> bool {
        amount <= self.available
    }

    /// Remove dispensed cash from the pool
    ///
    /// # Errors
    ///
    /// Returns `InsufficientAtmCash` when the pool holds less than `amount`;
    /// the pool is left unchanged.
    pub fn dispense(&mut self, amount: Amount) -> Result<(), AtmError> {
        let available = self.available;
        self.available = available
            .checked_sub(amount)
            .ok_or_else(|| AtmError::insufficient_atm_cash(available, amount))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispense_reduces_pool() {
        let mut pool = CashPool::new(1000);
        pool.dispense(500).unwrap();
        assert_eq!(pool.available(), 500);
        pool.dispense(500).unwrap();
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn test_dispense_more_than_available_fails() {
        let mut pool = CashPool::new(400);
        assert!(!pool.can_dispense(500));
        assert_eq!(
            pool.dispense(500).unwrap_err(),
            AtmError::InsufficientAtmCash {
                available: 400,
                requested: 500
            }
        );
        assert_eq!(pool.available(), 400);
    }
}
