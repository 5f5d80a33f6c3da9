//! ATM rule configuration
//!
//! Limits and constants the session controller enforces. Defaults match the
//! stock terminal; the CLI can override each of them.

use super::transaction::Amount;
use std::path::PathBuf;
use tracing::warn;

/// Rules and limits applied by the ATM
#[derive(Debug, Clone, PartialEq)]
pub struct AtmConfig {
    /// Maximum total a card may withdraw per day
    pub daily_withdraw_limit: Amount,

    /// Balance that must remain after a withdrawal
    pub min_balance: Amount,

    /// Withdrawals must be a positive multiple of this note value
    pub note_denomination: Amount,

    /// Wrong PINs allowed before the card is locked
    pub max_pin_attempts: u32,

    /// Cash loaded into the machine at startup
    pub total_cash: Amount,

    /// Directory receipt files are written to (created on demand)
    pub receipts_dir: PathBuf,
}

impl Default for AtmConfig {
    fn default() -> Self {
        Self {
            daily_withdraw_limit: 20000,
            min_balance: 500,
            note_denomination: 500,
            max_pin_attempts: 3,
            total_cash: 100000,
            receipts_dir: PathBuf::from("receipts"),
        }
    }
}

impl AtmConfig {
    /// Create an AtmConfig with custom values
    ///
    /// A zero note denomination or zero PIN attempts would make every
    /// withdrawal or login impossible, so those fall back to the defaults.
    pub fn new(
        daily_withdraw_limit: Amount,
        min_balance: Amount,
        note_denomination: Amount,
        max_pin_attempts: u32,
        total_cash: Amount,
        receipts_dir: PathBuf,
    ) -> Self {
        let default = Self::default();

        let note_denomination = if note_denomination == 0 {
            warn!(
                "Invalid note_denomination ({}), using default ({})",
                note_denomination, default.note_denomination
            );
            default.note_denomination
        } else {
            note_denomination
        };

        let max_pin_attempts = if max_pin_attempts == 0 {
            warn!(
                "Invalid max_pin_attempts ({}), using default ({})",
                max_pin_attempts, default.max_pin_attempts
            );
            default.max_pin_attempts
        } else {
            max_pin_attempts
        };

        Self {
            daily_withdraw_limit,
            min_balance,
            note_denomination,
            max_pin_attempts,
            total_cash,
            receipts_dir,
        }
    }
}
