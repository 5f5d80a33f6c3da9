//! User-related types for the ATM simulator
//!
//! This module defines the user record held by the user store and the
//! PIN format rule shared by the store boundary and PIN changes.

use super::transaction::{Amount, TransactionRecord};

/// Card identifier (free text as typed at the card prompt)
pub type CardId = String;

/// Number of digits in a PIN
pub const PIN_LENGTH: usize = 4;

/// Returns true when `pin` is exactly four ASCII decimal digits
pub fn is_valid_pin(pin: &str) -> bool {
    pin.len() == PIN_LENGTH && pin.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true when `card` is non-empty and made only of ASCII letters,
/// digits, `-` and `_`
///
/// Card identifiers become part of receipt file names, so path separators
/// and dots are never accepted.
pub fn is_valid_card(card: &str) -> bool {
    !card.is_empty()
        && card
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// A card holder's account state
///
/// Owned exclusively by the user store. Everything else refers to a user
/// by card identifier and reads or mutates it through the store.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    /// Card identifier, unique within the store
    pub card: CardId,

    /// Name shown in the welcome message
    pub name: String,

    /// Four digit secret
    pub pin: String,

    /// Current balance
    pub balance: Amount,

    /// Amount withdrawn since the last daily reset
    pub daily_withdrawn: Amount,

    /// Committed operations in chronological order (append-only)
    pub transactions: Vec<TransactionRecord>,
}

impl UserRecord {
    /// Create a user with no withdrawals today and an empty history
    pub fn new(
        card: impl Into<CardId>,
        name: impl Into<String>,
        pin: impl Into<String>,
        balance: Amount,
    ) -> Self {
        UserRecord {
            card: card.into(),
            name: name.into(),
            pin: pin.into(),
            balance,
            daily_withdrawn: 0,
            transactions: Vec::new(),
        }
    }
}
