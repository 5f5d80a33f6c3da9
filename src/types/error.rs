//! Error types for the ATM simulator
//!
//! This module defines every error that can occur during an ATM session.
//! The `Display` text of the validation errors is what the card holder sees
//! on screen, so messages are written for the console rather than for logs.
//!
//! # Error Categories
//!
//! - **Login Errors**: Unknown card, PIN lockout (both end the program)
//! - **PIN Change Errors**: Wrong current PIN, confirmation mismatch, bad format
//! - **Amount Errors**: Non-numeric input, bad denomination, non-positive deposit
//! - **Limit Errors**: Daily cap, minimum balance, ATM cash
//! - **Session Errors**: Operation outside an authenticated session, closed input
//! - **I/O Errors**: Receipt files, console, user seed file

use super::transaction::Amount;
use thiserror::Error;

/// Main error type for the ATM simulator
///
/// Every validation failure abandons the triggering operation without
/// mutating any state. Only `UnknownCard` and `PinLockout` end the program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AtmError {
    /// Card number does not resolve to a user
    #[error("Invalid card number '{card}'. Please contact your bank.")]
    UnknownCard {
        /// The card number that was entered
        card: String,
    },

    /// PIN attempts exhausted; the account is locked for this login
    #[error("Too many wrong attempts. Account temporarily locked.")]
    PinLockout {
        /// The locked card
        card: String,
    },

    /// Entered PIN does not match the stored PIN
    #[error("Incorrect PIN. PIN change failed.")]
    IncorrectPin,

    /// New PIN and confirmation differ
    #[error("PIN mismatch. Try again.")]
    PinMismatch,

    /// New PIN is not exactly four decimal digits
    #[error("PIN must be exactly 4 digits.")]
    InvalidPinFormat,

    /// Amount input is not an integer
    #[error("Invalid amount '{input}'.")]
    InvalidAmountFormat {
        /// The raw input
        input: String,
    },

    /// Withdrawal is not a positive multiple of the note denomination
    #[error("Amount must be in multiples of {note}.")]
    InvalidDenomination {
        /// Requested amount
        amount: i64,
        /// Configured note value
        note: Amount,
    },

    /// Withdrawal would exceed the daily cap
    #[error("Daily withdrawal limit exceeded: withdrawn {withdrawn_today} of {limit} today, requested {requested}.")]
    DailyLimitExceeded {
        /// Requested amount
        requested: Amount,
        /// Already withdrawn today
        withdrawn_today: Amount,
        /// Configured daily cap
        limit: Amount,
    },

    /// Withdrawal would take the balance below the minimum
    #[error("Insufficient balance: available {balance}, requested {requested}, minimum balance {min_balance}.")]
    InsufficientFunds {
        /// Current balance
        balance: Amount,
        /// Requested amount
        requested: Amount,
        /// Balance that must remain
        min_balance: Amount,
    },

    /// The machine holds less cash than requested
    #[error("ATM does not have enough cash for {requested}.")]
    InsufficientAtmCash {
        /// Cash left in the machine
        available: Amount,
        /// Requested amount
        requested: Amount,
    },

    /// Deposit amount is zero or negative
    #[error("Deposit amount must be greater than zero.")]
    InvalidAmount {
        /// The rejected amount
        amount: i64,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation} for card {card}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Card the operation applied to
        card: String,
    },

    /// Account operation attempted before a successful login
    #[error("Card {card} is not authenticated")]
    NotAuthenticated {
        /// The card
        card: String,
    },

    /// Operation attempted after the session ended
    #[error("Session has ended")]
    SessionEnded,

    /// Console input reached end of file
    #[error("Input closed")]
    InputClosed,

    /// I/O error while reading input or writing a receipt
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// Malformed user seed file
    #[error("User file parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// User record rejected at the store boundary
    #[error("Invalid user record '{card}': {reason}")]
    InvalidUserRecord {
        /// Card of the rejected record
        card: String,
        /// Why it was rejected
        reason: String,
    },
}

impl From<std::io::Error> for AtmError {
    fn from(error: std::io::Error) -> Self {
        AtmError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for AtmError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        AtmError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl AtmError {
    pub fn unknown_card(card: &str) -> Self {
        AtmError::UnknownCard {
            card: card.to_string(),
        }
    }

    pub fn pin_lockout(card: &str) -> Self {
        AtmError::PinLockout {
            card: card.to_string(),
        }
    }

    pub fn invalid_amount_format(input: &str) -> Self {
        AtmError::InvalidAmountFormat {
            input: input.to_string(),
        }
    }

    pub fn invalid_denomination(amount: i64, note: Amount) -> Self {
        AtmError::InvalidDenomination { amount, note }
    }

    pub fn daily_limit_exceeded(requested: Amount, withdrawn_today: Amount, limit: Amount) -> Self {
        AtmError::DailyLimitExceeded {
            requested,
            withdrawn_today,
            limit,
        }
    }

    pub fn insufficient_funds(balance: Amount, requested: Amount, min_balance: Amount) -> Self {
        AtmError::InsufficientFunds {
            balance,
            requested,
            min_balance,
        }
    }

    pub fn insufficient_atm_cash(available: Amount, requested: Amount) -> Self {
        AtmError::InsufficientAtmCash {
            available,
            requested,
        }
    }

    pub fn invalid_amount(amount: i64) -> Self {
        AtmError::InvalidAmount { amount }
    }

    pub fn arithmetic_overflow(operation: &str, card: &str) -> Self {
        AtmError::ArithmeticOverflow {
            operation: operation.to_string(),
            card: card.to_string(),
        }
    }

    pub fn not_authenticated(card: &str) -> Self {
        AtmError::NotAuthenticated {
            card: card.to_string(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        AtmError::IoError {
            message: message.into(),
        }
    }

    pub fn invalid_user_record(card: &str, reason: &str) -> Self {
        AtmError::InvalidUserRecord {
            card: card.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for errors that end an ATM session instead of just the operation
    pub fn ends_session(&self) -> bool {
        matches!(
            self,
            AtmError::InputClosed | AtmError::IoError { .. } | AtmError::SessionEnded
        )
    }

    /// True for the two errors that end the program
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AtmError::UnknownCard { .. } | AtmError::PinLockout { .. }
        )
    }
}
