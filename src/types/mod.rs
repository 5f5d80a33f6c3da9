//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `user`: User records and the card and PIN format rules
//! - `transaction`: Transaction kinds and history records
//! - `config`: ATM rules and limits
//! - `error`: Error types for the ATM simulator

pub mod config;
pub mod error;
pub mod transaction;
pub mod user;

pub use config::AtmConfig;
pub use error::AtmError;
pub use transaction::{Amount, TransactionKind, TransactionRecord, TIMESTAMP_FORMAT};
pub use user::{is_valid_card, is_valid_pin, CardId, UserRecord, PIN_LENGTH};
