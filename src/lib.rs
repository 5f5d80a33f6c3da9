//! ATM Simulator Library
//! # Overview
//!
//! This library models a single ATM terminal serving one card holder at a time
//! against an in-memory user store, with optional text receipts.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (UserRecord, TransactionRecord, AtmConfig, AtmError)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::user_store`] - Owner of every user record
//!   - [`core::account`] - PIN authentication with bounded retries, PIN change
//!   - [`core::atm`] - Session controller and withdrawal/deposit rules
//!   - [`core::terminal`] - Card prompt to farewell for one customer
//! - [`io`] - Consoles, receipts and user seed files
//!
//! # Withdrawal Rules
//!
//! A withdrawal succeeds only if, checked in this order:
//!
//! - **Denomination**: the amount is a positive multiple of the note value
//! - **Daily cap**: today's withdrawals plus the amount stay within the limit
//! - **Minimum balance**: the amount plus the minimum balance is covered
//! - **ATM cash**: the machine holds at least the amount
//!
//! # Sessions
//!
//! An unknown card or exhausted PIN attempts end the program. Every other
//! failure is shown to the user and leaves all state untouched.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{run_terminal, Account, Atm, CashPool, Console, UserStore};
pub use io::{Receipt, ScriptedConsole, StdConsole};
pub use types::{
    Amount, AtmConfig, AtmError, CardId, TransactionKind, TransactionRecord, UserRecord,
};
