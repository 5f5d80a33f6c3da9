//! Core business logic module
//!
//! This module contains the ATM components:
//! - `traits` - The `Console` seam between the dialogue and the terminal
//! - `user_store` - Owner of every user record
//! - `cash_pool` - Physical cash held by the machine
//! - `account` - PIN authentication and PIN change for one card
//! - `atm` - Session controller applying withdrawal and deposit rules
//! - `terminal` - Card prompt to farewell for one customer

pub mod account;
pub mod atm;
pub mod cash_pool;
pub mod terminal;
pub mod traits;
pub mod user_store;

pub use account::{Account, AuthState};
pub use atm::{parse_amount, Atm, MenuOption, MINI_STATEMENT_LEN};
pub use cash_pool::CashPool;
pub use terminal::run_terminal;
pub use traits::Console;
pub use user_store::UserStore;
