//! I/O module
//!
//! Handles everything that touches the terminal or the filesystem.
//!
//! # Components
//!
//! - `console` - Terminal console with echo-free PIN entry, and a scripted console
//! - `receipt` - Receipt formatting and receipt files
//! - `csv_format` - Loading users from a CSV seed file

pub mod console;
pub mod csv_format;
pub mod receipt;

pub use console::{ScriptedConsole, StdConsole};
pub use csv_format::{load_users, read_users, UserCsvRecord};
pub use receipt::Receipt;
