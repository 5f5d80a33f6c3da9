//! CSV format handling for user seed files
//!
//! A seed file replaces the built-in demo users. Columns:
//!
//! ```text
//! card,name,pin,balance
//! 1234567890,Abdullah Al Maruf,1234,25000
//! ```
//!
//! Fields are trimmed. Every record is validated by `UserStore::insert`, and
//! the first bad record aborts the load.

use crate::core::user_store::UserStore;
use crate::types::{Amount, AtmError, UserRecord};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// CSV record structure for deserialization
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UserCsvRecord {
    pub card: String,
    pub name: String,
    pub pin: String,
    pub balance: Amount,
}

impl From<UserCsvRecord> for UserRecord {
    fn from(record: UserCsvRecord) -> Self {
        UserRecord::new(record.card, record.name, record.pin, record.balance)
    }
}

/// Build a user store from CSV data
pub fn read_users<R: Read>(input: R) -> Result<UserStore, AtmError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);
    let mut store = UserStore::new();

    for result in reader.deserialize::<UserCsvRecord>() {
        store.insert(result?.into())?;
    }

    Ok(store)
}

/// Build a user store from a CSV file
pub fn load_users(path: &Path) -> Result<UserStore, AtmError> {
    let file = File::open(path).map_err(|e| {
        AtmError::io(format!("Failed to open user file '{}': {}", path.display(), e))
    })?;
    let store = read_users(file)?;

    debug!(path = %path.display(), users = store.len(), "user file loaded");
    Ok(store)
}
