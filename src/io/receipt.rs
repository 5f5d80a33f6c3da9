//! Receipt formatting and persistence
//!
//! A receipt renders one operation into the fixed ATM banner layout and can
//! be saved as a text file, one file per receipt, named from the card number
//! and the operation time to the second.

use crate::types::{Amount, AtmError, TransactionKind, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const RULE: &str = "------------------------------";

/// Printable record of a single ATM operation
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub card: String,
    pub kind: TransactionKind,
    pub amount: Amount,
    pub balance: Amount,
    pub timestamp: NaiveDateTime,
}

impl Receipt {
    pub fn new(
        card: &str,
        kind: TransactionKind,
        amount: Amount,
        balance: Amount,
        timestamp: NaiveDateTime,
    ) -> Self {
        Receipt {
            card: card.to_string(),
            kind,
            amount,
            balance,
            timestamp,
        }
    }

    /// Receipt text, newline terminated
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// `receipt_<card>_<YYYYMMDD_HHMMSS>.txt`
    pub fn file_name(&self) -> String {
        format!(
            "receipt_{}_{}.txt",
            self.card,
            self.timestamp.format("%Y%m%d_%H%M%S")
        )
    }

    /// Write the receipt into `dir`, creating the directory if needed
    ///
    /// A second receipt for the same card within the same second replaces
    /// the first.
    ///
    /// # Returns
    ///
    /// The path of the written file.
    pub fn persist(&self, dir: &Path) -> Result<PathBuf, AtmError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        fs::write(&path, self.render())?;

        info!(card = %self.card, path = %path.display(), "receipt saved");
        Ok(path)
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "        ATM RECEIPT")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Card Number   : {}", self.card)?;
        writeln!(f, "Transaction   : {}", self.kind)?;
        writeln!(f, "Amount        : {}", self.amount)?;
        writeln!(f, "Date & Time   : {}", self.timestamp.format(TIMESTAMP_FORMAT))?;
        writeln!(f, "Available Bal : {}", self.balance)?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Thank you for using our ATM")
    }
}
