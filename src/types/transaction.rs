//! Transaction-related types for the ATM simulator
//!
//! This module defines the kinds of operations an ATM session records and the
//! immutable record appended to a user's history once an operation commits.

use chrono::NaiveDateTime;
use std::fmt;

/// Amount of money in the account's minor-unit-agnostic currency
pub type Amount = u64;

/// Timestamp layout used on receipts and mini statements
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Kinds of operations that can appear on a receipt or in a history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Cash credited to the account
    Deposit,

    /// Cash dispensed from the account
    Withdraw,

    /// Balance read without moving money
    ///
    /// Only ever printed on receipts; inquiries are not appended to history.
    BalanceInquiry,
}

impl TransactionKind {
    /// Label printed on receipts and mini statements
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdraw => "Withdraw",
            TransactionKind::BalanceInquiry => "Balance Inquiry",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A completed operation on an account
///
/// Created by the user store when an operation commits and owned by the
/// user's history from then on. Never mutated or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// What happened
    pub kind: TransactionKind,

    /// Amount moved (0 for inquiries)
    pub amount: Amount,

    /// Account balance right after the operation committed
    pub balance: Amount,

    /// Local time the operation committed
    pub timestamp: NaiveDateTime,
}

impl TransactionRecord {
    pub fn new(
        kind: TransactionKind,
        amount: Amount,
        balance: Amount,
        timestamp: NaiveDateTime,
    ) -> Self {
        TransactionRecord {
            kind,
            amount,
            balance,
            timestamp,
        }
    }

    /// One mini statement line: `date | kind | amount | Bal: balance`
    pub fn statement_line(&self) -> String {
        format!(
            "{} | {} | {} | Bal: {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.kind,
            self.amount,
            self.balance
        )
    }
}
