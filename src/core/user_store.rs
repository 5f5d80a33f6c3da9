//! User store module
//!
//! This module provides the `UserStore` struct, the single owner of every
//! user record for the lifetime of the process.
//!
//! The UserStore is responsible for:
//! - Validating records at the boundary (card format, 4 digit PIN, unique card)
//! - Looking users up by card identifier
//! - Applying committed balance, PIN and daily-counter changes
//! - Appending transaction records to a user's history
//!
//! Rule checking happens in the session controller; the store only applies
//! changes that have already been validated.

use crate::types::{
    is_valid_card, is_valid_pin, Amount, AtmError, TransactionKind, TransactionRecord, UserRecord,
};
use chrono::Local;
use std::collections::HashMap;
use tracing::debug;

/// Registry of all card holders keyed by card identifier
#[derive(Debug, Default)]
pub struct UserStore {
    users: HashMap<String, UserRecord>,
}

impl UserStore {
    /// Create an empty store
    pub fn new() -> Self {
        UserStore {
            users: HashMap::new(),
        }
    }

    /// Create a store holding the built-in demo users
    ///
    /// - `1234567890` (PIN `1234`): balance 25000 with one prior deposit
    /// - `9876543210` (PIN `4321`): balance 15000, no history
    pub fn seeded() -> Self {
        let mut first = UserRecord::new("1234567890", "Abdullah Al Maruf", "1234", 25000);
        first.transactions.push(TransactionRecord::new(
            TransactionKind::Deposit,
            5000,
            25000,
            Local::now().naive_local(),
        ));
        let second = UserRecord::new("9876543210", "Demo User", "4321", 15000);

        let mut users = HashMap::new();
        users.insert(first.card.clone(), first);
        users.insert(second.card.clone(), second);
        UserStore { users }
    }

    /// Add a user record
    ///
    /// # Errors
    ///
    /// Returns `InvalidUserRecord` if:
    /// - The card identifier is empty or contains characters other than
    ///   ASCII letters, digits, `-` and `_`
    /// - The PIN is not exactly four decimal digits
    /// - A user with the same card already exists
    pub fn insert(&mut self, user: UserRecord) -> Result<(), AtmError> {
        if user.card.trim().is_empty() {
            return Err(AtmError::invalid_user_record(
                &user.card,
                "card number is empty",
            ));
        }
        if !is_valid_card(&user.card) {
            return Err(AtmError::invalid_user_record(
                &user.card,
                "card number may only contain letters, digits, '-' and '_'",
            ));
        }
        if !is_valid_pin(&user.pin) {
            return Err(AtmError::invalid_user_record(
                &user.card,
                "PIN must be exactly 4 digits",
            ));
        }
        if self.users.contains_key(&user.card) {
            return Err(AtmError::invalid_user_record(
                &user.card,
                "duplicate card number",
            ));
        }

        debug!(card = %user.card, "user added to store");
        self.users.insert(user.card.clone(), user);
        Ok(())
    }

    /// Look up a user by card identifier
    pub fn lookup(&self, card: &str) -> Option<&UserRecord> {
        self.users.get(card)
    }

    pub fn contains(&self, card: &str) -> bool {
        self.users.contains_key(card)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Transaction history of a user in append order
    pub fn history(&self, card: &str) -> Option<&[TransactionRecord]> {
        self.users.get(card).map(|user| user.transactions.as_slice())
    }

    /// Overwrite a user's balance
    pub fn set_balance(&mut self, card: &str, balance: Amount) -> Result<(), AtmError> {
        self.user_mut(card)?.balance = balance;
        Ok(())
    }

    /// Overwrite a user's PIN
    ///
    /// The PIN must already have been validated by the caller.
    pub fn set_pin(&mut self, card: &str, pin: &str) -> Result<(), AtmError> {
        self.user_mut(card)?.pin = pin.to_string();
        Ok(())
    }

    /// Add to the amount a user has withdrawn today
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the counter would overflow; the
    /// counter is left unchanged.
    pub fn add_daily_withdrawn(&mut self, card: &str, amount: Amount) -> Result<(), AtmError> {
        let user = self.user_mut(card)?;
        user.daily_withdrawn = user
            .daily_withdrawn
            .checked_add(amount)
            .ok_or_else(|| AtmError::arithmetic_overflow("daily withdrawal", card))?;
        Ok(())
    }

    /// Zero the daily withdrawal counter
    ///
    /// Hook for an external day-rollover trigger; nothing in the ATM calls it.
    pub fn reset_daily_withdrawn(&mut self, card: &str) -> Result<(), AtmError> {
        self.user_mut(card)?.daily_withdrawn = 0;
        debug!(card, "daily withdrawal counter reset");
        Ok(())
    }

    /// Record a committed operation in the user's history, stamped with the
    /// current local time
    pub fn append_transaction(
        &mut self,
        card: &str,
        kind: TransactionKind,
        amount: Amount,
        balance: Amount,
    ) -> Result<&TransactionRecord, AtmError> {
        let user = self.user_mut(card)?;
        user.transactions.push(TransactionRecord::new(
            kind,
            amount,
            balance,
            Local::now().naive_local(),
        ));
        // Just pushed, so the history is non-empty
        Ok(&user.transactions[user.transactions.len() - 1])
    }

    fn user_mut(&mut self, card: &str) -> Result<&mut UserRecord, AtmError> {
        self.users
            .get_mut(card)
            .ok_or_else(|| AtmError::unknown_card(card))
    }
}
