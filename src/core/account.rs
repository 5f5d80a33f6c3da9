//! Account module
//!
//! An `Account` is a card holder's view of one user record during a login.
//! It refers to the record by card identifier and reads or mutates it
//! through the `UserStore`, never holding a copy of its own.
//!
//! # Authentication
//!
//! ```text
//! Unauthenticated --correct PIN--> Authenticated
//! Unauthenticated --attempts exhausted--> Locked (terminal)
//! ```
//!
//! A locked account never accepts another PIN; there is no reset path.

use crate::core::traits::Console;
use crate::core::user_store::UserStore;
use crate::types::{is_valid_pin, Amount, AtmError, CardId, UserRecord};
use tracing::{info, warn};

/// Authentication state of an account for the current login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
    Locked,
}

/// A card inserted into the machine
#[derive(Debug, Clone)]
pub struct Account {
    card: CardId,
    state: AuthState,
    failed_attempts: u32,
    max_attempts: u32,
}

impl Account {
    /// Create an unauthenticated account for `card`
    ///
    /// The card is not resolved here; an unknown card is reported by
    /// `authenticate` without consuming an attempt.
    pub fn new(card: impl Into<CardId>, max_pin_attempts: u32) -> Self {
        Account {
            card: card.into(),
            state: AuthState::Unauthenticated,
            failed_attempts: 0,
            max_attempts: max_pin_attempts,
        }
    }

    pub fn card(&self) -> &str {
        &self.card
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::Authenticated
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    /// PIN attempts left before the account locks
    pub fn remaining_attempts(&self) -> u32 {
        self.max_attempts.saturating_sub(self.failed_attempts)
    }

    /// Check a single PIN entry
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The PIN matched (or the account was already authenticated)
    /// * `Err(AtmError::IncorrectPin)` - Wrong PIN, attempts remain
    /// * `Err(AtmError::PinLockout)` - Wrong PIN used the last attempt, or the
    ///   account was already locked
    /// * `Err(AtmError::UnknownCard)` - The card does not resolve; no attempt used
    pub fn submit_pin(&mut self, store: &UserStore, pin: &str) -> Result<(), AtmError> {
        match self.state {
            AuthState::Authenticated => return Ok(()),
            AuthState::Locked => return Err(AtmError::pin_lockout(&self.card)),
            AuthState::Unauthenticated => {}
        }

        let user = store
            .lookup(&self.card)
            .ok_or_else(|| AtmError::unknown_card(&self.card))?;

        if user.pin == pin {
            self.state = AuthState::Authenticated;
            info!(card = %self.card, "authenticated");
            return Ok(());
        }

        self.failed_attempts += 1;
        if self.failed_attempts >= self.max_attempts {
            self.state = AuthState::Locked;
            warn!(card = %self.card, attempts = self.failed_attempts, "card locked");
            return Err(AtmError::pin_lockout(&self.card));
        }

        info!(
            card = %self.card,
            remaining = self.remaining_attempts(),
            "wrong PIN"
        );
        Err(AtmError::IncorrectPin)
    }

    /// Prompt for the PIN until it matches or the attempts run out
    ///
    /// # Errors
    ///
    /// - `UnknownCard` if the card does not resolve (checked before any prompt)
    /// - `PinLockout` once the attempt budget is exhausted
    /// - `InputClosed` / `IoError` if the console fails
    pub fn authenticate(
        &mut self,
        store: &UserStore,
        console: &mut dyn Console,
    ) -> Result<(), AtmError> {
        if !store.contains(&self.card) {
            warn!(card = %self.card, "unknown card");
            return Err(AtmError::unknown_card(&self.card));
        }

        loop {
            match self.state {
                AuthState::Authenticated => return Ok(()),
                AuthState::Locked => return Err(AtmError::pin_lockout(&self.card)),
                AuthState::Unauthenticated => {}
            }

            let pin = console.read_secret("Enter your PIN: ")?;
            match self.submit_pin(store, &pin) {
                Ok(()) => return Ok(()),
                Err(AtmError::IncorrectPin) => console.print(&format!(
                    "Wrong PIN. Attempts left: {}",
                    self.remaining_attempts()
                )),
                Err(e @ AtmError::PinLockout { .. }) => {
                    console.print("Wrong PIN. Attempts left: 0");
                    return Err(e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// The user record behind this account
    ///
    /// Only available once authenticated.
    pub fn user<'s>(&self, store: &'s UserStore) -> Result<&'s UserRecord, AtmError> {
        if !self.is_authenticated() {
            return Err(AtmError::not_authenticated(&self.card));
        }
        store
            .lookup(&self.card)
            .ok_or_else(|| AtmError::unknown_card(&self.card))
    }

    /// Current balance
    pub fn balance(&self, store: &UserStore) -> Result<Amount, AtmError> {
        Ok(self.user(store)?.balance)
    }

    /// Check `pin` against the stored PIN
    ///
    /// Does not count towards the login attempt budget.
    pub fn verify_pin(&self, store: &UserStore, pin: &str) -> Result<(), AtmError> {
        if self.user(store)?.pin != pin {
            return Err(AtmError::IncorrectPin);
        }
        Ok(())
    }

    /// Replace the stored PIN
    ///
    /// Checks, in order, stopping at the first failure:
    /// 1. `old_pin` matches the stored PIN (`IncorrectPin`)
    /// 2. `new_pin` equals `confirm_pin` (`PinMismatch`)
    /// 3. `new_pin` is exactly four digits (`InvalidPinFormat`)
    ///
    /// On any failure the stored PIN is unchanged.
    pub fn change_pin(
        &self,
        store: &mut UserStore,
        old_pin: &str,
        new_pin: &str,
        confirm_pin: &str,
    ) -> Result<(), AtmError> {
        self.verify_pin(store, old_pin)?;
        if new_pin != confirm_pin {
            return Err(AtmError::PinMismatch);
        }
        if !is_valid_pin(new_pin) {
            return Err(AtmError::InvalidPinFormat);
        }

        store.set_pin(&self.card, new_pin)?;
        info!(card = %self.card, "PIN changed");
        Ok(())
    }
}
