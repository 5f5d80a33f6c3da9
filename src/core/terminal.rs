//! Login and session orchestration
//!
//! `run_terminal` is the whole customer visit: card prompt, PIN checks, the
//! menu session and the farewell. An unknown card or a PIN lockout is
//! reported on the console and returned so the caller can end the program.

use crate::core::account::Account;
use crate::core::atm::Atm;
use crate::core::cash_pool::CashPool;
use crate::core::traits::Console;
use crate::core::user_store::UserStore;
use crate::types::{AtmConfig, AtmError};
use tracing::{info, warn};

const BANNER: &str = "=================================";

/// Serve one customer from card prompt to farewell
///
/// # Errors
///
/// - `UnknownCard` / `PinLockout` after the message has been shown
/// - `InputClosed` if input ends before login completes
/// - `IoError` if the console fails
///
/// Input ending during the menu session ends the visit normally.
pub fn run_terminal(
    console: &mut dyn Console,
    store: &mut UserStore,
    cash: &mut CashPool,
    config: &AtmConfig,
) -> Result<(), AtmError> {
    console.print(BANNER);
    console.print("      Welcome to ATM Machine     ");
    console.print(BANNER);

    let card = console.read_line("Enter your card number: ")?;
    let mut account = Account::new(card.trim(), config.max_pin_attempts);

    if let Err(e) = account.authenticate(store, console) {
        if e.is_fatal() {
            warn!(card = %account.card(), error = %e, "login refused");
            console.print(&e.to_string());
        }
        return Err(e);
    }

    let name = account.user(store)?.name.clone();
    console.print("");
    console.print(&format!("Welcome, {}!", name));

    let mut atm = Atm::new(account, store, cash, config, console)?;
    match atm.run() {
        Ok(()) => {}
        Err(AtmError::InputClosed) => info!("input closed, session ended"),
        Err(e) => return Err(e),
    }

    console.print("");
    console.print("Thank you. Have a nice day!");
    Ok(())
}
