//! ATM Simulator CLI
//!
//! Interactive ATM terminal over the built-in demo users (or a CSV seed file).
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --users users.csv --receipts-dir /tmp/receipts
//! cargo run -- --daily-withdraw-limit 50000 --note-denomination 100 --verbose
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` to override the level.
//!
//! # Exit Codes
//!
//! - 0: Session finished
//! - 1: Unknown card, PIN lockout, or a fatal error (bad user file, closed input)

use atm_simulator::cli;
use atm_simulator::core::{run_terminal, CashPool, UserStore};
use atm_simulator::io::{load_users, StdConsole};
use std::process;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let args = cli::parse_args();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();

    let config = args.to_atm_config();

    let mut store = match &args.users_file {
        Some(path) => match load_users(path) {
            Ok(store) => store,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => UserStore::seeded(),
    };
    let mut cash = CashPool::new(config.total_cash);
    let mut console = StdConsole::new();

    if let Err(e) = run_terminal(&mut console, &mut store, &mut cash, &config) {
        // Login refusals were already shown on the console
        if !e.is_fatal() {
            error!(error = %e, "terminal stopped");
            eprintln!("Error: {}", e);
        }
        process::exit(1);
    }
}
