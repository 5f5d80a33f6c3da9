use crate::types::{Amount, AtmConfig};
use clap::Parser;
use std::path::PathBuf;

/// Interactive ATM terminal simulation
#[derive(Parser, Debug)]
#[command(name = "atm-simulator")]
#[command(about = "Interactive ATM terminal simulation", long_about = None)]
pub struct CliArgs {
    /// CSV file of users (card,name,pin,balance) replacing the demo users
    #[arg(long = "users", value_name = "CSV")]
    pub users_file: Option<PathBuf>,

    /// Maximum total a card may withdraw per day
    #[arg(long = "daily-withdraw-limit", value_name = "AMOUNT")]
    pub daily_withdraw_limit: Option<Amount>,

    /// Balance that must remain after a withdrawal
    #[arg(long = "min-balance", value_name = "AMOUNT")]
    pub min_balance: Option<Amount>,

    /// Withdrawals must be a multiple of this note value
    #[arg(long = "note-denomination", value_name = "AMOUNT")]
    pub note_denomination: Option<Amount>,

    /// Wrong PINs allowed before the card is locked
    #[arg(long = "max-pin-attempts", value_name = "COUNT")]
    pub max_pin_attempts: Option<u32>,

    /// Cash loaded into the machine at startup
    #[arg(long = "total-cash", value_name = "AMOUNT")]
    pub total_cash: Option<Amount>,

    /// Directory receipt files are written to
    #[arg(long = "receipts-dir", value_name = "DIR")]
    pub receipts_dir: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Create an AtmConfig from CLI arguments
    ///
    /// Values not given on the command line keep their defaults.
    pub fn to_atm_config(&self) -> AtmConfig {
        let default = AtmConfig::default();
        AtmConfig::new(
            self.daily_withdraw_limit
                .unwrap_or(default.daily_withdraw_limit),
            self.min_balance.unwrap_or(default.min_balance),
            self.note_denomination.unwrap_or(default.note_denomination),
            self.max_pin_attempts.unwrap_or(default.max_pin_attempts),
            self.total_cash.unwrap_or(default.total_cash),
            self.receipts_dir.clone().unwrap_or(default.receipts_dir),
        )
    }
}
