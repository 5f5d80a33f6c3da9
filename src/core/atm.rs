//! ATM session controller
//!
//! This module provides the `Atm` that drives one authenticated session. It
//! applies the business rules for each menu operation, coordinating between
//! the `Account`, the `UserStore` and the machine's `CashPool`.
//!
//! The rules enforced are:
//! - Withdrawals: note denomination, daily cap, minimum balance, ATM cash
//!   (checked in that order; the first failure is the one reported)
//! - Deposits: strictly positive amounts
//! - PIN changes: delegated to `Account::change_pin`
//!
//! Every check for an operation runs before any mutation, so a rejected
//! operation leaves balance, daily counter, cash pool and history untouched.

use crate::core::account::Account;
use crate::core::cash_pool::CashPool;
use crate::core::traits::Console;
use crate::core::user_store::UserStore;
use crate::io::receipt::Receipt;
use crate::types::{Amount, AtmConfig, AtmError, TransactionKind, TransactionRecord};
use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};

/// Number of records shown on a mini statement
pub const MINI_STATEMENT_LEN: usize = 5;

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    CheckBalance,
    Withdraw,
    Deposit,
    MiniStatement,
    ChangePin,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 6] = [
        MenuOption::CheckBalance,
        MenuOption::Withdraw,
        MenuOption::Deposit,
        MenuOption::MiniStatement,
        MenuOption::ChangePin,
        MenuOption::Exit,
    ];

    /// Parse a menu selection ("1" to "6")
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuOption::CheckBalance),
            "2" => Some(MenuOption::Withdraw),
            "3" => Some(MenuOption::Deposit),
            "4" => Some(MenuOption::MiniStatement),
            "5" => Some(MenuOption::ChangePin),
            "6" => Some(MenuOption::Exit),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            MenuOption::CheckBalance => 1,
            MenuOption::Withdraw => 2,
            MenuOption::Deposit => 3,
            MenuOption::MiniStatement => 4,
            MenuOption::ChangePin => 5,
            MenuOption::Exit => 6,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::CheckBalance => "Check Balance",
            MenuOption::Withdraw => "Withdraw Cash",
            MenuOption::Deposit => "Deposit Cash",
            MenuOption::MiniStatement => "Mini Statement",
            MenuOption::ChangePin => "Change PIN",
            MenuOption::Exit => "Exit",
        }
    }
}

/// Parse an amount typed at the console
///
/// Negative values parse successfully; whether they are acceptable is up to
/// the operation.
pub fn parse_amount(input: &str) -> Result<i64, AtmError> {
    let input = input.trim();
    input
        .parse::<i64>()
        .map_err(|_| AtmError::invalid_amount_format(input))
}

/// One authenticated ATM session
pub struct Atm<'a> {
    account: Account,
    store: &'a mut UserStore,
    cash: &'a mut CashPool,
    config: &'a AtmConfig,
    console: &'a mut dyn Console,
    active: bool,
}

impl<'a> Atm<'a> {
    /// Start a session for an authenticated account
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` if the account has not passed PIN checks.
    pub fn new(
        account: Account,
        store: &'a mut UserStore,
        cash: &'a mut CashPool,
        config: &'a AtmConfig,
        console: &'a mut dyn Console,
    ) -> Result<Self, AtmError> {
        if !account.is_authenticated() {
            return Err(AtmError::not_authenticated(account.card()));
        }

        Ok(Atm {
            account,
            store,
            cash,
            config,
            console,
            active: true,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// End the session; every later operation fails with `SessionEnded`
    pub fn end_session(&mut self) {
        if self.active {
            info!(card = %self.account.card(), "session ended");
        }
        self.active = false;
    }

    fn ensure_active(&self) -> Result<(), AtmError> {
        if self.active {
            Ok(())
        } else {
            Err(AtmError::SessionEnded)
        }
    }

    /// Current balance of the session's account
    pub fn check_balance(&self) -> Result<Amount, AtmError> {
        self.ensure_active()?;
        self.account.balance(self.store)
    }

    /// Dispense cash
    ///
    /// Validates, in order:
    /// 1. `amount` is a positive multiple of the note denomination (`InvalidDenomination`)
    /// 2. today's withdrawals plus `amount` stay within the daily cap (`DailyLimitExceeded`)
    /// 3. `amount` plus the minimum balance is covered by the balance (`InsufficientFunds`)
    /// 4. the machine holds at least `amount` (`InsufficientAtmCash`)
    ///
    /// # Returns
    ///
    /// The Withdraw record appended to the account's history.
    pub fn withdraw(&mut self, amount: i64) -> Result<TransactionRecord, AtmError> {
        self.ensure_active()?;
        let user = self.account.user(self.store)?;
        let config = self.config;

        let requested = match Amount::try_from(amount) {
            Ok(requested)
                if requested > 0 && requested.checked_rem(config.note_denomination) == Some(0) =>
            {
                requested
            }
            _ => {
                return Err(AtmError::invalid_denomination(
                    amount,
                    config.note_denomination,
                ))
            }
        };

        let withdrawn_today = user.daily_withdrawn;
        if withdrawn_today
            .checked_add(requested)
            .map_or(true, |total| total > config.daily_withdraw_limit)
        {
            return Err(AtmError::daily_limit_exceeded(
                requested,
                withdrawn_today,
                config.daily_withdraw_limit,
            ));
        }

        let balance = user.balance;
        if requested
            .checked_add(config.min_balance)
            .map_or(true, |needed| needed > balance)
        {
            return Err(AtmError::insufficient_funds(
                balance,
                requested,
                config.min_balance,
            ));
        }

        if !self.cash.can_dispense(requested) {
            return Err(AtmError::insufficient_atm_cash(
                self.cash.available(),
                requested,
            ));
        }

        // All checks passed; commit
        let new_balance = balance - requested;
        let card = self.account.card();
        self.store.add_daily_withdrawn(card, requested)?;
        self.store.set_balance(card, new_balance)?;
        self.cash.dispense(requested)?;
        let record = self
            .store
            .append_transaction(card, TransactionKind::Withdraw, requested, new_balance)?
            .clone();

        info!(
            card,
            amount = requested,
            balance = new_balance,
            atm_cash = self.cash.available(),
            "withdrawal committed"
        );
        Ok(record)
    }

    /// Accept cash into the account
    ///
    /// # Returns
    ///
    /// The Deposit record appended to the account's history.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` when `amount <= 0`
    /// - `ArithmeticOverflow` when the balance would overflow
    pub fn deposit(&mut self, amount: i64) -> Result<TransactionRecord, AtmError> {
        self.ensure_active()?;
        if amount <= 0 {
            return Err(AtmError::invalid_amount(amount));
        }
        let amount = amount.unsigned_abs();

        let balance = self.account.balance(self.store)?;
        let card = self.account.card();
        let new_balance = balance
            .checked_add(amount)
            .ok_or_else(|| AtmError::arithmetic_overflow("deposit", card))?;

        self.store.set_balance(card, new_balance)?;
        let record = self
            .store
            .append_transaction(card, TransactionKind::Deposit, amount, new_balance)?
            .clone();

        info!(card, amount, balance = new_balance, "deposit committed");
        Ok(record)
    }

    /// The last `MINI_STATEMENT_LEN` records, oldest first
    ///
    /// An empty slice means the account has no history yet.
    pub fn mini_statement(&self) -> Result<&[TransactionRecord], AtmError> {
        self.ensure_active()?;
        let transactions = &self.account.user(self.store)?.transactions;
        let start = transactions.len().saturating_sub(MINI_STATEMENT_LEN);
        Ok(&transactions[start..])
    }

    /// Change the account PIN (see `Account::change_pin`)
    pub fn change_pin(
        &mut self,
        old_pin: &str,
        new_pin: &str,
        confirm_pin: &str,
    ) -> Result<(), AtmError> {
        self.ensure_active()?;
        self.account
            .change_pin(self.store, old_pin, new_pin, confirm_pin)
    }

    /// Run the interactive menu loop until the user leaves
    ///
    /// Validation failures are shown to the user and the loop continues.
    /// Console failures end the session and are returned.
    pub fn run(&mut self) -> Result<(), AtmError> {
        let result = self.menu_loop();
        self.end_session();
        result
    }

    fn menu_loop(&mut self) -> Result<(), AtmError> {
        loop {
            self.show_menu();
            let choice = self.console.read_line("Select an option: ")?;

            let Some(option) = MenuOption::parse(&choice) else {
                self.console.print("Invalid option. Please try again.");
                continue;
            };

            if option == MenuOption::Exit {
                self.console.print("Thank you for using the ATM.");
                return Ok(());
            }

            match self.perform(option) {
                Ok(()) => {}
                Err(e) if e.ends_session() => return Err(e),
                Err(e) => {
                    warn!(card = %self.account.card(), error = %e, "operation rejected");
                    self.console.print(&e.to_string());
                }
            }

            if !self.ask_yes_no("Do you want another transaction? (y/n): ")? {
                self.console.print("Session ended. Please take your card.");
                return Ok(());
            }
        }
    }

    fn show_menu(&mut self) {
        self.console.print("");
        self.console.print("===== ATM MENU =====");
        for option in MenuOption::ALL {
            self.console
                .print(&format!("{}. {}", option.number(), option.label()));
        }
    }

    fn perform(&mut self, option: MenuOption) -> Result<(), AtmError> {
        match option {
            MenuOption::CheckBalance => self.handle_check_balance(),
            MenuOption::Withdraw => self.handle_withdraw(),
            MenuOption::Deposit => self.handle_deposit(),
            MenuOption::MiniStatement => self.handle_mini_statement(),
            MenuOption::ChangePin => self.handle_change_pin(),
            MenuOption::Exit => Ok(()),
        }
    }

    fn handle_check_balance(&mut self) -> Result<(), AtmError> {
        let balance = self.check_balance()?;
        self.console
            .print(&format!("Your current balance is: {}", balance));
        self.offer_receipt(
            TransactionKind::BalanceInquiry,
            0,
            balance,
            Local::now().naive_local(),
        )
    }

    fn handle_withdraw(&mut self) -> Result<(), AtmError> {
        let input = self.console.read_line("Enter amount to withdraw: ")?;
        let record = self.withdraw(parse_amount(&input)?)?;

        self.console
            .print(&format!("Please collect your cash: {}", record.amount));
        self.console
            .print(&format!("Your new balance is: {}", record.balance));
        self.offer_receipt(record.kind, record.amount, record.balance, record.timestamp)
    }

    fn handle_deposit(&mut self) -> Result<(), AtmError> {
        let input = self.console.read_line("Enter amount to deposit: ")?;
        let record = self.deposit(parse_amount(&input)?)?;

        self.console.print("Amount deposited successfully.");
        self.console
            .print(&format!("Your new balance is: {}", record.balance));
        self.offer_receipt(record.kind, record.amount, record.balance, record.timestamp)
    }

    fn handle_mini_statement(&mut self) -> Result<(), AtmError> {
        let lines: Vec<String> = self
            .mini_statement()?
            .iter()
            .map(TransactionRecord::statement_line)
            .collect();

        if lines.is_empty() {
            self.console.print("No transactions found.");
            return Ok(());
        }

        self.console.print("");
        self.console.print(&format!(
            "--- Mini Statement (Last {} Transactions) ---",
            MINI_STATEMENT_LEN
        ));
        for line in &lines {
            self.console.print(line);
        }
        Ok(())
    }

    fn handle_change_pin(&mut self) -> Result<(), AtmError> {
        self.ensure_active()?;
        let old_pin = self.console.read_secret("Enter current PIN: ")?;
        self.account.verify_pin(self.store, &old_pin)?;

        let new_pin = self.console.read_secret("Enter new PIN: ")?;
        let confirm_pin = self.console.read_secret("Confirm new PIN: ")?;

        self.change_pin(&old_pin, &new_pin, &confirm_pin)?;
        self.console.print("PIN changed successfully.");
        Ok(())
    }

    /// Ask for a receipt; on "y" print it and save it to the receipts directory
    ///
    /// A failed save is reported but does not end the session.
    fn offer_receipt(
        &mut self,
        kind: TransactionKind,
        amount: Amount,
        balance: Amount,
        timestamp: NaiveDateTime,
    ) -> Result<(), AtmError> {
        if !self.ask_yes_no("Do you want a receipt? (y/n): ")? {
            return Ok(());
        }

        let receipt = Receipt::new(self.account.card(), kind, amount, balance, timestamp);
        self.console.print("");
        self.console.print(receipt.render().trim_end());

        match receipt.persist(&self.config.receipts_dir) {
            Ok(path) => self
                .console
                .print(&format!("Receipt saved successfully: {}", path.display())),
            Err(e) => {
                warn!(card = %self.account.card(), error = %e, "receipt not saved");
                self.console
                    .print(&format!("Receipt could not be saved: {}", e));
            }
        }
        Ok(())
    }

    fn ask_yes_no(&mut self, prompt: &str) -> Result<bool, AtmError> {
        let answer = self.console.read_line(prompt)?;
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ScriptedConsole;
    use rstest::rstest;

    const CARD: &str = "1234567890";

    struct Fixture {
        store: UserStore,
        cash: CashPool,
        config: AtmConfig,
        console: ScriptedConsole,
    }

    impl Fixture {
        fn new() -> Self {
            let config = AtmConfig::default();
            Fixture {
                store: UserStore::seeded(),
                cash: CashPool::new(config.total_cash),
                config,
                console: ScriptedConsole::new(Vec::<String>::new()),
            }
        }

        fn with_cash(mut self, cash: Amount) -> Self {
            self.cash = CashPool::new(cash);
            self
        }

        fn with_daily_withdrawn(mut self, amount: Amount) -> Self {
            self.store.add_daily_withdrawn(CARD, amount).unwrap();
            self
        }

        fn atm(&mut self) -> Atm<'_> {
            let mut account = Account::new(CARD, self.config.max_pin_attempts);
            account.submit_pin(&self.store, "1234").unwrap();
            Atm::new(
                account,
                &mut self.store,
                &mut self.cash,
                &self.config,
                &mut self.console,
            )
            .unwrap()
        }

        fn user(&self) -> &crate::types::UserRecord {
            self.store.lookup(CARD).unwrap()
        }
    }

    #[rstest]
    #[case::one("1", Some(MenuOption::CheckBalance))]
    #[case::padded(" 6 ", Some(MenuOption::Exit))]
    #[case::zero("0", None)]
    #[case::seven("7", None)]
    #[case::word("balance", None)]
    fn test_menu_option_parse(#[case] input: &str, #[case] expected: Option<MenuOption>) {
        assert_eq!(MenuOption::parse(input), expected);
    }

    #[rstest]
    #[case::positive("500", Ok(500))]
    #[case::negative("-10", Ok(-10))]
    #[case::padded(" 42 ", Ok(42))]
    #[case::decimal("5.5", Err(AtmError::invalid_amount_format("5.5")))]
    #[case::text("abc", Err(AtmError::invalid_amount_format("abc")))]
    #[case::empty("", Err(AtmError::invalid_amount_format("")))]
    fn test_parse_amount(#[case] input: &str, #[case] expected: Result<i64, AtmError>) {
        assert_eq!(parse_amount(input), expected);
    }

    #[test]
    fn test_new_rejects_unauthenticated_account() {
        let mut fixture = Fixture::new();
        let account = Account::new(CARD, 3);
        let result = Atm::new(
            account,
            &mut fixture.store,
            &mut fixture.cash,
            &fixture.config,
            &mut fixture.console,
        );
        assert!(matches!(result, Err(AtmError::NotAuthenticated { .. })));
    }

    #[test]
    fn test_withdraw_success_commits_everything() {
        let mut fixture = Fixture::new();
        let record = fixture.atm().withdraw(500).unwrap();

        assert_eq!(record.kind, TransactionKind::Withdraw);
        assert_eq!(record.amount, 500);
        assert_eq!(record.balance, 24500);

        let user = fixture.user();
        assert_eq!(user.balance, 24500);
        assert_eq!(user.daily_withdrawn, 500);
        assert_eq!(user.transactions.len(), 2);
        assert_eq!(user.transactions[1], record);
        assert_eq!(fixture.cash.available(), 99500);
    }

    #[rstest]
    #[case::not_a_multiple(700, 0, 100000, "denomination")]
    #[case::zero(0, 0, 100000, "denomination")]
    #[case::negative(-500, 0, 100000, "denomination")]
    #[case::daily_cap(1000, 19500, 100000, "daily")]
    #[case::large_odd_amount(24600, 0, 100000, "denomination")]
    #[case::atm_cash(1000, 0, 500, "cash")]
    // Denomination and cash both violated: denomination wins
    #[case::denomination_before_cash(700, 0, 0, "denomination")]
    // Daily cap and cash both violated: daily cap wins
    #[case::daily_before_cash(1000, 19500, 0, "daily")]
    fn test_withdraw_rejections_leave_state_unchanged(
        #[case] amount: i64,
        #[case] withdrawn_today: Amount,
        #[case] cash: Amount,
        #[case] expected: &str,
    ) {
        let mut fixture = Fixture::new()
            .with_cash(cash)
            .with_daily_withdrawn(withdrawn_today);

        let error = fixture.atm().withdraw(amount).unwrap_err();
        match expected {
            "denomination" => assert!(
                matches!(error, AtmError::InvalidDenomination { .. }),
                "got {:?}",
                error
            ),
            "daily" => assert!(
                matches!(error, AtmError::DailyLimitExceeded { .. }),
                "got {:?}",
                error
            ),
            "cash" => assert!(
                matches!(error, AtmError::InsufficientAtmCash { .. }),
                "got {:?}",
                error
            ),
            _ => panic!("Unknown expectation: {}", expected),
        }

        let user = fixture.user();
        assert_eq!(user.balance, 25000);
        assert_eq!(user.daily_withdrawn, withdrawn_today);
        assert_eq!(user.transactions.len(), 1);
        assert_eq!(fixture.cash.available(), cash);
    }

    #[rstest]
    // Daily cap, balance and cash all violated: daily cap wins
    #[case::daily_before_funds(19500, "daily")]
    // Balance and cash both violated: minimum balance wins
    #[case::funds_before_cash(0, "funds")]
    fn test_withdraw_order_on_low_balance(
        #[case] withdrawn_today: Amount,
        #[case] expected: &str,
    ) {
        let mut fixture = Fixture::new()
            .with_cash(0)
            .with_daily_withdrawn(withdrawn_today);
        fixture.store.set_balance(CARD, 1000).unwrap();

        let error = fixture.atm().withdraw(1000).unwrap_err();
        match expected {
            "daily" => assert_eq!(
                error,
                AtmError::daily_limit_exceeded(1000, withdrawn_today, 20000)
            ),
            "funds" => assert_eq!(error, AtmError::insufficient_funds(1000, 1000, 500)),
            _ => panic!("Unknown expectation: {}", expected),
        }

        let user = fixture.user();
        assert_eq!(user.balance, 1000);
        assert_eq!(user.daily_withdrawn, withdrawn_today);
        assert_eq!(user.transactions.len(), 1);
        assert_eq!(fixture.cash.available(), 0);
    }

    #[test]
    fn test_withdraw_zero_denomination_is_rejected() {
        let mut fixture = Fixture::new();
        fixture.config.note_denomination = 0;

        let error = fixture.atm().withdraw(500).unwrap_err();
        assert_eq!(error, AtmError::invalid_denomination(500, 0));
        assert_eq!(fixture.user().balance, 25000);
        assert_eq!(fixture.cash.available(), 100000);
    }

    #[test]
    fn test_withdraw_insufficient_funds() {
        let mut fixture = Fixture::new();
        fixture.store.set_balance(CARD, 1000).unwrap();
        let error = fixture.atm().withdraw(1000).unwrap_err();
        assert_eq!(error, AtmError::insufficient_funds(1000, 1000, 500));
        assert_eq!(fixture.user().balance, 1000);
        assert_eq!(fixture.cash.available(), 100000);
    }

    #[test]
    fn test_withdraw_insufficient_funds_above_floor() {
        // With stock rules 24600 fails the note and daily checks first, so
        // relax those to reach the minimum balance check
        let mut fixture = Fixture::new();
        fixture.config.daily_withdraw_limit = 100000;

        let error = fixture.atm().withdraw(25000).unwrap_err();
        assert_eq!(error, AtmError::insufficient_funds(25000, 25000, 500));

        let mut fixture = Fixture::new();
        fixture.config.note_denomination = 100;
        fixture.config.daily_withdraw_limit = 100000;
        let error = fixture.atm().withdraw(24600).unwrap_err();
        assert_eq!(error, AtmError::insufficient_funds(25000, 24600, 500));
        assert_eq!(fixture.user().balance, 25000);
    }

    #[test]
    fn test_withdraw_exactly_to_floor_and_daily_cap() {
        let mut fixture = Fixture::new();
        fixture.store.set_balance(CARD, 20500).unwrap();

        let record = fixture.atm().withdraw(20000).unwrap();
        assert_eq!(record.balance, 500);
        assert_eq!(fixture.user().daily_withdrawn, 20000);

        // Daily cap now reached
        let error = fixture.atm().withdraw(500).unwrap_err();
        assert!(matches!(error, AtmError::DailyLimitExceeded { .. }));
    }

    #[test]
    fn test_withdraw_drains_shared_cash_pool() {
        let mut fixture = Fixture::new().with_cash(1000);
        fixture.atm().withdraw(1000).unwrap();

        let error = fixture.atm().withdraw(500).unwrap_err();
        assert_eq!(error, AtmError::insufficient_atm_cash(0, 500));
        assert_eq!(fixture.user().balance, 24000);
    }

    #[test]
    fn test_reset_daily_withdrawn_allows_more_withdrawals() {
        let mut fixture = Fixture::new().with_daily_withdrawn(20000);
        assert!(fixture.atm().withdraw(500).is_err());

        fixture.store.reset_daily_withdrawn(CARD).unwrap();
        fixture.atm().withdraw(500).unwrap();
    }

    #[rstest]
    #[case::one(1)]
    #[case::large(1_000_000)]
    fn test_deposit_increases_balance(#[case] amount: i64) {
        let mut fixture = Fixture::new();
        let record = fixture.atm().deposit(amount).unwrap();

        let expected = 25000 + amount as Amount;
        assert_eq!(record.kind, TransactionKind::Deposit);
        assert_eq!(record.balance, expected);
        assert_eq!(fixture.user().balance, expected);
        assert_eq!(fixture.user().transactions.len(), 2);
    }

    #[rstest]
    #[case::negative(-10)]
    #[case::zero(0)]
    fn test_deposit_rejects_non_positive(#[case] amount: i64) {
        let mut fixture = Fixture::new();
        let error = fixture.atm().deposit(amount).unwrap_err();

        assert_eq!(error, AtmError::invalid_amount(amount));
        assert_eq!(fixture.user().balance, 25000);
        assert_eq!(fixture.user().transactions.len(), 1);
    }

    #[test]
    fn test_deposit_overflow_is_rejected() {
        let mut fixture = Fixture::new();
        fixture.store.set_balance(CARD, Amount::MAX - 1).unwrap();

        let error = fixture.atm().deposit(2).unwrap_err();
        assert!(matches!(error, AtmError::ArithmeticOverflow { .. }));
        assert_eq!(fixture.user().balance, Amount::MAX - 1);
    }

    #[test]
    fn test_mini_statement_returns_last_five_in_order() {
        let mut fixture = Fixture::new();
        let mut atm = fixture.atm();
        for amount in 1..=6 {
            atm.deposit(amount).unwrap();
        }

        let statement = atm.mini_statement().unwrap();
        let amounts: Vec<Amount> = statement.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_mini_statement_empty_history() {
        let mut store = UserStore::seeded();
        let mut cash = CashPool::new(100);
        let config = AtmConfig::default();
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        let mut account = Account::new("9876543210", 3);
        account.submit_pin(&store, "4321").unwrap();

        let atm = Atm::new(account, &mut store, &mut cash, &config, &mut console).unwrap();
        assert!(atm.mini_statement().unwrap().is_empty());
    }

    #[test]
    fn test_operations_fail_after_end_session() {
        let mut fixture = Fixture::new();
        let mut atm = fixture.atm();
        atm.end_session();

        assert!(!atm.is_active());
        assert_eq!(atm.check_balance(), Err(AtmError::SessionEnded));
        assert_eq!(atm.withdraw(500), Err(AtmError::SessionEnded));
        assert_eq!(atm.deposit(500), Err(AtmError::SessionEnded));
        assert_eq!(atm.change_pin("1234", "1111", "1111"), Err(AtmError::SessionEnded));
        assert!(atm.mini_statement().is_err());
        assert_eq!(fixture.user().balance, 25000);
    }

    #[test]
    fn test_run_invalid_option_redisplays_menu() {
        let mut fixture = Fixture::new();
        fixture.console = ScriptedConsole::new(["9", "6"]);
        fixture.atm().run().unwrap();

        assert!(fixture.console.output_contains("Invalid option. Please try again."));
        assert_eq!(
            fixture
                .console
                .output()
                .iter()
                .filter(|line| *line == "===== ATM MENU =====")
                .count(),
            2
        );
        assert!(fixture.console.output_contains("Thank you for using the ATM."));
    }

    #[test]
    fn test_run_rejected_withdrawal_skips_receipt_and_continues() {
        let mut fixture = Fixture::new();
        fixture.console = ScriptedConsole::new(["2", "700", "y", "6"]);
        fixture.atm().run().unwrap();

        assert!(fixture.console.output_contains("Amount must be in multiples of 500."));
        assert!(!fixture.console.prompted("Do you want a receipt? (y/n): "));
        assert_eq!(fixture.user().balance, 25000);
    }

    #[test]
    fn test_run_non_numeric_amount() {
        let mut fixture = Fixture::new();
        fixture.console = ScriptedConsole::new(["3", "lots", "n"]);
        fixture.atm().run().unwrap();

        assert!(fixture.console.output_contains("Invalid amount 'lots'."));
        assert!(fixture
            .console
            .output_contains("Session ended. Please take your card."));
        assert_eq!(fixture.user().transactions.len(), 1);
    }

    #[test]
    fn test_run_change_pin() {
        let mut fixture = Fixture::new();
        fixture.console = ScriptedConsole::new(["5", "1234", "2468", "2468", "n"]);
        fixture.atm().run().unwrap();

        assert!(fixture.console.output_contains("PIN changed successfully."));
        assert_eq!(fixture.user().pin, "2468");
    }

    #[test]
    fn test_run_change_pin_stops_after_wrong_current_pin() {
        let mut fixture = Fixture::new();
        fixture.console = ScriptedConsole::new(["5", "9999", "n"]);
        fixture.atm().run().unwrap();

        assert!(fixture
            .console
            .output_contains("Incorrect PIN. PIN change failed."));
        assert!(!fixture.console.prompted("Enter new PIN: "));
        assert!(fixture
            .console
            .output_contains("Session ended. Please take your card."));
        assert_eq!(fixture.user().pin, "1234");
    }

    #[test]
    fn test_run_input_closed_ends_session() {
        let mut fixture = Fixture::new();
        fixture.console = ScriptedConsole::new(["1"]);
        let mut atm = fixture.atm();

        assert_eq!(atm.run(), Err(AtmError::InputClosed));
        assert!(!atm.is_active());
    }
}
