//! In-memory bank.
//!
//! The bank owns every account opened through it together with the account
//! number sequence, the random source used for card numbers and the clock
//! used to date them. Commands can be applied one by one or consumed from an
//! async stream.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio_stream::{Stream, StreamExt};
use tracing::{info, warn};

use crate::Amount;
use crate::card::Card;
use crate::clock::{Clock, SystemClock};
use crate::model::{AccountNumber, AccountSequence, Command};

mod account;
pub use account::{Account, AccountKind, BalanceSummary, Balances, Opened};

mod error;
pub use error::{AccountError, BankError};

pub struct Bank {
    accounts: BTreeMap<AccountNumber, Account>,
    numbers: AccountSequence,
    rng: StdRng,
    clock: Box<dyn Clock>,
}

/// Public API
impl Bank {
    /// A bank on the system clock with an entropy-seeded card generator.
    pub fn new() -> Self {
        Self::with_parts(SystemClock::new(), StdRng::from_entropy())
    }

    /// A bank with an explicit clock and card-number generator.
    pub fn with_parts(clock: impl Clock + 'static, rng: StdRng) -> Self {
        Self {
            accounts: BTreeMap::new(),
            numbers: AccountSequence::new(),
            rng,
            clock: Box::new(clock),
        }
    }

    /// Run the bank over the given command stream
    pub async fn run(&mut self, mut stream: impl Stream<Item = Command> + Unpin) {
        while let Some(command) = stream.next().await {
            // a rejected command must not stop the run; the outcome is already logged
            let _ = self.apply(command);
        }
    }

    /// All accounts, in account number order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> + '_ {
        self.accounts.values()
    }

    pub fn get_account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.get(&number)
    }

    /// Apply a single command on top of the current bank state
    pub fn apply(&mut self, command: Command) -> Result<(), BankError> {
        match command {
            Command::OpenBasic { name, opening } => {
                self.open_basic(name, opening);
            }
            Command::OpenPremium {
                name,
                opening,
                overdraft_limit,
            } => {
                self.open_premium(name, opening, overdraft_limit);
            }
            Command::Deposit { account, amount } => {
                self.deposit(account, amount)?;
            }
            Command::Withdraw { account, amount } => {
                self.withdraw(account, amount)?;
            }
            Command::IssueCard { account } => {
                self.issue_card(account)?;
            }
            Command::SetOverdraftLimit { account, limit } => {
                self.set_overdraft_limit(account, limit)?;
            }
            Command::Close { account } => {
                self.close(account)?;
            }
        }
        Ok(())
    }

    /// Open a basic account. Never fails: an invalid opening balance is
    /// coerced to zero and logged.
    pub fn open_basic(&mut self, name: impl Into<String>, opening: f64) -> AccountNumber {
        let opened = Account::open_basic(&mut self.numbers, name, opening);
        self.insert(opened)
    }

    /// Open a premium account with the given initial overdraft limit.
    pub fn open_premium(
        &mut self,
        name: impl Into<String>,
        opening: f64,
        overdraft_limit: Amount,
    ) -> AccountNumber {
        let opened = Account::open_premium(&mut self.numbers, name, opening, overdraft_limit);
        self.insert(opened)
    }

    pub fn deposit(
        &mut self,
        account: AccountNumber,
        amount: Amount,
    ) -> Result<Balances, BankError> {
        let result = Self::account_mut(&mut self.accounts, account)
            .and_then(|a| a.deposit(amount).map_err(BankError::from));
        Self::log_result("deposit", account, Some(amount), &result);
        result
    }

    pub fn withdraw(
        &mut self,
        account: AccountNumber,
        amount: Amount,
    ) -> Result<Balances, BankError> {
        let result = Self::account_mut(&mut self.accounts, account)
            .and_then(|a| a.withdraw(amount).map_err(BankError::from));
        Self::log_result("withdrawal", account, Some(amount), &result);
        result
    }

    pub fn set_overdraft_limit(
        &mut self,
        account: AccountNumber,
        limit: Amount,
    ) -> Result<Balances, BankError> {
        let result = Self::account_mut(&mut self.accounts, account)
            .and_then(|a| a.set_overdraft_limit(limit).map_err(BankError::from));
        Self::log_result("overdraft change", account, Some(limit), &result);
        result
    }

    /// Issue a new card, dated by the bank's clock.
    pub fn issue_card(&mut self, account: AccountNumber) -> Result<Card, BankError> {
        let today = self.clock.today();
        let result = Self::account_mut(&mut self.accounts, account)
            .map(|holder| *holder.issue_card(&mut self.rng, today));
        match &result {
            Ok(card) => {
                info!(
                    account = account,
                    card = %card.number,
                    expiry = %card.expiry,
                    "card issue applied"
                );
            }
            Err(e) => {
                info!(
                    account = account,
                    reason = %e,
                    "card issue rejected"
                );
            }
        }
        result
    }

    /// Close an account. On success the returned balances are all zero
    /// except for any remaining overdraft.
    pub fn close(&mut self, account: AccountNumber) -> Result<Balances, BankError> {
        let result = Self::account_mut(&mut self.accounts, account)
            .and_then(|a| a.close().map_err(BankError::from));
        Self::log_result("closure", account, None, &result);
        result
    }
}

/// Private API
impl Bank {
    fn insert(&mut self, opened: Opened) -> AccountNumber {
        let account = opened.account;
        let number = account.number();
        info!(
            account = number,
            name = account.name(),
            kind = account.kind().label(),
            balance = %account.balance().pounds(),
            overdraft_limit = %account.overdraft_limit().pounds(),
            "account opened"
        );
        self.accounts.insert(number, account);
        number
    }

    /// Look up an account for mutation. Closed accounts are still handed out,
    /// with a warning.
    fn account_mut(
        accounts: &mut BTreeMap<AccountNumber, Account>,
        number: AccountNumber,
    ) -> Result<&mut Account, BankError> {
        let account = accounts
            .get_mut(&number)
            .ok_or(BankError::UnknownAccount(number))?;
        if account.is_closed() {
            warn!(account = number, "operating on a closed account");
        }
        Ok(account)
    }

    /// Small helper to log operation results
    fn log_result(
        operation: &str,
        account: AccountNumber,
        amount: Option<Amount>,
        result: &Result<Balances, BankError>,
    ) {
        match (result, amount) {
            (Ok(balances), Some(amt)) => {
                info!(
                    account = account,
                    amount = %amt.pounds(),
                    balance = %balances.balance.pounds(),
                    available = %balances.available.pounds(),
                    "{operation} applied"
                );
            }
            (Ok(balances), None) => {
                info!(
                    account = account,
                    balance = %balances.balance.pounds(),
                    available = %balances.available.pounds(),
                    "{operation} applied"
                );
            }
            (Err(e), Some(amt)) => {
                info!(
                    account = account,
                    amount = %amt.pounds(),
                    reason = %e,
                    "{operation} rejected"
                );
            }
            (Err(e), None) => {
                info!(
                    account = account,
                    reason = %e,
                    "{operation} rejected"
                );
            }
        }
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::new()
    }
}
