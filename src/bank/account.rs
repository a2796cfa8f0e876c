use std::fmt;

use chrono::NaiveDate;
use rand::Rng;
use tracing::warn;

use super::error::AccountError;
use crate::Amount;
use crate::card::{Card, CardExpiry};
use crate::model::{AccountNumber, AccountSequence};

/// Overdraft policy of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// No overdraft: withdrawals are limited to the balance.
    Basic,
    /// Withdrawals may take the balance below zero, down to minus the limit.
    /// Consumed overdraft permanently shrinks the limit.
    Premium { overdraft_limit: Amount },
}

impl AccountKind {
    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Basic => "basic",
            AccountKind::Premium { .. } => "premium",
        }
    }
}

/// Balances after a successful operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balances {
    pub balance: Amount,
    /// `balance` plus whatever overdraft remains.
    pub available: Amount,
    pub overdraft_limit: Amount,
}

/// A freshly opened account, with the notice raised if the opening balance
/// had to be coerced.
#[derive(Debug)]
pub struct Opened {
    pub account: Account,
    pub notice: Option<AccountError>,
}

/// A bank account. Basic and premium accounts share this record and differ
/// only in their [`AccountKind`].
#[derive(Debug, Clone)]
pub struct Account {
    number: AccountNumber,
    name: String,
    balance: Amount,
    kind: AccountKind,
    card: Option<Card>,
    closed: bool,
}

impl Account {
    /// Open a basic account, allocating its number from `numbers`.
    pub fn open_basic(
        numbers: &mut AccountSequence,
        name: impl Into<String>,
        opening: f64,
    ) -> Opened {
        Self::open(numbers, name.into(), opening, AccountKind::Basic)
    }

    /// Open a premium account. The overdraft limit is taken as given, negative
    /// values included.
    pub fn open_premium(
        numbers: &mut AccountSequence,
        name: impl Into<String>,
        opening: f64,
        overdraft_limit: Amount,
    ) -> Opened {
        let kind = AccountKind::Premium { overdraft_limit };
        Self::open(numbers, name.into(), opening, kind)
    }

    fn open(
        numbers: &mut AccountSequence,
        name: String,
        opening: f64,
        kind: AccountKind,
    ) -> Opened {
        // allocated before validation: a coerced opening still consumes a number
        let number = numbers.allocate();
        let (balance, notice) = match opening_balance(opening) {
            Ok(balance) => (balance, None),
            Err(e) => {
                warn!(account = number, name = %name, reason = %e, "opening balance coerced");
                (Amount::ZERO, Some(e))
            }
        };

        Opened {
            account: Self {
                number,
                name,
                balance,
                kind,
                card: None,
                closed: false,
            },
            notice,
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn card(&self) -> Option<&Card> {
        self.card.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn has_overdraft(&self) -> bool {
        matches!(self.kind, AccountKind::Premium { .. })
    }

    /// Remaining overdraft; always zero for basic accounts.
    pub fn overdraft_limit(&self) -> Amount {
        match self.kind {
            AccountKind::Basic => Amount::ZERO,
            AccountKind::Premium { overdraft_limit } => overdraft_limit,
        }
    }

    /// Raw balance, ignoring any overdraft.
    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Balance plus remaining overdraft, saturating at the bounds of
    /// [`Amount`].
    pub fn available_balance(&self) -> Amount {
        self.balance.saturating_add(self.overdraft_limit())
    }

    pub fn balances(&self) -> Balances {
        Balances {
            balance: self.balance,
            available: self.available_balance(),
            overdraft_limit: self.overdraft_limit(),
        }
    }

    /// Credit `amount`. Negative amounts are rejected.
    pub fn deposit(&mut self, amount: Amount) -> Result<Balances, AccountError> {
        if amount.is_negative() {
            return Err(AccountError::NegativeDepositRejected(amount));
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| self.out_of_range(amount))?;
        Ok(self.balances())
    }

    /// Debit `amount`, drawing on the overdraft for premium accounts.
    pub fn withdraw(&mut self, amount: Amount) -> Result<Balances, AccountError> {
        match self.kind {
            AccountKind::Basic => self.withdraw_funds(amount),
            AccountKind::Premium { overdraft_limit } => {
                self.withdraw_with_overdraft(amount, overdraft_limit)
            }
        }
    }

    /// Withdrawal limited to the balance, whatever the account kind.
    fn withdraw_funds(&mut self, amount: Amount) -> Result<Balances, AccountError> {
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                account: self.number,
                available: self.balance,
                requested: amount,
            });
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| self.out_of_range(amount))?;
        Ok(self.balances())
    }

    fn withdraw_with_overdraft(
        &mut self,
        amount: Amount,
        overdraft_limit: Amount,
    ) -> Result<Balances, AccountError> {
        let available = self.balance.saturating_add(overdraft_limit);
        if amount > available {
            return Err(AccountError::InsufficientFunds {
                account: self.number,
                available,
                requested: amount,
            });
        }

        let balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| self.out_of_range(amount))?;
        // the shortfall is taken off the limit and never given back
        if balance.is_negative() {
            let overdraft_limit = overdraft_limit
                .checked_add(balance)
                .ok_or_else(|| self.out_of_range(amount))?;
            self.kind = AccountKind::Premium { overdraft_limit };
        }
        self.balance = balance;
        Ok(self.balances())
    }

    /// Replace the overdraft limit. Only premium accounts have one.
    pub fn set_overdraft_limit(&mut self, limit: Amount) -> Result<Balances, AccountError> {
        match self.kind {
            AccountKind::Basic => Err(AccountError::OverdraftUnavailable(self.number)),
            AccountKind::Premium { .. } => {
                self.kind = AccountKind::Premium {
                    overdraft_limit: limit,
                };
                Ok(self.balances())
            }
        }
    }

    /// Issue a new card dated `today`, replacing any previous one.
    pub fn issue_card(&mut self, rng: &mut impl Rng, today: NaiveDate) -> &Card {
        self.card.insert(Card::issue(rng, today))
    }

    /// Withdraw the whole balance and mark the account closed.
    ///
    /// Premium accounts go through the plain withdrawal too; with a
    /// non-negative balance the overdraft never comes into play.
    pub fn close(&mut self) -> Result<Balances, AccountError> {
        if self.balance.is_negative() {
            return Err(AccountError::ClosureBlockedByNegativeBalance {
                account: self.number,
                balance: self.balance,
            });
        }
        let balances = self.withdraw_funds(self.balance)?;
        self.closed = true;
        Ok(balances)
    }

    fn out_of_range(&self, amount: Amount) -> AccountError {
        AccountError::AmountOutOfRange {
            account: self.number,
            amount,
        }
    }

    /// One-line balance statement for the holder.
    pub fn balance_summary(&self) -> BalanceSummary<'_> {
        BalanceSummary(self)
    }
}

/// Validate a raw opening balance.
fn opening_balance(raw: f64) -> Result<Amount, AccountError> {
    match Amount::try_from_float(raw) {
        Some(balance) if !balance.is_negative() => Ok(balance),
        _ => Err(AccountError::InvalidOpeningBalance(raw.to_string())),
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hi {} (account number: {})", self.name, self.number)?;
        match self.kind {
            AccountKind::Basic => writeln!(f, "  Your balance: {}", self.balance.pounds())?,
            AccountKind::Premium { overdraft_limit } => writeln!(
                f,
                "  Your balance: {} with an overdraft limit: {}",
                self.balance.pounds(),
                overdraft_limit.pounds()
            )?,
        }
        match &self.card {
            Some(card) => write!(
                f,
                "  Your card number: {} and expiry date: {}",
                card.number, card.expiry
            ),
            None => write!(
                f,
                "  Your card number: Not Present and expiry date: {}",
                CardExpiry::default()
            ),
        }
    }
}

pub struct BalanceSummary<'a>(&'a Account);

impl fmt::Display for BalanceSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let account = self.0;
        match account.kind {
            AccountKind::Basic => write!(
                f,
                "Your current balance is: {}. Basic account has no overdraft option",
                account.balance.pounds()
            ),
            AccountKind::Premium { overdraft_limit } => write!(
                f,
                "Current balance available is: {}. The overdraft remaining is {}",
                account.available_balance().pounds(),
                overdraft_limit.pounds()
            ),
        }
    }
}
