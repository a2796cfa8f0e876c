//! Core domain types shared by the bank and its drivers.

use crate::Amount;

/// Account number, unique within the [`AccountSequence`] that allocated it.
pub type AccountNumber = u32;

/// Hands out account numbers in increasing order, starting at 1.
///
/// Owned by whoever opens accounts and passed into construction, so two
/// independent banks never share numbering state.
#[derive(Debug, Clone)]
pub struct AccountSequence {
    next: AccountNumber,
}

impl AccountSequence {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate the next number. Each call consumes exactly one number.
    pub fn allocate(&mut self) -> AccountNumber {
        let number = self.next;
        self.next += 1;
        number
    }

    /// The number the next call to [`allocate`](Self::allocate) will return.
    pub fn peek(&self) -> AccountNumber {
        self.next
    }
}

impl Default for AccountSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// A command the bank can apply, as read from a script or the demo driver.
#[derive(Debug, Clone)]
pub enum Command {
    /// Open a basic account. `opening` is the raw opening balance; invalid
    /// values are coerced to zero.
    OpenBasic { name: String, opening: f64 },
    /// Open a premium account with an initial overdraft limit.
    OpenPremium {
        name: String,
        opening: f64,
        overdraft_limit: Amount,
    },
    /// Credit funds to an account.
    Deposit {
        account: AccountNumber,
        amount: Amount,
    },
    /// Debit funds from an account, using overdraft where available.
    Withdraw {
        account: AccountNumber,
        amount: Amount,
    },
    /// Issue (or re-issue) a payment card.
    IssueCard { account: AccountNumber },
    /// Replace the overdraft limit of a premium account.
    SetOverdraftLimit {
        account: AccountNumber,
        limit: Amount,
    },
    /// Withdraw the full balance and mark the account closed.
    Close { account: AccountNumber },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_starts_at_one_and_increments() {
        let mut seq = AccountSequence::new();
        assert_eq!(seq.peek(), 1);
        assert_eq!(seq.allocate(), 1);
        assert_eq!(seq.allocate(), 2);
        assert_eq!(seq.peek(), 3);
    }

    #[test]
    fn sequences_are_independent() {
        let mut a = AccountSequence::new();
        let mut b = AccountSequence::default();
        a.allocate();
        a.allocate();
        assert_eq!(b.allocate(), 1);
        assert_eq!(a.allocate(), 3);
    }
}
