//! Error types for account operations.

use thiserror::Error;

use crate::Amount;
use crate::model::AccountNumber;

/// Top-level error returned by [`Bank`](super::Bank) operations.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("account {0} not found")]
    UnknownAccount(AccountNumber),

    #[error(transparent)]
    Account(#[from] AccountError),
}

/// Why an account operation was rejected (or, for the opening balance,
/// coerced). State is left unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("opening balance {0} is not a valid non-negative number, set to zero")]
    InvalidOpeningBalance(String),

    #[error("negative deposit of {} is unacceptable", .0.pounds())]
    NegativeDepositRejected(Amount),

    #[error("can not withdraw {} from account {account}: {} available", .requested.pounds(), .available.pounds())]
    InsufficientFunds {
        account: AccountNumber,
        available: Amount,
        requested: Amount,
    },

    #[error("can not close account {account}: overdrawn by {}", .balance.pounds())]
    ClosureBlockedByNegativeBalance {
        account: AccountNumber,
        balance: Amount,
    },

    #[error("account {0} has no overdraft facility")]
    OverdraftUnavailable(AccountNumber),

    #[error("{} would take account {account} out of the representable range", .amount.pounds())]
    AmountOutOfRange {
        account: AccountNumber,
        amount: Amount,
    },
}
