pub mod amount;
pub mod bank;
pub mod card;
pub mod clock;
pub mod csv;
pub mod demo;
pub mod model;

pub use amount::Amount;
pub use bank::{Account, AccountError, AccountKind, Bank, BankError, Balances};
pub use model::{AccountNumber, AccountSequence, Command};
