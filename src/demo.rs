//! Built-in demonstration run, used when the binary is started without a
//! script.

use crate::{Amount, Command};

/// Four accounts and a handful of operations against them:
///
/// 1. Thankappan, basic, opened with -100 (coerced to zero)
/// 2. Sasi, premium, 1000 with a 200 overdraft
/// 3. Soman, basic, 350
/// 4. Pushpan, premium, 100 with a 300 overdraft
pub fn script() -> Vec<Command> {
    vec![
        Command::OpenBasic {
            name: "Thankappan".to_string(),
            opening: -100.0,
        },
        Command::OpenPremium {
            name: "Sasi".to_string(),
            opening: 1000.0,
            overdraft_limit: Amount::from_pounds(200),
        },
        Command::OpenBasic {
            name: "Soman".to_string(),
            opening: 350.0,
        },
        Command::OpenPremium {
            name: "Pushpan".to_string(),
            opening: 100.0,
            overdraft_limit: Amount::from_pounds(300),
        },
        Command::Deposit {
            account: 1,
            amount: Amount::from_pounds(-10),
        },
        Command::IssueCard { account: 2 },
        Command::Withdraw {
            account: 2,
            amount: Amount::from_pounds(1100),
        },
        Command::Close { account: 2 },
        Command::Withdraw {
            account: 3,
            amount: Amount::from_pounds(360),
        },
        Command::Close { account: 4 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::Bank;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn run_demo() -> Bank {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let mut bank = Bank::with_parts(FixedClock(today), StdRng::seed_from_u64(0));
        for command in script() {
            let _ = bank.apply(command);
        }
        bank
    }

    #[test]
    fn demo_leaves_expected_state() {
        let bank = run_demo();
        assert_eq!(bank.accounts().count(), 4);

        let thankappan = bank.get_account(1).unwrap();
        assert_eq!(thankappan.balance(), Amount::ZERO);

        let sasi = bank.get_account(2).unwrap();
        assert_eq!(sasi.balance(), Amount::from_pounds(-100));
        assert_eq!(sasi.overdraft_limit(), Amount::from_pounds(100));
        assert!(sasi.card().is_some());
        assert!(!sasi.is_closed());

        let soman = bank.get_account(3).unwrap();
        assert_eq!(soman.balance(), Amount::from_pounds(350));

        let pushpan = bank.get_account(4).unwrap();
        assert_eq!(pushpan.balance(), Amount::ZERO);
        assert!(pushpan.is_closed());
    }
}
