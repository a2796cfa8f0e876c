//! Payment cards.
//!
//! Card numbers are 16 independently drawn digits: no Luhn checksum and no
//! uniqueness across accounts. The random source is not meant to be
//! cryptographically secure.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use rand::Rng;

/// Years a newly issued card stays valid.
const VALIDITY_YEARS: i32 = 3;

/// A 16-digit card number. Displays in 4-4-4-4 groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardNumber([u8; 16]);

impl CardNumber {
    /// Draw 16 uniform digits from `rng`.
    pub fn random(rng: &mut impl Rng) -> Self {
        let mut digits = [0u8; 16];
        for digit in &mut digits {
            *digit = rng.gen_range(0..10);
        }
        CardNumber(digits)
    }

    /// The number as an ungrouped digit string.
    pub fn digits(&self) -> String {
        self.0.iter().map(|d| char::from(b'0' + d)).collect()
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.digits();
        for (i, group) in digits.as_bytes().chunks(4).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            // digits are ASCII
            f.write_str(std::str::from_utf8(group).map_err(|_| fmt::Error)?)?;
        }
        Ok(())
    }
}

/// Card expiry as month and two-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardExpiry {
    pub month: u8,
    pub year: u8,
}

impl CardExpiry {
    /// Expiry of a card issued on `issued`: same month, three years on.
    pub fn from_issue_date(issued: NaiveDate) -> Self {
        Self {
            month: issued.month() as u8,
            year: (issued.year() + VALIDITY_YEARS).rem_euclid(100) as u8,
        }
    }
}

impl fmt::Display for CardExpiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub number: CardNumber,
    pub expiry: CardExpiry,
}

impl Card {
    pub fn issue(rng: &mut impl Rng, today: NaiveDate) -> Self {
        Self {
            number: CardNumber::random(rng),
            expiry: CardExpiry::from_issue_date(today),
        }
    }
}
