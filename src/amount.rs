use std::fmt;

/// Fixed-point money amount with 2 decimal places, stored as hundredths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Amount(i64);

impl Amount {
    const SCALE: i64 = 100;

    pub const ZERO: Amount = Amount(0);

    /// Convert from a float, rounding to the nearest hundredth.
    ///
    /// Returns `None` for NaN, infinities and values whose scaled form does
    /// not fit in an `i64`.
    pub fn try_from_float(value: f64) -> Option<Self> {
        let scaled = (value * Self::SCALE as f64).round();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range
        if scaled.is_finite() && scaled.abs() < i64::MAX as f64 {
            Some(Amount(scaled as i64))
        } else {
            None
        }
    }

    pub fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    /// Whole pounds, for tests and fixtures.
    pub fn from_pounds(value: i64) -> Self {
        Amount(value * Self::SCALE)
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// `None` on overflow.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// `None` on overflow.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    pub fn saturating_add(self, rhs: Self) -> Self {
        Amount(self.0.saturating_add(rhs.0))
    }

    /// Display adapter that prefixes the pound sign.
    pub fn pounds(self) -> Pounds {
        Pounds(self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = Self::SCALE as u64;
        let whole = abs / scale;
        let frac = abs % scale;
        write!(f, "{sign}{whole}.{frac:02}")
    }
}

/// An [`Amount`] rendered as sterling, e.g. `£1200.00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pounds(Amount);

impl fmt::Display for Pounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "£{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_from_float_converts_correctly() {
        assert_eq!(Amount::try_from_float(100.0), Some(Amount::from_scaled(10_000)));
        assert_eq!(Amount::try_from_float(1.5), Some(Amount::from_scaled(150)));
        assert_eq!(Amount::try_from_float(0.01), Some(Amount::from_scaled(1)));
    }

    #[test]
    fn try_from_float_rounds_correctly() {
        assert_eq!(Amount::try_from_float(1.236), Some(Amount::from_scaled(124)));
        assert_eq!(Amount::try_from_float(1.234), Some(Amount::from_scaled(123)));
    }

    #[test]
    fn try_from_float_handles_negative() {
        assert_eq!(Amount::try_from_float(-50.25), Some(Amount::from_scaled(-5_025)));
    }

    #[test]
    fn try_from_float_rejects_unrepresentable_values() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e300, -1e300, 1e17] {
            assert_eq!(Amount::try_from_float(value), None, "{value}");
        }
        assert!(Amount::try_from_float(1e15).is_some());
    }

    #[test]
    fn from_pounds_scales() {
        assert_eq!(Some(Amount::from_pounds(1200)), Amount::try_from_float(1200.0));
    }

    #[test]
    fn display_formats_two_decimals() {
        assert_eq!(Amount::from_scaled(120_000).to_string(), "1200.00");
        assert_eq!(Amount::from_scaled(150).to_string(), "1.50");
        assert_eq!(Amount::from_scaled(1).to_string(), "0.01");
        assert_eq!(Amount::ZERO.to_string(), "0.00");
    }

    #[test]
    fn display_formats_negative() {
        assert_eq!(Amount::from_scaled(-10_000).to_string(), "-100.00");
        assert_eq!(Amount::from_scaled(-1).to_string(), "-0.01");
    }

    #[test]
    fn display_handles_extremes() {
        assert_eq!(
            Amount::from_scaled(i64::MIN).to_string(),
            "-92233720368547758.08"
        );
        assert_eq!(
            Amount::from_scaled(i64::MAX).to_string(),
            "92233720368547758.07"
        );
    }

    #[test]
    fn pounds_prefixes_symbol() {
        assert_eq!(Amount::from_pounds(350).pounds().to_string(), "£350.00");
        assert_eq!(Amount::from_pounds(-100).pounds().to_string(), "£-100.00");
    }

    #[test]
    fn checked_arithmetic() {
        let a = Amount::from_pounds(100);
        assert_eq!(a.checked_add(Amount::from_pounds(50)), Some(Amount::from_pounds(150)));
        assert_eq!(a.checked_sub(Amount::from_pounds(150)), Some(Amount::from_pounds(-50)));
        assert!(Amount::from_pounds(-50).is_negative());
    }

    #[test]
    fn checked_arithmetic_detects_overflow() {
        let max = Amount::from_scaled(i64::MAX);
        let min = Amount::from_scaled(i64::MIN);
        assert_eq!(max.checked_add(Amount::from_scaled(1)), None);
        assert_eq!(min.checked_sub(Amount::from_scaled(1)), None);
        assert_eq!(max.saturating_add(max), max);
    }

    #[test]
    fn negative_ordering() {
        let negative = Amount::from_scaled(-100);
        let zero = Amount::ZERO;
        let positive = Amount::from_scaled(100);
        assert!(negative < zero);
        assert!(zero < positive);
    }
}
