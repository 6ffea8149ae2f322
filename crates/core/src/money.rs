//! Money value object.
//!
//! Amounts are exact decimals, not floats. Catalog prices arrive as decimal
//! spreadsheet cells and every document prints two fractional digits, so the
//! canonical display form is `10.00`.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A monetary amount (currency-less; the business operates in one currency).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Sum two amounts; overflow is an invariant violation, not a wrap.
    pub fn checked_add(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::invariant("money addition overflow"))
    }

    /// Multiply a unit amount by a quantity (the line-total operation).
    pub fn times(self, quantity: u32) -> DomainResult<Money> {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map(Money)
            .ok_or_else(|| DomainError::invariant("money multiplication overflow"))
    }
}

impl ValueObject for Money {}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Parse a decimal amount from free text.
    ///
    /// Non-numeric input is a [`DomainError::DataFormat`], never coerced to
    /// zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Decimal::from_str(trimmed)
            .map(Money)
            .map_err(|_| DomainError::data_format(format!("not a numeric amount: {trimmed:?}")))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let rounded = self.0.round_dp(2);
        write!(f, "{rounded:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn displays_two_fractional_digits() {
        assert_eq!(Money::new(dec!(10)).to_string(), "10.00");
        assert_eq!(Money::new(dec!(7.5)).to_string(), "7.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn parses_decimal_text() {
        let m: Money = "  12.30 ".parse().unwrap();
        assert_eq!(m, Money::new(dec!(12.30)));
    }

    #[test]
    fn rejects_non_numeric_text() {
        let err = "abc".parse::<Money>().unwrap_err();
        match err {
            DomainError::DataFormat(msg) => assert!(msg.contains("abc")),
            other => panic!("expected DataFormat, got {other:?}"),
        }
    }

    #[test]
    fn times_is_quantity_scaling() {
        let m = Money::new(dec!(10.00)).times(3).unwrap();
        assert_eq!(m, Money::new(dec!(30.00)));
    }

    #[test]
    fn adds_exactly() {
        let sum = Money::new(dec!(0.10))
            .checked_add(Money::new(dec!(0.20)))
            .unwrap();
        assert_eq!(sum, Money::new(dec!(0.30)));
    }
}
