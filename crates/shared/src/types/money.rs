//! Positive monetary amount with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Amount must be strictly positive, got {0}")]
pub struct AmountError(pub Decimal);

/// A strictly positive amount in the single ledger currency.
///
/// Construction and deserialization both reject zero and negative values, so
/// any `Amount` reaching the ledger is already valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Creates a new amount, rejecting values `<= 0`.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(AmountError(value))
        }
    }

    /// Returns the underlying decimal value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_new() {
        let amount = Amount::new(dec!(100.00)).unwrap();
        assert_eq!(amount.value(), dec!(100.00));
        assert_eq!(Decimal::from(amount), dec!(100.00));
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-0.01))]
    #[case(dec!(-250))]
    fn test_amount_rejects_non_positive(#[case] value: Decimal) {
        assert_eq!(Amount::new(value), Err(AmountError(value)));
    }

    #[test]
    fn test_amount_deserialize_validates() {
        let ok: Amount = serde_json::from_str("\"12.50\"").unwrap();
        assert_eq!(ok.value(), dec!(12.50));

        let err = serde_json::from_str::<Amount>("\"-1\"").unwrap_err();
        assert!(err.to_string().contains("strictly positive"));
    }

    #[test]
    fn test_amount_display() {
        assert_eq!(Amount::new(dec!(7.25)).unwrap().to_string(), "7.25");
    }
}
