//! Type-safe price representation using decimal arithmetic.
//!
//! The shop sells in bolivianos only, so a [`Price`] is just a non-negative
//! [`Decimal`] amount. On the wire it is a plain JSON number (`"precio": 150`).

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Display prefix for bolivianos.
pub const CURRENCY_SYMBOL: &str = "Bs";

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative unit price or total, in bolivianos.
///
/// ```
/// use rust_decimal::Decimal;
/// use tienda_core::Price;
///
/// let price = Price::new(Decimal::new(180, 0)).unwrap();
/// assert_eq!(price.times(2).to_string(), "Bs 360");
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero bolivianos.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of bolivianos.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// This price multiplied by a quantity.
    ///
    /// Saturates at the largest representable amount instead of overflowing.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY_SYMBOL} {}", self.0.normalize())
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturating, like [`Price::times`].
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        self.times(rhs)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Accepts numbers and numeric strings alike.
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_normalizes_trailing_zeros() {
        assert_eq!(Price::from_units(150).to_string(), "Bs 150");
        assert_eq!(
            Price::new(Decimal::new(1250, 2)).unwrap().to_string(),
            "Bs 12.5"
        );
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            Price::new(Decimal::new(-5, 0)),
            Err(PriceError::Negative(_))
        ));
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_deserialize_from_json_number() {
        let price: Price = serde_json::from_str("180").unwrap();
        assert_eq!(price, Price::from_units(180));

        let price: Price = serde_json::from_str("99.9").unwrap();
        assert_eq!(price.amount(), Decimal::new(999, 1));
    }

    #[test]
    fn test_deserialize_precio_number_or_string() {
        #[derive(Deserialize)]
        struct Row {
            precio: Price,
        }

        let number: Row = serde_json::from_str(r#"{"precio": 150}"#).unwrap();
        let string: Row = serde_json::from_str(r#"{"precio": "150"}"#).unwrap();
        assert_eq!(number.precio, Price::from_units(150));
        assert_eq!(string.precio, Price::from_units(150));
    }

    #[test]
    fn test_arithmetic_saturates_near_max() {
        let huge: Price = serde_json::from_str(r#""50000000000000000000000000000""#).unwrap();

        assert_eq!(huge.times(2).amount(), Decimal::MAX);
        assert_eq!((huge + huge).amount(), Decimal::MAX);
        let total: Price = [huge, huge, Price::from_units(1)].into_iter().sum();
        assert_eq!(total.amount(), Decimal::MAX);
    }

    #[test]
    fn test_deserialize_negative_fails() {
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_value(Price::from_units(150)).unwrap();
        assert_eq!(json, serde_json::json!(150.0));
    }

    #[test]
    fn test_sum_and_multiply() {
        let total: Price = [Price::from_units(150) * 2, Price::from_units(180)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_units(480));
    }
}
