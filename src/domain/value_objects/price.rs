use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

/// Monetary amount per share. Finite and never negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite(value));
        }
        if value >= 0.0 {
            Ok(Price(value))
        } else {
            Err(ValidationError::NegativePrice(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Price {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Price::new(value)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_new_valid() {
        let price = Price::new(100.0);
        assert!(price.is_ok());
        assert_eq!(price.unwrap().value(), 100.0);
    }

    #[test]
    fn test_price_new_negative() {
        let price = Price::new(-0.01);
        assert_eq!(price.unwrap_err(), ValidationError::NegativePrice(-0.01));
    }

    #[test]
    fn test_price_new_zero() {
        let price = Price::new(0.0).unwrap();
        assert_eq!(price.value(), 0.0);
    }

    #[test]
    fn test_price_new_nan() {
        assert!(matches!(
            Price::new(f64::NAN),
            Err(ValidationError::NotFinite(_))
        ));
        assert!(matches!(
            Price::new(f64::INFINITY),
            Err(ValidationError::NotFinite(_))
        ));
    }

    #[test]
    fn test_price_deserialize_rejects_negative() {
        let ok: Price = serde_json::from_str("12.5").unwrap();
        assert_eq!(ok.value(), 12.5);
        assert!(serde_json::from_str::<Price>("-3.0").is_err());
    }
}
