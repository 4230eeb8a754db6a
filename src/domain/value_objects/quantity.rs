use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

/// Whole number of shares changing hands in a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct Quantity(u64);

impl Quantity {
    /// Largest count that converts to `f64` without loss (2^53)
    pub const MAX: u64 = 1 << 53;

    /// Accepts a signed count so that negative input is reported rather than
    /// rejected by the type system at the call site.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        let count =
            u64::try_from(value).map_err(|_| ValidationError::NegativeQuantity(value))?;
        if count > Self::MAX {
            return Err(ValidationError::QuantityTooLarge {
                value,
                max: Self::MAX,
            });
        }
        Ok(Quantity(count))
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Exact, since the count never exceeds [`Quantity::MAX`]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }
}

impl TryFrom<i64> for Quantity {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Quantity::new(value)
    }
}

impl From<Quantity> for u64 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}
