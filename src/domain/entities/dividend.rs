//! Dividend policies for the two classes of stock listed on the exchange.

use serde::{Deserialize, Serialize};

/// Per-share dividend rule of a stock class
pub trait DividendPolicy {
    fn dividend(&self, par_value: f64) -> f64;
}

/// Common stock: pays whatever dividend was last declared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommonStock {
    /// Absolute per-share amount of the most recent dividend
    pub last_dividend: f64,
}

impl DividendPolicy for CommonStock {
    fn dividend(&self, _par_value: f64) -> f64 {
        self.last_dividend
    }
}

/// Preferred stock: pays a fixed ratio of par value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreferredStock {
    /// Fixed dividend as a ratio (0..=1) of par value
    pub fixed_dividend: f64,
    /// Recorded for reference; the preferred rule does not use it
    pub last_dividend: f64,
}

impl DividendPolicy for PreferredStock {
    fn dividend(&self, par_value: f64) -> f64 {
        self.fixed_dividend * par_value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StockClass {
    Common(CommonStock),
    Preferred(PreferredStock),
}

impl StockClass {
    pub fn last_dividend(&self) -> f64 {
        match self {
            StockClass::Common(common) => common.last_dividend,
            StockClass::Preferred(preferred) => preferred.last_dividend,
        }
    }

    pub fn set_last_dividend(&mut self, last_dividend: f64) {
        match self {
            StockClass::Common(common) => common.last_dividend = last_dividend,
            StockClass::Preferred(preferred) => preferred.last_dividend = last_dividend,
        }
    }
}

impl DividendPolicy for StockClass {
    fn dividend(&self, par_value: f64) -> f64 {
        match self {
            StockClass::Common(common) => common.dividend(par_value),
            StockClass::Preferred(preferred) => preferred.dividend(par_value),
        }
    }
}
