use serde::{Deserialize, Serialize};

use crate::domain::entities::stock_symbol::StockSymbol;

/// Dividend terms of a listing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListingClass {
    Common {
        last_dividend: f64,
    },
    Preferred {
        fixed_dividend: f64, // ratio of par value, e.g. 0.02 = 2%
        last_dividend: f64,
    },
}

/// One stock listed on the exchange at startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub symbol: StockSymbol,
    pub class: ListingClass,
    pub par_value: f64,
}

/// Configuration for the stocks listed on the exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    pub listings: Vec<Listing>,
}

impl Default for ExchangeConfig {
    /// Global Beverage Corporation Exchange sample data
    fn default() -> Self {
        ExchangeConfig {
            listings: vec![
                Listing {
                    symbol: StockSymbol::Tea,
                    class: ListingClass::Common { last_dividend: 0.0 },
                    par_value: 100.0,
                },
                Listing {
                    symbol: StockSymbol::Pop,
                    class: ListingClass::Common { last_dividend: 8.0 },
                    par_value: 100.0,
                },
                Listing {
                    symbol: StockSymbol::Ale,
                    class: ListingClass::Common { last_dividend: 23.0 },
                    par_value: 60.0,
                },
                Listing {
                    symbol: StockSymbol::Gin,
                    class: ListingClass::Preferred {
                        fixed_dividend: 0.02,
                        last_dividend: 8.0,
                    },
                    par_value: 100.0,
                },
                Listing {
                    symbol: StockSymbol::Joe,
                    class: ListingClass::Common { last_dividend: 13.0 },
                    par_value: 250.0,
                },
            ],
        }
    }
}

impl ExchangeConfig {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// Per listing, `GBCE_<SYMBOL>_PAR_VALUE`, `GBCE_<SYMBOL>_LAST_DIVIDEND`
    /// and, for preferred stock, `GBCE_<SYMBOL>_FIXED_DIVIDEND` override the
    /// defaults. Invalid values are logged and ignored.
    pub fn from_env() -> ExchangeConfig {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`, keyed like the environment.
    pub fn with_overrides<F>(mut self, lookup: F) -> ExchangeConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        for listing in &mut self.listings {
            let symbol = listing.symbol;

            if let Some(value) = read_amount(&lookup, symbol, "PAR_VALUE", |v| v >= 0.0) {
                listing.par_value = value;
            }

            match &mut listing.class {
                ListingClass::Common { last_dividend } => {
                    if let Some(value) = read_amount(&lookup, symbol, "LAST_DIVIDEND", |v| v >= 0.0) {
                        *last_dividend = value;
                    }
                }
                ListingClass::Preferred {
                    fixed_dividend,
                    last_dividend,
                } => {
                    if let Some(value) = read_amount(&lookup, symbol, "LAST_DIVIDEND", |v| v >= 0.0) {
                        *last_dividend = value;
                    }
                    if let Some(value) =
                        read_amount(&lookup, symbol, "FIXED_DIVIDEND", |v| (0.0..=1.0).contains(&v))
                    {
                        *fixed_dividend = value;
                    }
                }
            }
        }

        self
    }

    pub fn listing(&self, symbol: StockSymbol) -> Option<&Listing> {
        self.listings.iter().find(|l| l.symbol == symbol)
    }
}

fn env_key(symbol: StockSymbol, field: &str) -> String {
    format!("GBCE_{}_{}", symbol, field)
}

fn read_amount<F, V>(lookup: &F, symbol: StockSymbol, field: &str, valid: V) -> Option<f64>
where
    F: Fn(&str) -> Option<String>,
    V: Fn(f64) -> bool,
{
    let key = env_key(symbol, field);
    let raw = lookup(&key)?;

    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && valid(value) => Some(value),
        Ok(value) => {
            tracing::warn!("Invalid {} value: {}, using default", key, value);
            None
        }
        Err(e) => {
            tracing::warn!("Failed to parse {} '{}': {}, using default", key, raw, e);
            None
        }
    }
}
