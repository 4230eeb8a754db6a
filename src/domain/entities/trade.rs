use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::stock_symbol::StockSymbol;
use crate::domain::errors::ExchangeError;
use crate::domain::value_objects::{price::Price, quantity::Quantity};

/// Buy/sell indicator carried by a trade. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendSignal {
    Buy,
    Sell,
}

impl std::fmt::Display for TrendSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendSignal::Buy => write!(f, "BUY"),
            TrendSignal::Sell => write!(f, "SELL"),
        }
    }
}

/// Unvalidated trade as it arrives on the wire
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradeRecord {
    pub stock_symbol: StockSymbol,
    pub timestamp: DateTime<Utc>,
    pub quantity: i64,
    pub price_per_share: f64,
    pub trend_signal: TrendSignal,
}

/// Transfer of shares of one stock at a given moment.
///
/// Fields are validated once in [`Trade::new`] and are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TradeRecord")]
pub struct Trade {
    stock_symbol: StockSymbol,
    timestamp: DateTime<Utc>,
    quantity: Quantity,
    price_per_share: Price,
    trend_signal: TrendSignal,
}

impl Trade {
    pub fn new(
        stock_symbol: StockSymbol,
        timestamp: DateTime<Utc>,
        quantity: i64,
        price_per_share: f64,
        trend_signal: TrendSignal,
    ) -> Result<Self, ExchangeError> {
        let quantity = Quantity::new(quantity)?;
        let price_per_share = Price::new(price_per_share)?;

        Ok(Trade {
            stock_symbol,
            timestamp,
            quantity,
            price_per_share,
            trend_signal,
        })
    }

    /// Decodes and validates a trade from a JSON payload.
    ///
    /// A payload that does not have the shape of a trade fails with
    /// [`ExchangeError::TypeMismatch`]; a well-formed trade with an out-of-range
    /// quantity or price fails with [`ExchangeError::InvalidTrade`].
    pub fn from_json(raw: &str) -> Result<Self, ExchangeError> {
        let record: TradeRecord =
            serde_json::from_str(raw).map_err(|e| ExchangeError::TypeMismatch(e.to_string()))?;
        Trade::try_from(record)
    }

    pub fn stock_symbol(&self) -> StockSymbol {
        self.stock_symbol
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn quantity(&self) -> u64 {
        self.quantity.value()
    }

    pub fn price_per_share(&self) -> f64 {
        self.price_per_share.value()
    }

    pub fn trend_signal(&self) -> TrendSignal {
        self.trend_signal
    }

    pub fn total_price(&self) -> f64 {
        self.quantity.as_f64() * self.price_per_share.value()
    }
}

impl TryFrom<TradeRecord> for Trade {
    type Error = ExchangeError;

    fn try_from(record: TradeRecord) -> Result<Self, Self::Error> {
        Trade::new(
            record.stock_symbol,
            record.timestamp,
            record.quantity,
            record.price_per_share,
            record.trend_signal,
        )
    }
}
