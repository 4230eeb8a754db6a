//! Stock entity: a symbol, its dividend policy and its trade ledger.
//!
//! All metrics are recomputed from the ledger on every call.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::domain::entities::dividend::{CommonStock, DividendPolicy, PreferredStock, StockClass};
use crate::domain::entities::stock_symbol::StockSymbol;
use crate::domain::entities::trade::Trade;
use crate::domain::errors::{ExchangeError, ValidationError};
use crate::domain::value_objects::price::Price;

/// Trailing window used by [`Stock::avg_price`], shared by every stock
pub const PRICE_WINDOW_MINUTES: i64 = 15;

pub fn price_window() -> Duration {
    Duration::minutes(PRICE_WINDOW_MINUTES)
}

#[derive(Debug)]
pub struct Stock {
    stock_symbol: StockSymbol,
    par_value: Price,
    class: StockClass,
    /// Append-only, in recording order
    trades: Mutex<Vec<Trade>>,
}

impl Stock {
    pub fn new(
        stock_symbol: StockSymbol,
        par_value: f64,
        class: StockClass,
    ) -> Result<Self, ExchangeError> {
        let par_value = Price::new(par_value).map_err(|e| {
            ExchangeError::ConfigurationError(format!("Par value of {}: {}", stock_symbol, e))
        })?;
        validate_last_dividend(stock_symbol, class.last_dividend())?;

        if let StockClass::Preferred(preferred) = &class {
            if !(0.0..=1.0).contains(&preferred.fixed_dividend) {
                return Err(ExchangeError::ConfigurationError(format!(
                    "Fixed dividend of {}: {}",
                    stock_symbol,
                    ValidationError::RatioOutOfRange(preferred.fixed_dividend)
                )));
            }
        }

        Ok(Stock {
            stock_symbol,
            par_value,
            class,
            trades: Mutex::new(Vec::new()),
        })
    }

    pub fn common(
        stock_symbol: StockSymbol,
        par_value: f64,
        last_dividend: f64,
    ) -> Result<Self, ExchangeError> {
        Self::new(
            stock_symbol,
            par_value,
            StockClass::Common(CommonStock { last_dividend }),
        )
    }

    pub fn preferred(
        stock_symbol: StockSymbol,
        par_value: f64,
        fixed_dividend: f64,
        last_dividend: f64,
    ) -> Result<Self, ExchangeError> {
        Self::new(
            stock_symbol,
            par_value,
            StockClass::Preferred(PreferredStock {
                fixed_dividend,
                last_dividend,
            }),
        )
    }

    pub fn stock_symbol(&self) -> StockSymbol {
        self.stock_symbol
    }

    pub fn par_value(&self) -> f64 {
        self.par_value.value()
    }

    pub fn set_last_dividend(&mut self, last_dividend: f64) -> Result<(), ExchangeError> {
        validate_last_dividend(self.stock_symbol, last_dividend)?;
        self.class.set_last_dividend(last_dividend);
        Ok(())
    }

    // Poisoning is recovered: a push never leaves the ledger partially written.
    fn ledger(&self) -> MutexGuard<'_, Vec<Trade>> {
        self.trades
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record_trade(&self, trade: Trade) -> Result<(), ExchangeError> {
        if trade.stock_symbol() != self.stock_symbol {
            return Err(ExchangeError::SymbolMismatch {
                expected: self.stock_symbol,
                actual: trade.stock_symbol(),
            });
        }

        debug!(
            symbol = %self.stock_symbol,
            quantity = trade.quantity(),
            price_per_share = trade.price_per_share(),
            signal = %trade.trend_signal(),
            "Recording trade"
        );
        self.ledger().push(trade);
        Ok(())
    }

    pub fn trade_count(&self) -> usize {
        self.ledger().len()
    }

    /// Copy of the ledger in recording order
    pub fn trades(&self) -> Vec<Trade> {
        self.ledger().clone()
    }

    pub fn dividend(&self) -> f64 {
        self.class.dividend(self.par_value.value())
    }

    /// Trade with the latest timestamp. Among trades sharing that timestamp
    /// the one recorded first wins.
    pub fn latest_trade(&self) -> Result<Trade, ExchangeError> {
        self.latest_trade_until(None)
            .ok_or(ExchangeError::NoTradesRecorded {
                symbol: self.stock_symbol,
            })
    }

    pub(crate) fn latest_trade_until(&self, until: Option<DateTime<Utc>>) -> Option<Trade> {
        let ledger = self.ledger();
        let mut latest: Option<&Trade> = None;
        for trade in ledger.iter() {
            if until.is_some_and(|limit| trade.timestamp() > limit) {
                continue;
            }
            match latest {
                Some(current) if current.timestamp() >= trade.timestamp() => {}
                _ => latest = Some(trade),
            }
        }
        latest.cloned()
    }

    /// Share price of the most recent trade
    pub fn price(&self) -> Result<f64, ExchangeError> {
        Ok(self.latest_trade()?.price_per_share())
    }

    pub fn dividend_yield(&self) -> Result<f64, ExchangeError> {
        let price = self.price()?;
        if price == 0.0 {
            return Err(ExchangeError::DivisionByZero {
                symbol: self.stock_symbol,
                operation: "dividend yield",
            });
        }
        Ok(self.dividend() / price)
    }

    /// `None` when the dividend is zero: the ratio is undefined.
    pub fn price_earnings_ratio(&self) -> Result<Option<f64>, ExchangeError> {
        let dividend = self.dividend();
        if dividend == 0.0 {
            return Ok(None);
        }
        Ok(Some(self.price()? / dividend))
    }

    /// Volume-weighted average price over the trailing window ending now.
    pub fn avg_price(&self) -> Result<Option<f64>, ExchangeError> {
        self.avg_price_at(Utc::now())
    }

    /// Volume-weighted average price of trades stamped at or after
    /// `current_time - PRICE_WINDOW_MINUTES`. `None` when no trade falls in
    /// the window.
    pub fn avg_price_at(&self, current_time: DateTime<Utc>) -> Result<Option<f64>, ExchangeError> {
        let window_start = current_time - price_window();
        let ledger = self.ledger();

        // u128 holds any number of in-window quantities, each at most 2^53.
        let (count, total_price, total_quantity) = ledger
            .iter()
            .filter(|trade| trade.timestamp() >= window_start)
            .fold((0usize, 0.0f64, 0u128), |(n, price, qty), trade| {
                (
                    n + 1,
                    price + trade.total_price(),
                    qty + u128::from(trade.quantity()),
                )
            });

        if count == 0 {
            debug!(symbol = %self.stock_symbol, %current_time, "No trades in price window");
            return Ok(None);
        }
        if total_quantity == 0 {
            return Err(ExchangeError::DivisionByZero {
                symbol: self.stock_symbol,
                operation: "average price",
            });
        }

        Ok(Some(total_price / total_quantity as f64))
    }
}

fn validate_last_dividend(symbol: StockSymbol, last_dividend: f64) -> Result<(), ExchangeError> {
    Price::new(last_dividend)
        .map(|_| ())
        .map_err(|e| ExchangeError::ConfigurationError(format!("Last dividend of {}: {}", symbol, e)))
}
