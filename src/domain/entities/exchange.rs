use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::config::{ExchangeConfig, ListingClass};
use crate::domain::entities::dividend::{CommonStock, PreferredStock, StockClass};
use crate::domain::entities::stock::Stock;
use crate::domain::entities::stock_symbol::StockSymbol;
use crate::domain::entities::trade::Trade;
use crate::domain::errors::ExchangeError;

/// Where trades for the listed stocks are recorded
#[derive(Debug)]
pub struct Exchange {
    stocks: Vec<Stock>,
}

impl Exchange {
    /// Fails with [`ExchangeError::ConfigurationError`] if `stocks` is empty
    /// or lists the same symbol twice.
    pub fn new(stocks: Vec<Stock>) -> Result<Self, ExchangeError> {
        if stocks.is_empty() {
            return Err(ExchangeError::ConfigurationError(
                "Stocks traded should be a non empty sequence".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for stock in &stocks {
            if !seen.insert(stock.stock_symbol()) {
                return Err(ExchangeError::ConfigurationError(format!(
                    "Stock {} is listed more than once",
                    stock.stock_symbol()
                )));
            }
        }

        info!(stock_count = stocks.len(), "Exchange opened");
        Ok(Exchange { stocks })
    }

    pub fn from_config(config: &ExchangeConfig) -> Result<Self, ExchangeError> {
        let stocks = config
            .listings
            .iter()
            .map(|listing| {
                let class = match listing.class {
                    ListingClass::Common { last_dividend } => {
                        StockClass::Common(CommonStock { last_dividend })
                    }
                    ListingClass::Preferred {
                        fixed_dividend,
                        last_dividend,
                    } => StockClass::Preferred(PreferredStock {
                        fixed_dividend,
                        last_dividend,
                    }),
                };
                Stock::new(listing.symbol, listing.par_value, class)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(stocks)
    }

    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn stock(&self, symbol: StockSymbol) -> Option<&Stock> {
        self.stocks.iter().find(|s| s.stock_symbol() == symbol)
    }

    pub fn stock_mut(&mut self, symbol: StockSymbol) -> Option<&mut Stock> {
        self.stocks.iter_mut().find(|s| s.stock_symbol() == symbol)
    }

    pub fn record_trade(&self, trade: Trade) -> Result<(), ExchangeError> {
        let symbol = trade.stock_symbol();
        self.stock(symbol)
            .ok_or(ExchangeError::UnknownSymbol(symbol))?
            .record_trade(trade)
    }

    /// Decodes a JSON trade and records it. See [`Trade::from_json`].
    pub fn record_trade_json(&self, raw: &str) -> Result<(), ExchangeError> {
        self.record_trade(Trade::from_json(raw)?)
    }

    pub fn all_share_index(&self) -> Result<Option<f64>, ExchangeError> {
        self.all_share_index_at(Utc::now())
    }

    /// Geometric mean, across stocks, of the total price of each stock's most
    /// recent trade stamped at or before `current_time`.
    ///
    /// Stocks with no such trade do not take part. `None` when no stock has one.
    pub fn all_share_index_at(
        &self,
        current_time: DateTime<Utc>,
    ) -> Result<Option<f64>, ExchangeError> {
        let totals: Vec<f64> = self
            .stocks
            .iter()
            .filter_map(|stock| stock.latest_trade_until(Some(current_time)))
            .map(|trade| trade.total_price())
            .collect();

        if totals.is_empty() {
            debug!(%current_time, "No trades available for all share index");
            return Ok(None);
        }

        // Summing logarithms keeps the product of many totals from overflowing.
        let log_mean = totals.iter().map(|total| total.ln()).sum::<f64>() / totals.len() as f64;
        Ok(Some(log_mean.exp()))
    }
}
