//! Global Beverage Corporation Exchange
//!
//! Records trades against a fixed set of stocks and computes per-stock
//! metrics (dividend yield, P/E ratio, windowed average price) and the
//! all-share index.

pub mod config;
pub mod domain;

pub use config::{ExchangeConfig, Listing, ListingClass};
pub use domain::entities::dividend::{CommonStock, DividendPolicy, PreferredStock, StockClass};
pub use domain::entities::exchange::Exchange;
pub use domain::entities::stock::{price_window, Stock, PRICE_WINDOW_MINUTES};
pub use domain::entities::stock_symbol::StockSymbol;
pub use domain::entities::trade::{Trade, TradeRecord, TrendSignal};
pub use domain::errors::{ExchangeError, ValidationError};
