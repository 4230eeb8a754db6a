use thiserror::Error;

use crate::domain::entities::stock_symbol::StockSymbol;

/// Errors raised by the value objects when a raw field is rejected
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("The quantity of shares cannot be less than zero: {0}")]
    NegativeQuantity(i64),

    #[error("The quantity of shares cannot exceed {max}: {value}")]
    QuantityTooLarge { value: i64, max: u64 },

    #[error("The price of shares cannot be less than zero: {0}")]
    NegativePrice(f64),

    #[error("Value must be finite: {0}")]
    NotFinite(f64),

    #[error("Ratio must be between 0 and 1: {0}")]
    RatioOutOfRange(f64),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExchangeError {
    #[error("Invalid trade: {0}")]
    InvalidTrade(#[from] ValidationError),

    #[error("Trade for {actual} does not belong to stock {expected}")]
    SymbolMismatch {
        expected: StockSymbol,
        actual: StockSymbol,
    },

    #[error("Given payload is not a trade: {0}")]
    TypeMismatch(String),

    #[error("No trades recorded for {symbol}")]
    NoTradesRecorded { symbol: StockSymbol },

    #[error("Division by zero computing {operation} for {symbol}")]
    DivisionByZero {
        symbol: StockSymbol,
        operation: &'static str,
    },

    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),

    #[error("Stock {0} is not traded on this exchange")]
    UnknownSymbol(StockSymbol),
}
