pub mod dividend;
pub mod exchange;
pub mod stock;
pub mod stock_symbol;
pub mod trade;
