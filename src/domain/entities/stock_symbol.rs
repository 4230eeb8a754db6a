use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::ExchangeError;

/// Identifier of one of the stocks listed on the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StockSymbol {
    Tea,
    Pop,
    Ale,
    Gin,
    Joe,
}

impl StockSymbol {
    pub const ALL: [StockSymbol; 5] = [
        StockSymbol::Tea,
        StockSymbol::Pop,
        StockSymbol::Ale,
        StockSymbol::Gin,
        StockSymbol::Joe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StockSymbol::Tea => "TEA",
            StockSymbol::Pop => "POP",
            StockSymbol::Ale => "ALE",
            StockSymbol::Gin => "GIN",
            StockSymbol::Joe => "JOE",
        }
    }
}

impl fmt::Display for StockSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockSymbol {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        StockSymbol::ALL
            .into_iter()
            .find(|symbol| symbol.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ExchangeError::ConfigurationError(format!("Unknown stock symbol: {}", s)))
    }
}
