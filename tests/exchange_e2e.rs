use chrono::{DateTime, Duration, TimeZone, Utc};
use gbce::{Exchange, ExchangeConfig, ExchangeError, StockSymbol, Trade, TrendSignal};
use std::sync::Arc;
use std::thread;

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, hour, min, 0).unwrap()
}

fn trade(symbol: StockSymbol, ts: DateTime<Utc>, quantity: i64, price: f64) -> Trade {
    Trade::new(symbol, ts, quantity, price, TrendSignal::Buy).unwrap()
}

fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

#[test]
fn test_end_to_end_sample_exchange() {
    let exchange = Exchange::from_config(&ExchangeConfig::default()).unwrap();
    assert_eq!(exchange.stocks().len(), 5);

    let now = at(12, 0);
    exchange.record_trade(trade(StockSymbol::Tea, at(11, 50), 100, 1.2)).unwrap();
    exchange.record_trade(trade(StockSymbol::Pop, at(11, 55), 10, 50.0)).unwrap();
    exchange.record_trade(trade(StockSymbol::Pop, at(11, 58), 30, 54.0)).unwrap();
    exchange.record_trade(trade(StockSymbol::Gin, at(11, 40), 20, 10.0)).unwrap();

    // POP: dividend 8, price 54
    let pop = exchange.stock(StockSymbol::Pop).unwrap();
    assert!(approx(pop.dividend_yield().unwrap(), 8.0 / 54.0));
    assert!(approx(pop.price_earnings_ratio().unwrap().unwrap(), 54.0 / 8.0));
    // (500 + 1620) / 40
    assert!(approx(pop.avg_price_at(now).unwrap().unwrap(), 53.0));

    // TEA pays no dividend
    let tea = exchange.stock(StockSymbol::Tea).unwrap();
    assert_eq!(tea.dividend_yield().unwrap(), 0.0);
    assert_eq!(tea.price_earnings_ratio().unwrap(), None);

    // GIN is preferred: 2% of 100
    let gin = exchange.stock(StockSymbol::Gin).unwrap();
    assert!(approx(gin.dividend(), 2.0));
    assert!(approx(gin.dividend_yield().unwrap(), 0.2));
    assert_eq!(gin.avg_price_at(now).unwrap(), None);

    // ALE and JOE have no trades
    let ale = exchange.stock(StockSymbol::Ale).unwrap();
    assert_eq!(
        ale.price().unwrap_err(),
        ExchangeError::NoTradesRecorded {
            symbol: StockSymbol::Ale
        }
    );

    // Latest totals: TEA 120, POP 1620, GIN 200
    let expected = (120.0f64 * 1620.0 * 200.0).powf(1.0 / 3.0);
    let index = exchange.all_share_index_at(now).unwrap().unwrap();
    assert!((index - expected).abs() < 1e-6, "index {}", index);
}

#[test]
fn test_unknown_symbol_rejected_by_partial_exchange() {
    let mut config = ExchangeConfig::default();
    config.listings.retain(|l| l.symbol != StockSymbol::Joe);
    let exchange = Exchange::from_config(&config).unwrap();

    let err = exchange
        .record_trade(trade(StockSymbol::Joe, at(10, 0), 1, 1.0))
        .unwrap_err();
    assert_eq!(err, ExchangeError::UnknownSymbol(StockSymbol::Joe));
}

#[test]
fn test_empty_config_rejected() {
    let config = ExchangeConfig {
        listings: Vec::new(),
    };
    assert!(matches!(
        Exchange::from_config(&config),
        Err(ExchangeError::ConfigurationError(_))
    ));
}

#[test]
fn test_invalid_trade_never_reaches_ledger() {
    let exchange = Exchange::from_config(&ExchangeConfig::default()).unwrap();

    assert!(matches!(
        Trade::new(StockSymbol::Tea, at(10, 0), -1, 1.0, TrendSignal::Sell),
        Err(ExchangeError::InvalidTrade(_))
    ));
    let err = exchange
        .record_trade_json(
            r#"{"stock_symbol":"TEA","timestamp":"2024-06-03T10:00:00Z","quantity":1,"price_per_share":-0.01,"trend_signal":"SELL"}"#,
        )
        .unwrap_err();
    assert!(matches!(err, ExchangeError::InvalidTrade(_)));

    assert_eq!(exchange.stock(StockSymbol::Tea).unwrap().trade_count(), 0);
}

#[test]
fn test_concurrent_recording() {
    let exchange = Arc::new(Exchange::from_config(&ExchangeConfig::default()).unwrap());
    let base = Utc::now() - Duration::minutes(5);

    let handles: Vec<_> = StockSymbol::ALL
        .into_iter()
        .map(|symbol| {
            let exchange = Arc::clone(&exchange);
            thread::spawn(move || {
                for i in 0..100 {
                    let ts = base + Duration::seconds(i);
                    exchange.record_trade(trade(symbol, ts, 2, 10.0)).unwrap();
                    exchange.stock(symbol).unwrap().price().unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    for stock in exchange.stocks() {
        assert_eq!(stock.trade_count(), 100);
        assert!(approx(stock.avg_price().unwrap().unwrap(), 10.0));
    }
    assert!(approx(exchange.all_share_index().unwrap().unwrap(), 20.0));
}
