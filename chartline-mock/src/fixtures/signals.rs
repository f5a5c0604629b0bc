use chartline_core::{Interval, RawSignal};

use super::candles::session_start;

fn at(interval: Interval, index: i64) -> i64 {
    session_start() + interval.seconds() * index
}

/// Confluence-scored signals for `symbol`, anchored to the candle fixtures
/// at `interval`.
///
/// The list mixes the direction hints the backend uses (`type`, `shape`,
/// free text) and includes one signal off the candle grid and one that
/// cannot be classified.
#[must_use]
pub fn enhanced(symbol: &str, interval: Interval) -> Vec<RawSignal> {
    match symbol {
        "AAPL" | "MSFT" | "GOOG" => vec![
            RawSignal::typed(at(interval, 12), "BUY")
                .with_price(184.2)
                .with_confidence(0.82),
            RawSignal {
                time: Some(at(interval, 20)),
                shape: Some("arrowDown".to_string()),
                confluence_score: Some(0.71),
                ..RawSignal::default()
            },
            RawSignal {
                time: Some(at(interval, 30)),
                text: Some("Momentum buy".to_string()),
                confidence: Some(64.0),
                ..RawSignal::default()
            },
            // between two candles
            RawSignal::typed(at(interval, 31) + 7, "SELL"),
            RawSignal {
                time: Some(at(interval, 32)),
                text: Some("neutral".to_string()),
                ..RawSignal::default()
            },
        ],
        _ => Vec::new(),
    }
}

/// Moving-average crossover history for `symbol`.
#[must_use]
pub fn historical(symbol: &str, interval: Interval) -> Vec<RawSignal> {
    match symbol {
        "AAPL" | "MSFT" | "GOOG" => vec![
            RawSignal::typed(at(interval, 9), "SELL").with_price(183.0),
            RawSignal::typed(at(interval, 25), "BUY").with_price(185.5),
        ],
        _ => Vec::new(),
    }
}
