use chartline_core::{Interval, RawCandle};

/// Unix time of the first fixture candle (2024-01-02 14:30:00 UTC, the US open).
#[must_use]
pub fn session_start() -> i64 {
    chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .and_then(|d| d.and_hms_opt(14, 30, 0))
        .map_or(0, |dt| dt.and_utc().timestamp())
}

/// `n` well-formed candles spaced by `interval`, starting at [`session_start`].
///
/// Prices follow a deterministic zig-zag around `base` so both up and down
/// candles appear.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
pub fn series(interval: Interval, n: usize, base: f64) -> Vec<RawCandle> {
    let start = session_start();
    let step = interval.seconds();
    let mut prev_close = base;
    (0..n)
        .map(|i| {
            let drift = ((i % 7) as f64 - 3.0) * 0.4 + (i / 7) as f64 * 0.1;
            let close = base + drift;
            let open = prev_close;
            prev_close = close;
            RawCandle::new(
                start + step * i as i64,
                open,
                open.max(close) + 0.25,
                open.min(close) - 0.25,
                close,
                1_000.0 + (i % 5) as f64 * 250.0,
            )
        })
        .collect()
}

/// Candle payload for `symbol` at `interval`, or `None` when the fixture has
/// no data for that pair.
///
/// - `AAPL`: `1m` is sparse (5 valid points among malformed rows), `5m` has
///   50 points, `1d` has 250.
/// - `MSFT`, `GOOG`: 120 points at every interval.
/// - `THIN`: at most 10 valid points at every interval.
#[must_use]
pub fn by_symbol(symbol: &str, interval: Interval) -> Option<Vec<RawCandle>> {
    match (symbol, interval) {
        ("AAPL", Interval::I1m) => {
            let mut rows = series(interval, 5, 185.0);
            let mut broken = series(interval, 8, 185.0).split_off(5);
            for r in &mut broken {
                r.close = None;
            }
            rows.extend(broken);
            rows.push(RawCandle {
                open: Some(f64::NAN),
                ..RawCandle::new(0, 0.0, 0.0, 0.0, 0.0, 0.0)
            });
            Some(rows)
        }
        ("AAPL", Interval::I5m) => Some(series(interval, 50, 185.0)),
        ("AAPL", Interval::D1) => Some(series(interval, 250, 185.0)),
        ("AAPL", _) => Some(Vec::new()),
        ("MSFT", _) => Some(series(interval, 120, 375.0)),
        ("GOOG", _) => Some(series(interval, 120, 140.0)),
        ("THIN", _) => Some(series(interval, 10, 12.0)),
        _ => None,
    }
}
