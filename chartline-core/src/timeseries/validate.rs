use std::collections::BTreeMap;

use chartline_types::{Candle, RawCandle};

/// Validate a single raw point.
///
/// A point is kept only when time, open, high, low and close are all present
/// and finite. Volume defaults to `0` and a negative or non-finite volume is
/// clamped to `0`. Fractional times are truncated to whole seconds.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn validate_candle(raw: &RawCandle) -> Option<Candle> {
    let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
    let time = finite(raw.time)?;
    let open = finite(raw.open)?;
    let high = finite(raw.high)?;
    let low = finite(raw.low)?;
    let close = finite(raw.close)?;
    let volume = finite(raw.volume).filter(|v| *v > 0.0).unwrap_or(0.0);
    Some(Candle {
        time: time as i64,
        open,
        high,
        low,
        close,
        volume,
    })
}

/// Validate a raw series and normalize it for rendering.
///
/// - Invalid points are dropped.
/// - The output is sorted ascending by `time`.
/// - Duplicate times collapse to one candle; the last occurrence wins.
#[must_use]
pub fn validate_series(raw: &[RawCandle]) -> Vec<Candle> {
    let mut by_time: BTreeMap<i64, Candle> = BTreeMap::new();
    for candle in raw.iter().filter_map(validate_candle) {
        by_time.insert(candle.time, candle);
    }

    #[cfg(feature = "tracing")]
    {
        let dropped = raw.len() - by_time.len();
        if dropped > 0 {
            tracing::debug!(
                received = raw.len(),
                kept = by_time.len(),
                dropped,
                "dropped invalid or duplicate candles"
            );
        }
    }

    by_time.into_values().collect()
}
