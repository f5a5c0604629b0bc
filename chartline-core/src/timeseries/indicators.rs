use chartline_types::{BandPoint, Candle, LinePoint};

/// Exponential moving average of closes.
///
/// The first output equals the first close; each following value is
/// `close * k + prev * (1 - k)` with `k = 2 / (period + 1)`. A period of `0`
/// is treated as `1`. Output is time-aligned with the input and empty input
/// yields empty output.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ema(candles: &[Candle], period: usize) -> Vec<LinePoint> {
    let period = period.max(1);
    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(candles.len());
    let mut prev: Option<f64> = None;
    for c in candles {
        let value = match prev {
            None => c.close,
            Some(p) => c.close.mul_add(k, p * (1.0 - k)),
        };
        prev = Some(value);
        out.push(LinePoint {
            time: c.time,
            value,
        });
    }
    out
}

/// Bollinger bands over a trailing window of closes.
///
/// Point `i` uses the window `[max(0, i + 1 - period), i]`, so the first
/// points use a partial window and the output has one point per candle.
/// Each point carries the window mean and `mean +/- mult * sd`, where `sd`
/// is the population standard deviation. Non-finite or negative `mult` is
/// clamped to `0`, and a period of `0` is treated as `1`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bollinger(candles: &[Candle], period: usize, mult: f64) -> Vec<BandPoint> {
    let period = period.max(1);
    let mult = if mult.is_finite() && mult > 0.0 { mult } else { 0.0 };
    candles
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let window = &candles[(i + 1).saturating_sub(period)..=i];
            let (middle, sd) = mean_and_sd(window);
            let spread = mult * sd;
            let spread = if spread.is_nan() { 0.0 } else { spread };
            BandPoint {
                time: c.time,
                upper: middle + spread,
                middle,
                lower: middle - spread,
            }
        })
        .collect()
}

/// Mean and population standard deviation of the window's closes.
///
/// Both are computed without summing raw values so closes near `f64::MAX`
/// keep a finite mean.
#[allow(clippy::cast_precision_loss)]
fn mean_and_sd(window: &[Candle]) -> (f64, f64) {
    let mut mean = 0.0;
    for (k, w) in window.iter().enumerate() {
        let k = (k + 1) as f64;
        mean += w.close / k - mean / k;
    }
    let scale = window
        .iter()
        .map(|w| (w.close - mean).abs())
        .fold(0.0, f64::max);
    if scale == 0.0 || !scale.is_finite() {
        return (mean, scale);
    }
    let n = window.len() as f64;
    let scaled = window
        .iter()
        .map(|w| {
            let d = (w.close - mean) / scale;
            d * d
        })
        .sum::<f64>()
        / n;
    (mean, scale * scaled.sqrt())
}
