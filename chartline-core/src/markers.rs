//! Signal classification and marker normalization.

use std::collections::HashSet;

use chartline_types::{Candle, ChartPalette, Marker, RawSignal, SignalSide};

/// Decide the trade side of a raw signal.
///
/// Precedence, first match wins:
/// 1. `type` equal to `BUY`/`SELL` (case-insensitive)
/// 2. `shape` equal to `arrowUp`/`arrowDown`
/// 3. `text` containing `buy` or `sell` (case-insensitive; `buy` is checked first)
///
/// Returns `None` when no rule matches.
#[must_use]
pub fn classify(signal: &RawSignal) -> Option<SignalSide> {
    if let Some(kind) = signal.kind.as_deref() {
        let kind = kind.trim();
        if kind.eq_ignore_ascii_case("BUY") {
            return Some(SignalSide::Buy);
        }
        if kind.eq_ignore_ascii_case("SELL") {
            return Some(SignalSide::Sell);
        }
    }
    match signal.shape.as_deref().map(str::trim) {
        Some("arrowUp") => return Some(SignalSide::Buy),
        Some("arrowDown") => return Some(SignalSide::Sell),
        _ => {}
    }
    let text = signal.text.as_deref()?.to_ascii_lowercase();
    if text.contains("buy") {
        Some(SignalSide::Buy)
    } else if text.contains("sell") {
        Some(SignalSide::Sell)
    } else {
        None
    }
}

/// Scale a confidence value to whole percent. Fractions in `[0, 1]` are
/// multiplied by 100.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn confidence_percent(confidence: f64) -> Option<i64> {
    if !confidence.is_finite() {
        return None;
    }
    let pct = if (0.0..=1.0).contains(&confidence) {
        confidence * 100.0
    } else {
        confidence
    };
    Some(pct.round() as i64)
}

/// Marker label: `"{arrow} {SIDE}{ $price}{ (confidence%)}"`.
#[must_use]
pub fn marker_label(side: SignalSide, price: Option<f64>, confidence: Option<f64>) -> String {
    let mut label = format!("{} {}", side.arrow(), side.as_str());
    if let Some(price) = price.filter(|p| p.is_finite()) {
        label.push_str(&format!(" ${price:.2}"));
    }
    if let Some(pct) = confidence.and_then(confidence_percent) {
        label.push_str(&format!(" ({pct}%)"));
    }
    label
}

/// Normalize one signal into a marker, ignoring candle alignment.
///
/// Returns `None` when the signal has no time or cannot be classified.
#[must_use]
pub fn normalize_signal(signal: &RawSignal, palette: &ChartPalette) -> Option<Marker> {
    let time = signal.time?;
    let side = classify(signal)?;
    let color = match side {
        SignalSide::Buy => palette.buy.clone(),
        SignalSide::Sell => palette.sell.clone(),
    };
    Some(Marker {
        time,
        position: side.position(),
        color,
        shape: side.shape(),
        text: marker_label(side, signal.price, signal.confidence),
    })
}

/// Normalize a signal list against the active candle series.
///
/// Unclassifiable signals and signals whose time matches no candle are
/// dropped. The result is sorted ascending by time; signals sharing a time
/// keep their input order.
#[must_use]
pub fn normalize_signals(
    signals: &[RawSignal],
    candles: &[Candle],
    palette: &ChartPalette,
) -> Vec<Marker> {
    let times: HashSet<i64> = candles.iter().map(|c| c.time).collect();
    let mut markers: Vec<Marker> = signals
        .iter()
        .filter_map(|s| normalize_signal(s, palette))
        .filter(|m| times.contains(&m.time))
        .collect();
    markers.sort_by_key(|m| m.time);

    #[cfg(feature = "tracing")]
    {
        if markers.len() < signals.len() {
            tracing::debug!(
                received = signals.len(),
                kept = markers.len(),
                "dropped unclassifiable or unaligned signals"
            );
        }
    }

    markers
}
