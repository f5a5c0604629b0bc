//! Raw scored signals and the normalized markers derived from them.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::candle::{lenient_f64, number_like};

/// Opaque signal payload as produced by the scoring backend.
///
/// The shape varies between endpoints, so every field is optional and
/// decoded leniently: a value of the wrong JSON type becomes `None` rather
/// than failing the whole list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSignal {
    /// Candle time the signal is anchored to, in unix seconds.
    #[serde(default, deserialize_with = "lenient_time")]
    pub time: Option<i64>,
    /// Explicit direction, usually `BUY` or `SELL`.
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    /// Renderer shape hint such as `arrowUp`/`arrowDown`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub shape: Option<String>,
    /// Free-form label text.
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    /// Price at which the signal fired.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    /// Confidence, either a fraction in `[0, 1]` or a percentage.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub confidence: Option<f64>,
    /// Externally computed confluence strength.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub confluence_score: Option<f64>,
}

impl RawSignal {
    /// Signal at `time` with an explicit `type`.
    #[must_use]
    pub fn typed(time: i64, kind: &str) -> Self {
        Self {
            time: Some(time),
            kind: Some(kind.to_string()),
            ..Self::default()
        }
    }

    /// Attach a price.
    #[must_use]
    pub const fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Attach a confidence value.
    #[must_use]
    pub const fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

#[allow(clippy::cast_possible_truncation)]
fn lenient_time<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_like)
        .filter(|t| t.is_finite())
        .map(|t| t as i64))
}

/// Trade direction of a classified signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalSide {
    /// Long entry.
    Buy,
    /// Exit / short entry.
    Sell,
}

impl SignalSide {
    /// Upper-case label used in marker text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }

    /// Arrow glyph prefixed to marker text.
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Buy => "▲",
            Self::Sell => "▼",
        }
    }

    /// Fixed placement: buys sit below the bar, sells above it.
    #[must_use]
    pub const fn position(self) -> MarkerPosition {
        match self {
            Self::Buy => MarkerPosition::BelowBar,
            Self::Sell => MarkerPosition::AboveBar,
        }
    }

    /// Fixed marker shape for the side.
    #[must_use]
    pub const fn shape(self) -> MarkerShape {
        match self {
            Self::Buy => MarkerShape::ArrowUp,
            Self::Sell => MarkerShape::ArrowDown,
        }
    }
}

impl fmt::Display for SignalSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which upstream signal endpoint feeds the marker processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignalMode {
    /// Confluence-scored signals (`/api/enhanced-signals`).
    #[default]
    Enhanced,
    /// Moving-average crossover history (`/api/signals/historical`).
    Basic,
}

/// Marker placement relative to the candle body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerPosition {
    /// Drawn under the low.
    BelowBar,
    /// Drawn over the high.
    AboveBar,
}

/// Marker glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerShape {
    /// Upward arrow.
    ArrowUp,
    /// Downward arrow.
    ArrowDown,
}

/// Renderer-agnostic trading marker anchored to one candle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Time of the candle the marker is attached to.
    pub time: i64,
    /// Placement relative to the bar.
    pub position: MarkerPosition,
    /// CSS color string.
    pub color: String,
    /// Glyph.
    pub shape: MarkerShape,
    /// Label text.
    pub text: String,
}
