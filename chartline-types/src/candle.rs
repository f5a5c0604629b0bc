//! OHLCV candles in their raw (wire) and validated forms.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One validated OHLCV candle.
///
/// All price fields are finite and `volume` is finite and non-negative.
/// Within a series, `time` is strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket open time in unix seconds.
    pub time: i64,
    /// Opening price.
    pub open: f64,
    /// Highest traded price.
    pub high: f64,
    /// Lowest traded price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
}

impl Candle {
    /// Returns true when the candle closed at or above its open.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}

/// A candle as received from the wire, before validation.
///
/// Every field is optional. Values that are not JSON numbers (or numeric
/// strings) decode as `None` instead of failing the whole payload; the
/// validator decides what to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCandle {
    /// Bucket time in unix seconds, if present.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub time: Option<f64>,
    /// Opening price, if present.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub open: Option<f64>,
    /// Highest price, if present.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub high: Option<f64>,
    /// Lowest price, if present.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub low: Option<f64>,
    /// Closing price, if present.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub close: Option<f64>,
    /// Volume, if present.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub volume: Option<f64>,
}

impl RawCandle {
    /// Build a fully-populated raw candle.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time: Some(time as f64),
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            volume: Some(volume),
        }
    }

    /// Decode one element of a candle array.
    ///
    /// Non-object elements decode to an all-`None` candle, which the
    /// validator then drops.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        let field = |name: &str| obj.get(name).and_then(number_like);
        Self {
            time: field("time"),
            open: field("open"),
            high: field("high"),
            low: field("low"),
            close: field("close"),
            volume: field("volume"),
        }
    }
}

impl From<Candle> for RawCandle {
    fn from(c: Candle) -> Self {
        Self::new(c.time, c.open, c.high, c.low, c.close, c.volume)
    }
}

/// Interpret a JSON value as a number: numbers as-is, numeric strings parsed.
#[must_use]
pub fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Serde adapter used by wire types: accepts any JSON value, keeps numbers.
///
/// # Errors
/// Only fails if the underlying deserializer cannot produce a JSON value.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_like))
}

/// One volume histogram bar, colored by candle direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeBar {
    /// Candle time in unix seconds.
    pub time: i64,
    /// Volume value.
    pub value: f64,
    /// CSS color string.
    pub color: String,
}
