//! Response decoding at the HTTP boundary.
//!
//! Everything past this module sees `Vec<RawCandle>` and `Vec<RawSignal>`
//! regardless of which envelope the backend used.

use chartline_core::{ChartError, RawCandle, RawSignal};
use serde::Deserialize;
use serde_json::Value;

/// The three shapes the signal endpoints answer with.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignalEnvelope {
    List(Vec<Value>),
    Wrapped { value: Vec<Value> },
    Signals { signals: Vec<Value> },
}

impl SignalEnvelope {
    fn into_items(self) -> Vec<Value> {
        match self {
            Self::List(items) | Self::Wrapped { value: items } | Self::Signals { signals: items } => {
                items
            }
        }
    }
}

/// Decode a candle array. Elements are decoded leniently; malformed ones
/// survive as empty candles and are dropped later by validation.
pub(crate) fn decode_candles(body: &Value) -> Result<Vec<RawCandle>, ChartError> {
    let items = body
        .as_array()
        .ok_or_else(|| ChartError::Decode("candle payload is not an array".to_string()))?;
    Ok(items.iter().map(RawCandle::from_value).collect())
}

/// Decode any signal envelope. Elements that are not objects are skipped.
pub(crate) fn decode_signals(body: Value) -> Result<Vec<RawSignal>, ChartError> {
    let envelope: SignalEnvelope = serde_json::from_value(body)
        .map_err(|_| ChartError::Decode("unrecognized signal envelope".to_string()))?;
    Ok(envelope
        .into_items()
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}
