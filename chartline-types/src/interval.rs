//! Sampling intervals, user-facing timeframes and chart selections.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ChartError;

/// Candle sampling interval accepted by the candle endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Interval {
    /// One minute.
    #[serde(rename = "1m")]
    I1m,
    /// Five minutes.
    #[serde(rename = "5m")]
    I5m,
    /// Fifteen minutes.
    #[serde(rename = "15m")]
    I15m,
    /// Thirty minutes.
    #[serde(rename = "30m")]
    I30m,
    /// One hour.
    #[serde(rename = "1h")]
    I1h,
    /// One trading day.
    #[serde(rename = "1d")]
    D1,
}

impl Interval {
    /// Every interval, finest first.
    pub const ALL: [Self; 6] = [
        Self::I1m,
        Self::I5m,
        Self::I15m,
        Self::I30m,
        Self::I1h,
        Self::D1,
    ];

    /// Wire code used in the `interval` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::I1m => "1m",
            Self::I5m => "5m",
            Self::I15m => "15m",
            Self::I30m => "30m",
            Self::I1h => "1h",
            Self::D1 => "1d",
        }
    }

    /// Bucket length in seconds.
    #[must_use]
    pub const fn seconds(self) -> i64 {
        match self {
            Self::I1m => 60,
            Self::I5m => 300,
            Self::I15m => 900,
            Self::I30m => 1_800,
            Self::I1h => 3_600,
            Self::D1 => 86_400,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|iv| iv.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChartError::InvalidArg(format!("unknown interval '{s}'")))
    }
}

/// User-facing chart window. Each timeframe maps to an ordered list of
/// candidate sampling intervals, finest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Timeframe {
    /// A single session.
    #[default]
    #[serde(rename = "1D")]
    D1,
    /// Five sessions.
    #[serde(rename = "5D")]
    D5,
    /// One month.
    #[serde(rename = "1M")]
    M1,
    /// Six months.
    #[serde(rename = "6M")]
    M6,
    /// One year.
    #[serde(rename = "1Y")]
    Y1,
}

impl Timeframe {
    /// Default candidate intervals in priority order.
    #[must_use]
    pub const fn candidate_intervals(self) -> &'static [Interval] {
        match self {
            Self::D1 => &[Interval::I1m, Interval::I5m, Interval::D1],
            Self::D5 => &[Interval::I5m, Interval::I15m, Interval::I1h, Interval::D1],
            Self::M1 => &[Interval::I30m, Interval::I1h, Interval::D1],
            Self::M6 | Self::Y1 => &[Interval::D1],
        }
    }

    /// Display code (`1D`, `5D`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::D1 => "1D",
            Self::D5 => "5D",
            Self::M1 => "1M",
            Self::M6 => "6M",
            Self::Y1 => "1Y",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The (symbol, timeframe) pair a chart session is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    /// Ticker symbol, upper-cased and trimmed.
    pub symbol: String,
    /// Selected timeframe.
    pub timeframe: Timeframe,
}

impl Selection {
    /// Build a selection, normalizing the symbol.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the symbol is empty or contains whitespace.
    pub fn new(symbol: &str, timeframe: Timeframe) -> Result<Self, ChartError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(ChartError::InvalidArg("symbol cannot be empty".into()));
        }
        if symbol.chars().any(char::is_whitespace) {
            return Err(ChartError::InvalidArg(format!(
                "symbol '{symbol}' contains whitespace"
            )));
        }
        Ok(Self {
            symbol: symbol.to_ascii_uppercase(),
            timeframe,
        })
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.symbol, self.timeframe)
    }
}
