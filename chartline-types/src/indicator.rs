//! Overlay series produced by the indicator engine.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A single `(time, value)` sample of a line series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    /// Candle time in unix seconds.
    pub time: i64,
    /// Series value at that time.
    pub value: f64,
}

/// One Bollinger sample. Invariant: `upper >= middle >= lower`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPoint {
    /// Candle time in unix seconds.
    pub time: i64,
    /// Mean plus `mult` standard deviations.
    pub upper: f64,
    /// Window mean.
    pub middle: f64,
    /// Mean minus `mult` standard deviations.
    pub lower: f64,
}

/// Line series slots on the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum OverlayKind {
    /// Exponential moving average of closes.
    Ema,
    /// Upper Bollinger band.
    BollingerUpper,
    /// Bollinger middle line (window mean).
    BollingerMiddle,
    /// Lower Bollinger band.
    BollingerLower,
}

impl OverlayKind {
    /// The three band slots, in upper/middle/lower order.
    pub const BOLLINGER: [Self; 3] = [
        Self::BollingerUpper,
        Self::BollingerMiddle,
        Self::BollingerLower,
    ];
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ema => "ema",
            Self::BollingerUpper => "bollinger/upper",
            Self::BollingerMiddle => "bollinger/middle",
            Self::BollingerLower => "bollinger/lower",
        };
        f.write_str(s)
    }
}

/// Bollinger output split into the three line series a renderer draws.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandSeries {
    /// Upper band line.
    pub upper: Vec<LinePoint>,
    /// Middle line.
    pub middle: Vec<LinePoint>,
    /// Lower band line.
    pub lower: Vec<LinePoint>,
}

impl BandSeries {
    /// Split band points into three time-aligned lines.
    #[must_use]
    pub fn from_points(points: &[BandPoint]) -> Self {
        let line = |f: fn(&BandPoint) -> f64| {
            points
                .iter()
                .map(|p| LinePoint {
                    time: p.time,
                    value: f(p),
                })
                .collect()
        };
        Self {
            upper: line(|p| p.upper),
            middle: line(|p| p.middle),
            lower: line(|p| p.lower),
        }
    }

    /// True when all three lines are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.upper.is_empty() && self.middle.is_empty() && self.lower.is_empty()
    }

    /// Iterate `(slot, line)` pairs in upper/middle/lower order.
    pub fn lines(&self) -> impl Iterator<Item = (OverlayKind, &[LinePoint])> {
        OverlayKind::BOLLINGER.into_iter().zip([
            self.upper.as_slice(),
            self.middle.as_slice(),
            self.lower.as_slice(),
        ])
    }
}
