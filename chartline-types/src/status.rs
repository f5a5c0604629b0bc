use core::fmt;

use serde::{Deserialize, Serialize};

/// Observable lifecycle status of a chart session.
///
/// `Display` yields the string shown by the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartStatus {
    /// A session was created and is waiting for its first fetch.
    #[default]
    Initializing,
    /// The acquisition pipeline is walking the interval list.
    FetchingData,
    /// Series are being pushed to the rendering surface.
    Rendering,
    /// The chart shows data.
    Ready,
    /// Every candidate interval was exhausted without enough valid points.
    NoDataAvailable,
    /// The rendering surface rejected a series.
    Error(String),
}

impl ChartStatus {
    /// True for states the session will not leave on its own.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::NoDataAvailable | Self::Error(_))
    }
}

impl fmt::Display for ChartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initializing => f.write_str("Initializing chart..."),
            Self::FetchingData => f.write_str("Fetching data..."),
            Self::Rendering => f.write_str("Rendering..."),
            Self::Ready => f.write_str("Ready"),
            Self::NoDataAvailable => f.write_str("No data available"),
            Self::Error(msg) => write!(f, "Error: {msg}"),
        }
    }
}
