use core::fmt;
use serde::{Deserialize, Serialize};

/// Capability labels for connector calls, errors, and telemetry.
///
/// These map one-to-one with the upstream endpoints a connector serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// OHLCV candles for one interval.
    Candles,
    /// Confluence-scored signals.
    EnhancedSignals,
    /// Moving-average crossover signal history.
    HistoricalSignals,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Candles => "candles",
            Self::EnhancedSignals => "signals/enhanced",
            Self::HistoricalSignals => "signals/historical",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
