use serde::{Deserialize, Serialize};

/// Visible window over the candle series, as inclusive indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleRange {
    /// First visible candle index.
    pub from_index: usize,
    /// Last visible candle index.
    pub to_index: usize,
}

impl VisibleRange {
    /// Number of candles covered by the range.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.to_index - self.from_index + 1
    }

    /// Always false; a range covers at least one candle.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// Fullscreen tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewportMode {
    /// Platform fullscreen API.
    #[default]
    Native,
    /// Full-viewport overlay with background scroll suspended.
    Overlay,
}

/// Current fullscreen state. Both tiers converge on `active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FullscreenMode {
    /// Whether the chart is fullscreen.
    pub active: bool,
    /// Tier used for the current (or last) fullscreen session.
    pub tier: ViewportMode,
}
