//! Viewport math for the time axis.

use chartline_types::VisibleRange;

/// Window showing the most recent `window` candles of a series of `len`.
///
/// When the series is shorter than the window the whole series is shown.
/// Returns `None` for an empty series. A `window` of `0` is treated as `1`.
#[must_use]
pub fn initial_visible_range(len: usize, window: usize) -> Option<VisibleRange> {
    if len == 0 {
        return None;
    }
    let window = window.max(1);
    Some(VisibleRange {
        from_index: len.saturating_sub(window),
        to_index: len - 1,
    })
}
