use chartline_types::{
    Candle, ChartError, LinePoint, Marker, OverlayKind, VisibleRange, VolumeBar,
};

/// The rendering-surface collaborator a chart session draws into.
///
/// Implementations wrap a concrete charting widget and must be internally
/// synchronized; the orchestrator calls them from async tasks. Series setters
/// replace the whole series, and an empty slice clears it.
pub trait RenderSurface: Send + Sync {
    /// Whether the widget finished initializing and accepts series.
    fn is_ready(&self) -> bool;

    /// Replace the candlestick series.
    ///
    /// # Errors
    /// Returns an error if the widget rejects the data.
    fn set_candles(&self, candles: &[Candle]) -> Result<(), ChartError>;

    /// Replace the volume histogram.
    ///
    /// # Errors
    /// Returns an error if the widget rejects the data.
    fn set_volume(&self, bars: &[VolumeBar]) -> Result<(), ChartError>;

    /// Replace one overlay line series.
    ///
    /// # Errors
    /// Returns an error if the widget rejects the data.
    fn set_line(&self, kind: OverlayKind, points: &[LinePoint]) -> Result<(), ChartError>;

    /// Replace the marker list attached to the candlestick series.
    ///
    /// # Errors
    /// Returns an error if the widget rejects the data.
    fn set_markers(&self, markers: &[Marker]) -> Result<(), ChartError>;

    /// Move the time axis to show `range`.
    ///
    /// # Errors
    /// Returns an error if the widget rejects the range.
    fn set_visible_range(&self, range: VisibleRange) -> Result<(), ChartError>;

    /// Drop every series, marker and overlay.
    fn clear(&self);

    /// Re-measure the container and resize the widget.
    fn resize(&self) {}

    /// Ask the platform for native fullscreen.
    ///
    /// # Errors
    /// Returns `Unsupported` when the platform has no native fullscreen API;
    /// the caller then falls back to the overlay tier.
    fn request_native_fullscreen(&self) -> Result<(), ChartError> {
        Err(ChartError::unsupported("fullscreen/native"))
    }

    /// Leave native fullscreen.
    ///
    /// # Errors
    /// Returns an error if the platform refuses to exit.
    fn exit_native_fullscreen(&self) -> Result<(), ChartError> {
        Ok(())
    }

    /// Toggle the full-viewport overlay and background-scroll suspension.
    fn set_overlay_fullscreen(&self, active: bool) {
        let _ = active;
    }
}
