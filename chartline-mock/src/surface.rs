use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chartline_core::{
    Candle, ChartError, LinePoint, Marker, OverlayKind, RenderSurface, VisibleRange, VolumeBar,
};

/// One call made against a [`RecordingSurface`], in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    /// `clear()`.
    Clear,
    /// `set_candles` with the series length.
    Candles(usize),
    /// `set_volume` with the bar count.
    Volume(usize),
    /// `set_line` with the overlay kind and point count.
    Line(OverlayKind, usize),
    /// `set_markers` with the marker count.
    Markers(usize),
    /// `set_visible_range`.
    VisibleRange(VisibleRange),
    /// `resize()`.
    Resize,
    /// `request_native_fullscreen()`.
    NativeEnter,
    /// `exit_native_fullscreen()`.
    NativeExit,
    /// `set_overlay_fullscreen`.
    Overlay(bool),
}

#[derive(Default)]
struct Recorded {
    ready: bool,
    native_supported: bool,
    fail_renders: Option<String>,
    candles: Vec<Candle>,
    volume: Vec<VolumeBar>,
    lines: HashMap<OverlayKind, Vec<LinePoint>>,
    markers: Vec<Marker>,
    visible: Option<VisibleRange>,
    ready_checks: usize,
    clears: usize,
    resizes: usize,
    overlay: bool,
    native: bool,
    calls: Vec<SurfaceCall>,
}

/// In-memory [`RenderSurface`] that records everything written to it.
///
/// Starts ready with native fullscreen available.
pub struct RecordingSurface {
    inner: Mutex<Recorded>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    /// A ready surface that supports native fullscreen.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Recorded {
                ready: true,
                native_supported: true,
                ..Recorded::default()
            }),
        }
    }

    /// A surface that reports not ready until [`set_ready`](Self::set_ready).
    #[must_use]
    pub fn not_ready() -> Self {
        let me = Self::new();
        me.lock().ready = false;
        me
    }

    /// A surface whose platform has no native fullscreen API.
    #[must_use]
    pub fn without_native_fullscreen() -> Self {
        let me = Self::new();
        me.lock().native_supported = false;
        me
    }

    /// Flip the readiness flag.
    pub fn set_ready(&self, ready: bool) {
        self.lock().ready = ready;
    }

    /// Make every subsequent `set_candles` fail with a render error.
    pub fn fail_renders_with(&self, msg: impl Into<String>) {
        self.lock().fail_renders = Some(msg.into());
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Candles currently on the surface.
    #[must_use]
    pub fn candles(&self) -> Vec<Candle> {
        self.lock().candles.clone()
    }

    /// Volume bars currently on the surface.
    #[must_use]
    pub fn volume(&self) -> Vec<VolumeBar> {
        self.lock().volume.clone()
    }

    /// Points of one overlay line; empty if never set or cleared.
    #[must_use]
    pub fn line(&self, kind: OverlayKind) -> Vec<LinePoint> {
        self.lock().lines.get(&kind).cloned().unwrap_or_default()
    }

    /// Markers currently on the surface.
    #[must_use]
    pub fn markers(&self) -> Vec<Marker> {
        self.lock().markers.clone()
    }

    /// Last visible range set.
    #[must_use]
    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.lock().visible
    }

    /// How many times `is_ready` was polled.
    #[must_use]
    pub fn ready_checks(&self) -> usize {
        self.lock().ready_checks
    }

    /// How many times the surface was cleared.
    #[must_use]
    pub fn clears(&self) -> usize {
        self.lock().clears
    }

    /// How many resizes actually reached the widget.
    #[must_use]
    pub fn resizes(&self) -> usize {
        self.lock().resizes
    }

    /// Whether the overlay tier is currently shown.
    #[must_use]
    pub fn overlay_active(&self) -> bool {
        self.lock().overlay
    }

    /// Whether native fullscreen is currently entered.
    #[must_use]
    pub fn native_active(&self) -> bool {
        self.lock().native
    }

    /// Full call log.
    #[must_use]
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.lock().calls.clone()
    }
}

impl RenderSurface for RecordingSurface {
    fn is_ready(&self) -> bool {
        let mut g = self.lock();
        g.ready_checks += 1;
        g.ready
    }

    fn set_candles(&self, candles: &[Candle]) -> Result<(), ChartError> {
        let mut g = self.lock();
        if let Some(msg) = &g.fail_renders {
            return Err(ChartError::render(msg.clone()));
        }
        g.calls.push(SurfaceCall::Candles(candles.len()));
        g.candles = candles.to_vec();
        Ok(())
    }

    fn set_volume(&self, bars: &[VolumeBar]) -> Result<(), ChartError> {
        let mut g = self.lock();
        g.calls.push(SurfaceCall::Volume(bars.len()));
        g.volume = bars.to_vec();
        Ok(())
    }

    fn set_line(&self, kind: OverlayKind, points: &[LinePoint]) -> Result<(), ChartError> {
        let mut g = self.lock();
        g.calls.push(SurfaceCall::Line(kind, points.len()));
        g.lines.insert(kind, points.to_vec());
        Ok(())
    }

    fn set_markers(&self, markers: &[Marker]) -> Result<(), ChartError> {
        let mut g = self.lock();
        g.calls.push(SurfaceCall::Markers(markers.len()));
        g.markers = markers.to_vec();
        Ok(())
    }

    fn set_visible_range(&self, range: VisibleRange) -> Result<(), ChartError> {
        let mut g = self.lock();
        g.calls.push(SurfaceCall::VisibleRange(range));
        g.visible = Some(range);
        Ok(())
    }

    fn clear(&self) {
        let mut g = self.lock();
        g.calls.push(SurfaceCall::Clear);
        g.clears += 1;
        g.candles.clear();
        g.volume.clear();
        g.lines.clear();
        g.markers.clear();
        g.visible = None;
    }

    fn resize(&self) {
        let mut g = self.lock();
        g.calls.push(SurfaceCall::Resize);
        g.resizes += 1;
    }

    fn request_native_fullscreen(&self) -> Result<(), ChartError> {
        let mut g = self.lock();
        g.calls.push(SurfaceCall::NativeEnter);
        if !g.native_supported {
            return Err(ChartError::unsupported("fullscreen/native"));
        }
        g.native = true;
        Ok(())
    }

    fn exit_native_fullscreen(&self) -> Result<(), ChartError> {
        let mut g = self.lock();
        g.calls.push(SurfaceCall::NativeExit);
        g.native = false;
        Ok(())
    }

    fn set_overlay_fullscreen(&self, active: bool) {
        let mut g = self.lock();
        g.calls.push(SurfaceCall::Overlay(active));
        g.overlay = active;
    }
}
