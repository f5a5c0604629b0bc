use std::sync::{Arc, Mutex};
use std::time::Duration;

use chartline_core::{
    ChartConfig, ChartConnector, ChartError, ChartPalette, ChartStatus, FullscreenMode,
    IndicatorConfig, Interval, MarkerConfig, PipelineConfig, RenderSurface, RetryConfig,
    Selection, SignalMode, Timeframe,
};
use tokio::sync::watch;

use crate::controller::dispatch;
use crate::machine::{ChartMachine, Event};
use crate::session::{ChartSnapshot, SessionData, SessionState, Shared};

/// One mounted chart: owns the session, the status channel and every task
/// it spawns.
///
/// Methods that start work (`select`, `refresh`, fullscreen and resize
/// notifications) spawn Tokio tasks and must be called from within a Tokio
/// runtime. Dropping the chart aborts all of its tasks.
pub struct Chart {
    shared: Arc<Shared>,
}

/// Builder for constructing a [`Chart`] with custom configuration.
pub struct ChartBuilder {
    connector: Option<Arc<dyn ChartConnector>>,
    surface: Option<Arc<dyn RenderSurface>>,
    cfg: ChartConfig,
}

impl Default for ChartBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartBuilder {
    /// Create a new builder with default configuration and no collaborators.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connector: None,
            surface: None,
            cfg: ChartConfig::default(),
        }
    }

    /// Set the data connector. It must serve candles; signals are optional.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn ChartConnector>) -> Self {
        self.connector = Some(c);
        self
    }

    /// Set the rendering surface the chart draws into.
    #[must_use]
    pub fn with_surface(mut self, s: Arc<dyn RenderSurface>) -> Self {
        self.surface = Some(s);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: ChartConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Replace the acquisition pipeline settings.
    #[must_use]
    pub fn pipeline(mut self, cfg: PipelineConfig) -> Self {
        self.cfg.pipeline = cfg;
        self
    }

    /// Use an explicit candidate interval list for every timeframe.
    #[must_use]
    pub fn intervals(mut self, intervals: &[Interval]) -> Self {
        self.cfg.pipeline.intervals = Some(intervals.to_vec());
        self
    }

    /// Minimum valid point count an interval must exceed to be accepted.
    #[must_use]
    pub const fn min_valid_points(mut self, n: usize) -> Self {
        self.cfg.pipeline.min_valid_points = n;
        self
    }

    /// Upper bound for each candle fetch.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.pipeline.request_timeout = timeout;
        self
    }

    /// Replace the overlay settings.
    #[must_use]
    pub const fn indicators(mut self, cfg: IndicatorConfig) -> Self {
        self.cfg.indicators = cfg;
        self
    }

    /// Replace the marker settings.
    #[must_use]
    pub fn markers(mut self, cfg: MarkerConfig) -> Self {
        self.cfg.markers = cfg;
        self
    }

    /// Select the signal endpoint feeding the markers.
    #[must_use]
    pub const fn marker_mode(mut self, mode: SignalMode) -> Self {
        self.cfg.markers.mode = mode;
        self
    }

    /// Retry policy for marker fetches while the surface is not ready.
    #[must_use]
    pub const fn marker_retry(mut self, retry: RetryConfig) -> Self {
        self.cfg.markers.retry = retry;
        self
    }

    /// Number of most recent candles shown after a render.
    #[must_use]
    pub const fn initial_visible(mut self, n: usize) -> Self {
        self.cfg.viewport.initial_visible = n;
        self
    }

    /// Delay before resizing after fullscreen or window changes.
    #[must_use]
    pub const fn resize_settle(mut self, settle: Duration) -> Self {
        self.cfg.viewport.resize_settle = settle;
        self
    }

    /// Delay between the first selection and its fetch.
    #[must_use]
    pub const fn initial_fetch_delay(mut self, delay: Duration) -> Self {
        self.cfg.initial_fetch_delay = delay;
        self
    }

    /// Replace the color palette.
    #[must_use]
    pub fn palette(mut self, palette: ChartPalette) -> Self {
        self.cfg.palette = palette;
        self
    }

    /// Build the chart. No data is fetched until the first selection.
    ///
    /// # Errors
    /// - `InvalidArg` if no connector or no surface was registered, or if an
    ///   explicit candidate interval list is empty.
    /// - `Unsupported` if the connector does not serve candles.
    pub fn build(self) -> Result<Chart, ChartError> {
        let connector = self.connector.ok_or_else(|| {
            ChartError::InvalidArg(
                "no connector registered; add one via with_connector(...)".to_string(),
            )
        })?;
        let surface = self.surface.ok_or_else(|| {
            ChartError::InvalidArg(
                "no rendering surface registered; add one via with_surface(...)".to_string(),
            )
        })?;
        if connector.as_candle_provider().is_none() {
            return Err(ChartError::unsupported(format!(
                "{} via {}",
                chartline_core::Capability::Candles,
                connector.name()
            )));
        }
        if self.cfg.pipeline.intervals.as_ref().is_some_and(Vec::is_empty) {
            return Err(ChartError::InvalidArg(
                "candidate interval list is empty".to_string(),
            ));
        }

        let (status_tx, _) = watch::channel(ChartStatus::Initializing);
        let state = SessionState {
            machine: ChartMachine::new(self.cfg.markers.enabled),
            cfg: self.cfg,
            timeframe: Timeframe::default(),
            data: SessionData::default(),
            marker_epoch: 0,
            pending_resize: None,
        };
        Ok(Chart {
            shared: Arc::new(Shared {
                connector,
                surface,
                state: Mutex::new(state),
                status_tx,
                tasks: Mutex::new(Vec::new()),
            }),
        })
    }
}

/// Tag errors that did not originate from the connector layer with the
/// connector name.
pub(crate) fn tag_err(connector: &str, e: ChartError) -> ChartError {
    match e {
        e @ (ChartError::HttpStatus { .. }
        | ChartError::ProviderTimeout { .. }
        | ChartError::Connector { .. }
        | ChartError::Decode(_)
        | ChartError::Unsupported { .. }) => e,
        other => ChartError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Wrap a provider future with a timeout and standardized timeout error mapping.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "chartline::core::provider_call_with_timeout",
        skip(fut),
        fields(
            connector = connector_name,
            capability = capability,
            timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        ),
    )
)]
pub(crate) async fn provider_call_with_timeout<T, Fut>(
    connector_name: &'static str,
    capability: &'static str,
    timeout: Duration,
    fut: Fut,
) -> Result<T, ChartError>
where
    Fut: core::future::Future<Output = Result<T, ChartError>>,
{
    (tokio::time::timeout(timeout, fut).await)
        .unwrap_or_else(|_| Err(ChartError::provider_timeout(connector_name, capability)))
}

impl Chart {
    /// Start building a new `Chart`.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use chartline::{Chart, Selection, Timeframe};
    ///
    /// let chart = Chart::builder()
    ///     .with_connector(Arc::new(HttpConnector::new("https://example.test")?))
    ///     .with_surface(surface)
    ///     .build()?;
    /// chart.select(Selection::new("AAPL", Timeframe::D5)?);
    /// let status = chart.settled().await;
    /// ```
    #[must_use]
    pub fn builder() -> ChartBuilder {
        ChartBuilder::new()
    }

    /// Start a new session for `selection`.
    ///
    /// Bumps the session generation, clears the surface, publishes
    /// `Initializing` and spawns the acquisition. Results of any earlier
    /// session are discarded when they arrive.
    pub fn select(&self, selection: Selection) {
        let mut state = self.shared.lock();
        state.timeframe = selection.timeframe;
        #[cfg(feature = "tracing")]
        tracing::info!(
            symbol = %selection.symbol,
            timeframe = %selection.timeframe,
            generation = state.machine.generation() + 1,
            "new chart session"
        );
        dispatch(&self.shared, &mut state, Event::Select(selection));
    }

    /// Switch symbol, keeping the current timeframe.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the symbol is empty or contains whitespace.
    pub fn set_symbol(&self, symbol: &str) -> Result<(), ChartError> {
        let timeframe = self.shared.lock().timeframe;
        self.select(Selection::new(symbol, timeframe)?);
        Ok(())
    }

    /// Switch timeframe. Starts a new session when a symbol is selected;
    /// otherwise the timeframe applies to the next `set_symbol`.
    pub fn set_timeframe(&self, timeframe: Timeframe) {
        let current = {
            let mut state = self.shared.lock();
            state.timeframe = timeframe;
            state.machine.selection().cloned()
        };
        if let Some(mut selection) = current {
            selection.timeframe = timeframe;
            self.select(selection);
        }
    }

    /// Re-run the current selection as a new session. No-op before the
    /// first selection.
    pub fn refresh(&self) {
        let current = self.shared.lock().machine.selection().cloned();
        if let Some(selection) = current {
            self.select(selection);
        }
    }

    /// Show or hide the EMA line.
    pub fn set_ema_enabled(&self, enabled: bool) {
        self.update_indicators(|ind| ind.ema_enabled = enabled);
    }

    /// Show or hide the Bollinger bands.
    pub fn set_bollinger_enabled(&self, enabled: bool) {
        self.update_indicators(|ind| ind.bollinger_enabled = enabled);
    }

    /// Replace all overlay settings and redraw.
    pub fn set_indicators(&self, cfg: IndicatorConfig) {
        self.update_indicators(|ind| *ind = cfg);
    }

    fn update_indicators(&self, f: impl FnOnce(&mut IndicatorConfig)) {
        let mut state = self.shared.lock();
        f(&mut state.cfg.indicators);
        dispatch(&self.shared, &mut state, Event::OverlaysChanged);
    }

    /// Switch the signal endpoint and re-run the marker processor for the
    /// current session and active interval.
    pub fn set_marker_mode(&self, mode: SignalMode) {
        let mut state = self.shared.lock();
        if state.cfg.markers.mode == mode {
            return;
        }
        state.cfg.markers.mode = mode;
        dispatch(&self.shared, &mut state, Event::MarkerModeChanged);
    }

    /// Turn markers on (fetching them) or off (clearing them).
    pub fn set_markers_enabled(&self, enabled: bool) {
        let mut state = self.shared.lock();
        state.cfg.markers.enabled = enabled;
        dispatch(&self.shared, &mut state, Event::MarkersEnabled(enabled));
    }

    /// Enter fullscreen (native first, overlay as fallback) or leave it.
    pub fn toggle_fullscreen(&self) {
        let mut state = self.shared.lock();
        dispatch(&self.shared, &mut state, Event::ToggleFullscreen);
    }

    /// Report a platform-originated native fullscreen change, such as the
    /// user pressing Escape.
    pub fn on_native_fullscreen_change(&self, active: bool) {
        let mut state = self.shared.lock();
        dispatch(
            &self.shared,
            &mut state,
            Event::NativeFullscreenChanged { active },
        );
    }

    /// Report a host window resize; the surface is resized after the
    /// settle delay, coalescing bursts.
    pub fn notify_resize(&self) {
        let mut state = self.shared.lock();
        dispatch(&self.shared, &mut state, Event::Resized);
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> ChartStatus {
        self.shared.status_tx.borrow().clone()
    }

    /// Subscribe to status changes.
    #[must_use]
    pub fn subscribe_status(&self) -> watch::Receiver<ChartStatus> {
        self.shared.status_tx.subscribe()
    }

    /// Wait until the current session reaches `Ready`, `NoDataAvailable` or
    /// `Error`, and return that status.
    pub async fn settled(&self) -> ChartStatus {
        let mut rx = self.subscribe_status();
        let settled = rx.wait_for(ChartStatus::is_terminal).await.map(|s| s.clone());
        settled.unwrap_or_else(|_| self.status())
    }

    /// Current fullscreen state.
    #[must_use]
    pub fn fullscreen(&self) -> FullscreenMode {
        self.shared.lock().machine.fullscreen()
    }

    /// Current configuration, including runtime toggles.
    #[must_use]
    pub fn config(&self) -> ChartConfig {
        self.shared.lock().cfg.clone()
    }

    /// Point-in-time copy of the session.
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        self.shared.lock().snapshot()
    }

    /// Abort every task and wait for them to finish.
    pub async fn shutdown(self) {
        let handles = self.shared.take_tasks();
        for h in &handles {
            h.abort();
        }
        let _ = futures::future::join_all(handles).await;
    }
}

impl Drop for Chart {
    fn drop(&mut self) {
        for h in self.shared.take_tasks() {
            h.abort();
        }
    }
}
