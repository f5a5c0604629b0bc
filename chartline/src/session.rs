use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chartline_core::{
    AcquisitionReport, Candle, ChartConfig, ChartConnector, ChartStatus, FullscreenMode, Interval,
    Marker, RenderSurface, Selection, Timeframe, VisibleRange,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::machine::ChartMachine;

/// Entities owned by the current session. Replaced wholesale on every
/// selection change.
#[derive(Debug, Default)]
pub(crate) struct SessionData {
    pub(crate) candles: Vec<Candle>,
    pub(crate) markers: Vec<Marker>,
    pub(crate) visible: Option<VisibleRange>,
    pub(crate) report: Option<AcquisitionReport>,
}

pub(crate) struct SessionState {
    pub(crate) machine: ChartMachine,
    pub(crate) cfg: ChartConfig,
    /// Timeframe used by `set_symbol`; survives selection changes.
    pub(crate) timeframe: Timeframe,
    pub(crate) data: SessionData,
    /// Bumped on every marker fetch so an older mode's result cannot
    /// overwrite a newer one within the same generation.
    pub(crate) marker_epoch: u64,
    pub(crate) pending_resize: Option<JoinHandle<()>>,
}

/// State shared between the `Chart` handle and its spawned tasks.
pub(crate) struct Shared {
    pub(crate) connector: Arc<dyn ChartConnector>,
    pub(crate) surface: Arc<dyn RenderSurface>,
    pub(crate) state: Mutex<SessionState>,
    pub(crate) status_tx: watch::Sender<ChartStatus>,
    pub(crate) tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl Shared {
    pub(crate) fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.lock().machine.is_current(generation)
    }

    /// Track a spawned task so dropping the chart aborts it.
    pub(crate) fn track(&self, handle: JoinHandle<()>) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|h| !h.is_finished());
        tasks.push(handle);
    }

    pub(crate) fn take_tasks(&self) -> Vec<JoinHandle<()>> {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        let mut handles = std::mem::take(&mut *tasks);
        drop(tasks);
        if let Some(h) = self.lock().pending_resize.take() {
            handles.push(h);
        }
        handles
    }
}

/// Point-in-time view of a chart session.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSnapshot {
    /// Current selection, if any.
    pub selection: Option<Selection>,
    /// Session generation; bumps on every selection change or refresh.
    pub generation: u64,
    /// Current status.
    pub status: ChartStatus,
    /// Interval the pipeline accepted for this session.
    pub active_interval: Option<Interval>,
    /// Validated candle series on the surface.
    pub candles: Vec<Candle>,
    /// Markers on the surface.
    pub markers: Vec<Marker>,
    /// Visible range set after the initial render.
    pub visible_range: Option<VisibleRange>,
    /// Fullscreen state.
    pub fullscreen: FullscreenMode,
    /// Acquisition attempts for this session.
    pub report: Option<AcquisitionReport>,
}

impl SessionState {
    pub(crate) fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            selection: self.machine.selection().cloned(),
            generation: self.machine.generation(),
            status: self.machine.status().clone(),
            active_interval: self.machine.active_interval(),
            candles: self.data.candles.clone(),
            markers: self.data.markers.clone(),
            visible_range: self.data.visible,
            fullscreen: self.machine.fullscreen(),
            report: self.data.report.clone(),
        }
    }
}
