//! Pure chart lifecycle state machine.
//!
//! `ChartMachine::handle` consumes an event and returns the next machine plus
//! the side effects the controller must perform. It performs no I/O and
//! holds no clocks, so every transition is unit-testable.

use chartline_types::{
    Candle, ChartError, ChartStatus, FullscreenMode, Interval, Marker, Selection, ViewportMode,
};

/// Inputs to the machine, from the public API or from finished tasks.
#[derive(Debug)]
pub enum Event {
    /// A new symbol/timeframe selection (or a refresh of the current one).
    Select(Selection),
    /// The fetch task for `generation` finished its initial delay.
    FetchStarted { generation: u64 },
    /// The pipeline accepted `interval` for `generation`.
    Acquired {
        generation: u64,
        interval: Interval,
        candles: Vec<Candle>,
    },
    /// Every candidate interval failed or came back too sparse.
    Exhausted { generation: u64 },
    /// The surface finished (or rejected) the initial render.
    RenderFinished {
        generation: u64,
        result: Result<(), ChartError>,
    },
    /// A later surface write failed for the current session.
    SurfaceFailed { message: String },
    /// Overlay toggles or parameters changed.
    OverlaysChanged,
    /// Marker mode or parameters changed.
    MarkerModeChanged,
    /// Markers were switched on or off.
    MarkersEnabled(bool),
    /// The marker processor produced markers for `generation`.
    MarkersReady {
        generation: u64,
        markers: Vec<Marker>,
    },
    /// The user asked to enter or leave fullscreen.
    ToggleFullscreen,
    /// Outcome of a native fullscreen request.
    NativeFullscreenResult { entered: bool },
    /// The platform reported a native fullscreen change (e.g. Escape).
    NativeFullscreenChanged { active: bool },
    /// The host window was resized.
    Resized,
}

/// Side effects requested by the machine.
#[derive(Debug, PartialEq)]
pub enum Action {
    /// Drop the session data and every series on the surface.
    ClearSurface,
    /// Publish a new status to subscribers.
    PublishStatus(ChartStatus),
    /// Spawn the acquisition task.
    StartFetch {
        generation: u64,
        selection: Selection,
        delayed: bool,
    },
    /// Store `candles` as the active series and draw everything derived from it.
    Render {
        generation: u64,
        interval: Interval,
        candles: Vec<Candle>,
    },
    /// Recompute overlays from the active series.
    RedrawOverlays,
    /// Spawn the marker processor against the active interval.
    FetchMarkers { generation: u64, interval: Interval },
    /// Replace the marker list.
    DrawMarkers(Vec<Marker>),
    /// Ask the surface for native fullscreen.
    RequestNativeFullscreen,
    /// Leave fullscreen through the given tier.
    ExitFullscreen(ViewportMode),
    /// Show the overlay fullscreen tier.
    EnterOverlay,
    /// Debounced resize of the surface.
    ScheduleResize,
}

/// Lifecycle state for one mounted chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartMachine {
    generation: u64,
    selection: Option<Selection>,
    status: ChartStatus,
    active_interval: Option<Interval>,
    markers_enabled: bool,
    fullscreen: FullscreenMode,
    fullscreen_pending: bool,
}

impl Default for ChartMachine {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ChartMachine {
    pub const fn new(markers_enabled: bool) -> Self {
        Self {
            generation: 0,
            selection: None,
            status: ChartStatus::Initializing,
            active_interval: None,
            markers_enabled,
            fullscreen: FullscreenMode {
                active: false,
                tier: ViewportMode::Native,
            },
            fullscreen_pending: false,
        }
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub const fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub const fn status(&self) -> &ChartStatus {
        &self.status
    }

    pub const fn active_interval(&self) -> Option<Interval> {
        self.active_interval
    }

    pub const fn fullscreen(&self) -> FullscreenMode {
        self.fullscreen
    }

    pub fn handle(mut self, event: Event) -> (Self, Vec<Action>) {
        let actions = match event {
            Event::Select(selection) => {
                self.generation += 1;
                self.selection = Some(selection.clone());
                self.active_interval = None;
                self.status = ChartStatus::Initializing;
                vec![
                    Action::ClearSurface,
                    Action::PublishStatus(ChartStatus::Initializing),
                    Action::StartFetch {
                        generation: self.generation,
                        selection,
                        delayed: self.generation == 1,
                    },
                ]
            }
            Event::FetchStarted { generation } => {
                if self.is_live(generation, &ChartStatus::Initializing) {
                    self.publish(ChartStatus::FetchingData)
                } else {
                    Vec::new()
                }
            }
            Event::Acquired {
                generation,
                interval,
                candles,
            } => {
                if self.is_live(generation, &ChartStatus::FetchingData) {
                    self.active_interval = Some(interval);
                    let mut actions = self.publish(ChartStatus::Rendering);
                    actions.push(Action::Render {
                        generation,
                        interval,
                        candles,
                    });
                    actions
                } else {
                    Vec::new()
                }
            }
            Event::Exhausted { generation } => {
                if self.is_live(generation, &ChartStatus::FetchingData) {
                    self.publish(ChartStatus::NoDataAvailable)
                } else {
                    Vec::new()
                }
            }
            Event::RenderFinished { generation, result } => {
                if !self.is_live(generation, &ChartStatus::Rendering) {
                    return (self, Vec::new());
                }
                match result {
                    Ok(()) => {
                        let mut actions = self.publish(ChartStatus::Ready);
                        actions.extend(self.marker_fetch());
                        actions
                    }
                    Err(e) => self.publish(ChartStatus::Error(e.to_string())),
                }
            }
            Event::SurfaceFailed { message } => {
                if self.status == ChartStatus::Ready {
                    self.publish(ChartStatus::Error(message))
                } else {
                    Vec::new()
                }
            }
            Event::OverlaysChanged => {
                if self.status == ChartStatus::Ready {
                    vec![Action::RedrawOverlays]
                } else {
                    Vec::new()
                }
            }
            Event::MarkerModeChanged => {
                if self.status == ChartStatus::Ready {
                    self.marker_fetch().into_iter().collect()
                } else {
                    Vec::new()
                }
            }
            Event::MarkersEnabled(enabled) => {
                let was = std::mem::replace(&mut self.markers_enabled, enabled);
                if was == enabled || self.status != ChartStatus::Ready {
                    Vec::new()
                } else if enabled {
                    self.marker_fetch().into_iter().collect()
                } else {
                    vec![Action::DrawMarkers(Vec::new())]
                }
            }
            Event::MarkersReady {
                generation,
                markers,
            } => {
                if self.markers_enabled && self.is_live(generation, &ChartStatus::Ready) {
                    vec![Action::DrawMarkers(markers)]
                } else {
                    Vec::new()
                }
            }
            Event::ToggleFullscreen => {
                if self.fullscreen_pending {
                    Vec::new()
                } else if self.fullscreen.active {
                    self.fullscreen.active = false;
                    vec![
                        Action::ExitFullscreen(self.fullscreen.tier),
                        Action::ScheduleResize,
                    ]
                } else {
                    self.fullscreen_pending = true;
                    vec![Action::RequestNativeFullscreen]
                }
            }
            Event::NativeFullscreenResult { entered } => {
                if !self.fullscreen_pending {
                    return (self, Vec::new());
                }
                self.fullscreen_pending = false;
                self.fullscreen.active = true;
                if entered {
                    self.fullscreen.tier = ViewportMode::Native;
                    vec![Action::ScheduleResize]
                } else {
                    self.fullscreen.tier = ViewportMode::Overlay;
                    vec![Action::EnterOverlay, Action::ScheduleResize]
                }
            }
            Event::NativeFullscreenChanged { active } => {
                let native = self.fullscreen.tier == ViewportMode::Native;
                if !active && self.fullscreen.active && native {
                    self.fullscreen.active = false;
                    vec![Action::ScheduleResize]
                } else if active && !self.fullscreen.active && !self.fullscreen_pending {
                    self.fullscreen = FullscreenMode {
                        active: true,
                        tier: ViewportMode::Native,
                    };
                    vec![Action::ScheduleResize]
                } else {
                    Vec::new()
                }
            }
            Event::Resized => vec![Action::ScheduleResize],
        };
        (self, actions)
    }

    fn is_live(&self, generation: u64, expected: &ChartStatus) -> bool {
        self.generation == generation && &self.status == expected
    }

    fn publish(&mut self, status: ChartStatus) -> Vec<Action> {
        self.status = status.clone();
        vec![Action::PublishStatus(status)]
    }

    fn marker_fetch(&self) -> Option<Action> {
        if !self.markers_enabled {
            return None;
        }
        self.active_interval.map(|interval| Action::FetchMarkers {
            generation: self.generation,
            interval,
        })
    }
}
