//! Async driver for [`ChartMachine`](crate::machine::ChartMachine).
//!
//! Events are fed to the machine under the session lock; the returned
//! actions are performed immediately (surface writes) or spawned
//! (fetches, marker retries, debounced resizes). Spawned tasks re-take the
//! lock and re-check the generation before touching session state.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use chartline_core::{
    AcquisitionReport, BandSeries, Candle, ChartError, IndicatorConfig, Interval, OverlayKind,
    RenderSurface, RetryConfig, Selection, SignalRequest, ViewportMode, bollinger, ema, initial_visible_range,
    normalize_signals, volume_bars,
};

use crate::core::provider_call_with_timeout;
use crate::machine::{Action, Event};
use crate::pipeline::{Acquisition, acquire};
use crate::session::{SessionData, SessionState, Shared};

/// Feed `event` to the machine and perform the resulting actions, including
/// any follow-up events they produce.
pub(crate) fn dispatch(shared: &Arc<Shared>, state: &mut SessionState, event: Event) {
    let mut queue = VecDeque::from([event]);
    while let Some(event) = queue.pop_front() {
        let machine = std::mem::take(&mut state.machine);
        let (next, actions) = machine.handle(event);
        state.machine = next;
        for action in actions {
            if let Some(follow_up) = perform(shared, state, action) {
                queue.push_back(follow_up);
            }
        }
    }
}

fn perform(shared: &Arc<Shared>, state: &mut SessionState, action: Action) -> Option<Event> {
    match action {
        Action::ClearSurface => {
            state.data = SessionData::default();
            state.marker_epoch += 1;
            shared.surface.clear();
            None
        }
        Action::PublishStatus(status) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(generation = state.machine.generation(), %status, "status");
            shared.status_tx.send_replace(status);
            None
        }
        Action::StartFetch {
            generation,
            selection,
            delayed,
        } => {
            let delay = delayed.then_some(state.cfg.initial_fetch_delay);
            let task = tokio::spawn(run_fetch(Arc::clone(shared), generation, selection, delay));
            shared.track(task);
            None
        }
        Action::Render {
            generation,
            interval,
            candles,
        } => {
            state.data.candles = candles;
            let result = render_session(shared.surface.as_ref(), state);
            #[cfg(feature = "tracing")]
            {
                match &result {
                    Ok(()) => tracing::debug!(
                        generation,
                        %interval,
                        candles = state.data.candles.len(),
                        "rendered"
                    ),
                    Err(e) => tracing::warn!(generation, %interval, error = %e, "render failed"),
                }
            }
            #[cfg(not(feature = "tracing"))]
            let _ = interval;
            Some(Event::RenderFinished { generation, result })
        }
        Action::RedrawOverlays => draw_overlays(
            shared.surface.as_ref(),
            &state.data.candles,
            &state.cfg.indicators,
        )
        .err()
        .map(|e| Event::SurfaceFailed {
            message: e.to_string(),
        }),
        Action::FetchMarkers {
            generation,
            interval,
        } => {
            let Some(symbol) = state.machine.selection().map(|s| s.symbol.clone()) else {
                return None;
            };
            state.marker_epoch += 1;
            let task = tokio::spawn(run_markers(
                Arc::clone(shared),
                generation,
                state.marker_epoch,
                symbol,
                interval,
            ));
            shared.track(task);
            None
        }
        Action::DrawMarkers(markers) => {
            match shared.surface.set_markers(&markers) {
                Ok(()) => state.data.markers = markers,
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %_e, "surface rejected markers; continuing without them");
                }
            }
            None
        }
        Action::RequestNativeFullscreen => {
            let entered = match shared.surface.request_native_fullscreen() {
                Ok(()) => true,
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(error = %_e, "native fullscreen unavailable; using overlay");
                    false
                }
            };
            Some(Event::NativeFullscreenResult { entered })
        }
        Action::ExitFullscreen(ViewportMode::Native) => {
            if let Err(_e) = shared.surface.exit_native_fullscreen() {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "failed to exit native fullscreen");
            }
            None
        }
        Action::ExitFullscreen(ViewportMode::Overlay) => {
            shared.surface.set_overlay_fullscreen(false);
            None
        }
        Action::EnterOverlay => {
            shared.surface.set_overlay_fullscreen(true);
            None
        }
        Action::ScheduleResize => {
            if let Some(pending) = state.pending_resize.take() {
                pending.abort();
            }
            let settle = state.cfg.viewport.resize_settle;
            let surface = Arc::clone(&shared.surface);
            state.pending_resize = Some(tokio::spawn(async move {
                tokio::time::sleep(settle).await;
                surface.resize();
            }));
            None
        }
    }
}

/// Write the active series and everything derived from it.
fn render_session(surface: &dyn RenderSurface, state: &mut SessionState) -> Result<(), ChartError> {
    let candles = &state.data.candles;
    let palette = &state.cfg.palette;
    surface.set_candles(candles)?;
    surface.set_volume(&volume_bars(candles, &palette.up, &palette.down))?;
    draw_overlays(surface, candles, &state.cfg.indicators)?;
    let visible = initial_visible_range(candles.len(), state.cfg.viewport.initial_visible);
    if let Some(range) = visible {
        surface.set_visible_range(range)?;
    }
    state.data.visible = visible;
    Ok(())
}

/// Disabled overlays are written as empty series so the surface clears them.
fn draw_overlays(
    surface: &dyn RenderSurface,
    candles: &[Candle],
    cfg: &IndicatorConfig,
) -> Result<(), ChartError> {
    let ema_line = if cfg.ema_enabled {
        ema(candles, cfg.ema_period)
    } else {
        Vec::new()
    };
    surface.set_line(OverlayKind::Ema, &ema_line)?;

    let bands = if cfg.bollinger_enabled {
        BandSeries::from_points(&bollinger(candles, cfg.bollinger_period, cfg.bollinger_mult))
    } else {
        BandSeries::default()
    };
    for (kind, line) in bands.lines() {
        surface.set_line(kind, line)?;
    }
    Ok(())
}

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "chartline::controller::fetch",
        skip(shared, selection, delay),
        fields(symbol = %selection.symbol, timeframe = %selection.timeframe),
    )
)]
async fn run_fetch(
    shared: Arc<Shared>,
    generation: u64,
    selection: Selection,
    delay: Option<Duration>,
) {
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let pipeline = {
        let mut state = shared.lock();
        if !state.machine.is_current(generation) {
            return;
        }
        dispatch(&shared, &mut state, Event::FetchStarted { generation });
        state.cfg.pipeline.clone()
    };

    let intervals = pipeline.intervals_for(selection.timeframe);
    let acquisition = match shared.connector.as_candle_provider() {
        Some(provider) => {
            acquire(
                provider,
                shared.connector.name(),
                &selection.symbol,
                &intervals,
                &pipeline,
            )
            .await
        }
        None => Acquisition {
            report: AcquisitionReport {
                symbol: selection.symbol.clone(),
                attempts: Vec::new(),
            },
            series: None,
        },
    };

    let mut state = shared.lock();
    if !state.machine.is_current(generation) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            current = state.machine.generation(),
            "discarding stale acquisition"
        );
        return;
    }
    state.data.report = Some(acquisition.report);
    let event = match acquisition.series {
        Some((interval, candles)) => Event::Acquired {
            generation,
            interval,
            candles,
        },
        None => Event::Exhausted { generation },
    };
    dispatch(&shared, &mut state, event);
}

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "chartline::controller::markers",
        skip(shared, epoch),
    )
)]
async fn run_markers(
    shared: Arc<Shared>,
    generation: u64,
    epoch: u64,
    symbol: String,
    interval: Interval,
) {
    let cfg = shared.lock().cfg.markers.clone();
    let Some(provider) = shared.connector.as_signal_provider() else {
        #[cfg(feature = "tracing")]
        tracing::debug!("connector serves no signals; skipping markers");
        return;
    };
    let req = SignalRequest::for_mode(cfg.mode, interval, &cfg);
    match await_surface(&shared, generation, cfg.retry).await {
        Ok(true) => {}
        Ok(false) => return,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, attempts = cfg.retry.attempts, "giving up on markers");
            return;
        }
    }

    let signals = match provider_call_with_timeout(
        shared.connector.name(),
        req.capability().as_str(),
        cfg.request_timeout,
        provider.signals(&symbol, req),
    )
    .await
    {
        Ok(signals) => signals,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, "signal fetch failed; drawing no markers");
            Vec::new()
        }
    };

    let mut state = shared.lock();
    if !state.machine.is_current(generation) || state.marker_epoch != epoch {
        return;
    }
    let markers = normalize_signals(&signals, &state.data.candles, &state.cfg.palette);
    #[cfg(feature = "tracing")]
    tracing::debug!(received = signals.len(), drawn = markers.len(), "markers ready");
    dispatch(&shared, &mut state, Event::MarkersReady { generation, markers });
}

/// Poll surface readiness under `retry`, sleeping `retry.delay` between
/// checks. `retry.attempts` counts the first check.
///
/// Returns `Ok(false)` once `generation` is stale.
///
/// # Errors
/// Returns `SurfaceNotReady` when every check found the surface
/// uninitialized.
async fn await_surface(
    shared: &Shared,
    generation: u64,
    retry: RetryConfig,
) -> Result<bool, ChartError> {
    let attempts = retry.attempts.max(1);
    for attempt in 1..=attempts {
        if !shared.is_current(generation) {
            return Ok(false);
        }
        if shared.surface.is_ready() {
            return Ok(true);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(attempt, attempts, "surface not ready; delaying marker fetch");
        if attempt < attempts {
            tokio::time::sleep(retry.delay).await;
        }
    }
    Err(ChartError::SurfaceNotReady)
}
