//! Interval-fallback acquisition.

use chartline_core::{
    AcquisitionReport, AttemptOutcome, Candle, CandleProvider, CandleRequest, Capability, Interval,
    IntervalAttempt, PipelineConfig, validate_series,
};

use crate::core::{provider_call_with_timeout, tag_err};

/// Outcome of one acquisition run.
#[derive(Debug, Clone, PartialEq)]
pub struct Acquisition {
    /// Per-interval attempts in the order they were made.
    pub report: AcquisitionReport,
    /// The accepted interval and its validated series, if any interval
    /// produced more than `min_valid_points` valid candles.
    pub series: Option<(Interval, Vec<Candle>)>,
}

/// Try `intervals` in order and return the first series whose valid point
/// count exceeds `cfg.min_valid_points`.
///
/// Behavior:
/// - Failures and timeouts are recorded and the next interval is tried.
/// - The first acceptable interval wins; later intervals are never fetched.
/// - Exhausting every interval is a normal outcome (`series == None`).
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "chartline::pipeline::acquire",
        skip(provider, intervals, cfg),
        fields(
            connector = connector_name,
            symbol = symbol,
            candidates = intervals.len(),
        ),
    )
)]
pub async fn acquire(
    provider: &dyn CandleProvider,
    connector_name: &'static str,
    symbol: &str,
    intervals: &[Interval],
    cfg: &PipelineConfig,
) -> Acquisition {
    let mut report = AcquisitionReport {
        symbol: symbol.to_string(),
        attempts: Vec::with_capacity(intervals.len()),
    };
    for &interval in intervals {
        let req = CandleRequest {
            interval,
            include_pre_post: cfg.include_pre_post,
        };
        let fetched = provider_call_with_timeout(
            connector_name,
            Capability::Candles.as_str(),
            cfg.request_timeout,
            provider.candles(symbol, req),
        )
        .await;
        let raw = match fetched {
            Ok(raw) => raw,
            Err(e) => {
                let error = tag_err(connector_name, e);
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    %interval,
                    transient = error.is_transient(),
                    error = %error,
                    "candle fetch failed; trying next interval"
                );
                report.attempts.push(IntervalAttempt {
                    interval,
                    outcome: AttemptOutcome::Failed { error },
                });
                continue;
            }
        };

        let candles = validate_series(&raw);
        let valid = candles.len();
        if valid > cfg.min_valid_points {
            #[cfg(feature = "tracing")]
            tracing::info!(%interval, valid, "interval accepted");
            report.attempts.push(IntervalAttempt {
                interval,
                outcome: AttemptOutcome::Accepted { valid },
            });
            return Acquisition {
                report,
                series: Some((interval, candles)),
            };
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            %interval,
            valid,
            threshold = cfg.min_valid_points,
            "too few valid candles; trying next interval"
        );
        report.attempts.push(IntervalAttempt {
            interval,
            outcome: AttemptOutcome::Insufficient { valid },
        });
    }

    #[cfg(feature = "tracing")]
    tracing::info!(attempts = report.attempts.len(), "all intervals exhausted");
    Acquisition {
        report,
        series: None,
    }
}
