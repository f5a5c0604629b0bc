//! Report envelopes produced by the acquisition pipeline.

use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::interval::Interval;

/// Result of trying one candidate interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptOutcome {
    /// Valid point count exceeded the threshold; this interval was selected.
    Accepted {
        /// Number of points that survived validation.
        valid: usize,
    },
    /// The response decoded but did not carry enough valid points.
    Insufficient {
        /// Number of points that survived validation.
        valid: usize,
    },
    /// The request failed or timed out.
    Failed {
        /// Underlying error.
        error: ChartError,
    },
}

/// One entry of an [`AcquisitionReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalAttempt {
    /// Interval that was requested.
    pub interval: Interval,
    /// What happened.
    pub outcome: AttemptOutcome,
}

/// Summary of one acquisition run across the candidate intervals.
///
/// Attempts are listed in the order they were made; the run stops at the
/// first accepted interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AcquisitionReport {
    /// Symbol the run was for.
    pub symbol: String,
    /// Per-interval outcomes.
    pub attempts: Vec<IntervalAttempt>,
}

impl AcquisitionReport {
    /// Interval that was accepted, if any.
    #[must_use]
    pub fn selected(&self) -> Option<Interval> {
        self.attempts.iter().find_map(|a| match a.outcome {
            AttemptOutcome::Accepted { .. } => Some(a.interval),
            _ => None,
        })
    }

    /// Errors collected from failed attempts.
    #[must_use]
    pub fn errors(&self) -> Vec<&ChartError> {
        self.attempts
            .iter()
            .filter_map(|a| match &a.outcome {
                AttemptOutcome::Failed { error } => Some(error),
                _ => None,
            })
            .collect()
    }
}
