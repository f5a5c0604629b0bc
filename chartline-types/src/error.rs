use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the chartline workspace.
///
/// Connectors and render surfaces report failures through this type. The
/// orchestrator never lets it escape: every variant is folded into a
/// [`crate::ChartStatus`] or into an empty marker list at the chart boundary.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChartError {
    /// The requested capability is not implemented by the target connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "signals/enhanced").
        capability: String,
    },

    /// The upstream endpoint answered with a non-success HTTP status.
    #[error("{endpoint} returned HTTP {status}")]
    HttpStatus {
        /// Endpoint label or path that was called.
        endpoint: String,
        /// Numeric HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid input argument or configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual connector failed (transport error, refused connection, ...).
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// An individual connector call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label (e.g. "candles", "signals/enhanced").
        capability: String,
    },

    /// The rendering surface has not finished initializing.
    #[error("rendering surface is not ready")]
    SurfaceNotReady,

    /// The rendering surface rejected a series assignment.
    #[error("render failed: {0}")]
    Render(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl ChartError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build an `HttpStatus` error.
    pub fn http_status(endpoint: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build a `Render` error from any displayable message.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Returns true when retrying the same call later could plausibly succeed.
    ///
    /// Timeouts, transport failures, 5xx/429 responses and a not-yet-ready
    /// surface are transient; decode errors, 4xx responses and invalid
    /// arguments are not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ProviderTimeout { .. } | Self::Connector { .. } | Self::SurfaceNotReady => true,
            Self::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
