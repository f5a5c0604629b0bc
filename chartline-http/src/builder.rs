use std::sync::Arc;
use std::time::Duration;

use chartline_core::ChartError;
use url::Url;

use crate::HttpConnector;
use crate::adapter::RealAdapter;

/// Builder for [`HttpConnector`].
#[derive(Debug, Clone)]
pub struct HttpConnectorBuilder {
    base_url: String,
    timeout: Duration,
    client: Option<reqwest::Client>,
}

impl HttpConnectorBuilder {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
            client: None,
        }
    }

    /// Per-request timeout applied by the internal client. Ignored when a
    /// custom client is supplied.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a preconfigured `reqwest::Client` (proxies, headers, TLS roots).
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// - `InvalidArg` if the base URL does not parse or cannot carry a path.
    /// - `Connector` if the internal HTTP client cannot be built.
    pub fn build(self) -> Result<HttpConnector, ChartError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| ChartError::InvalidArg(format!("base URL '{}': {e}", self.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ChartError::InvalidArg(format!(
                "base URL '{}' cannot carry a path",
                self.base_url
            )));
        }
        let adapter = match self.client {
            Some(client) => RealAdapter::new(client, base),
            None => RealAdapter::with_timeout(base, self.timeout)?,
        };
        Ok(HttpConnector::from_adapter(Arc::new(adapter)))
    }
}
