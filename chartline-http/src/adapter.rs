use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chartline_core::{Capability, ChartError};
use serde_json::Value;
use url::Url;

use crate::CONNECTOR_NAME;

/// Transport abstraction under [`HttpConnector`](crate::HttpConnector), so
/// tests can inject canned bodies and errors.
#[async_trait]
pub trait ChartApi: Send + Sync {
    /// `GET` the path built from `segments` with `query` and return the
    /// decoded JSON body.
    ///
    /// Each segment is percent-encoded on its own, so a symbol containing
    /// `/` stays one path segment.
    async fn get_json(
        &self,
        capability: Capability,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> Result<Value, ChartError>;
}

/// Production adapter backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct RealAdapter {
    client: reqwest::Client,
    base: Url,
}

impl RealAdapter {
    /// Wrap an existing client and a parsed base URL.
    #[must_use]
    pub const fn new(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    /// Build a client with the given per-request timeout.
    ///
    /// # Errors
    /// Returns `Connector` if the TLS backend cannot be initialized.
    pub fn with_timeout(base: Url, timeout: Duration) -> Result<Self, ChartError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("chartline/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ChartError::connector(CONNECTOR_NAME, e.to_string()))?;
        Ok(Self::new(client, base))
    }

    fn endpoint(
        &self,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> Result<Url, ChartError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ChartError::InvalidArg(format!("base URL '{}' cannot carry a path", self.base))
            })?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

fn map_transport_err(e: &reqwest::Error, capability: Capability) -> ChartError {
    if e.is_timeout() {
        ChartError::provider_timeout(CONNECTOR_NAME, capability.as_str())
    } else {
        ChartError::connector(CONNECTOR_NAME, format!("{capability}: {e}"))
    }
}

#[async_trait]
impl ChartApi for RealAdapter {
    async fn get_json(
        &self,
        capability: Capability,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> Result<Value, ChartError> {
        let url = self.endpoint(segments, query)?;
        let path = url.path().to_string();
        #[cfg(feature = "tracing")]
        tracing::debug!(%capability, %url, "GET");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_transport_err(&e, capability))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ChartError::http_status(path, status.as_u16()));
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| map_transport_err(&e, capability))?;
        serde_json::from_slice(&body).map_err(|e| ChartError::Decode(format!("{path}: {e}")))
    }
}

impl dyn ChartApi {
    /// Test helper that builds a `ChartApi` from a closure taking the joined
    /// path (`api/stocks/AAPL`) and the query pairs.
    pub fn from_fn<F>(f: F) -> Arc<dyn ChartApi>
    where
        F: Send + Sync + 'static + Fn(&str, &[(&'static str, String)]) -> Result<Value, ChartError>,
    {
        struct FnApi<F>(F);

        #[async_trait]
        impl<F> ChartApi for FnApi<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(&str, &[(&'static str, String)]) -> Result<Value, ChartError>,
        {
            async fn get_json(
                &self,
                _capability: Capability,
                segments: &[&str],
                query: &[(&'static str, String)],
            ) -> Result<Value, ChartError> {
                (self.0)(&segments.join("/"), query)
            }
        }

        Arc::new(FnApi(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter(base: &str) -> RealAdapter {
        RealAdapter::new(reqwest::Client::new(), Url::parse(base).expect("url"))
    }

    #[test]
    fn symbol_stays_one_segment() {
        let url = adapter("http://localhost:8080")
            .endpoint(&["api", "stocks", "BRK/B"], &[("interval", "1d".to_string())])
            .expect("url");
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/stocks/BRK%2FB?interval=1d"
        );
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let url = adapter("https://example.test/chart/")
            .endpoint(&["api", "signals", "historical", "AAPL"], &[])
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://example.test/chart/api/signals/historical/AAPL"
        );
    }
}
