use std::sync::Arc;

use chartline::ChartConnector;

/// Mock connector when `CHARTLINE_EXAMPLES_USE_MOCK` is set, otherwise the
/// HTTP connector against `CHARTLINE_API_URL` (default `http://localhost:3000`).
#[must_use]
pub fn get_connector() -> Arc<dyn ChartConnector> {
    if std::env::var("CHARTLINE_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        return Arc::new(chartline_mock::MockConnector::new());
    }
    let base =
        std::env::var("CHARTLINE_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    match chartline_http::HttpConnector::new(&base) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("invalid CHARTLINE_API_URL ({e}); falling back to mock data");
            Arc::new(chartline_mock::MockConnector::new())
        }
    }
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
