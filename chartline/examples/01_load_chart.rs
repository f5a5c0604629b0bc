mod common;

use std::sync::Arc;

use chartline::{AttemptOutcome, Chart, Selection, Timeframe};
use chartline_mock::RecordingSurface;
use common::{get_connector, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // 1. A surface stands in for the charting widget; it records what it is given.
    let surface = Arc::new(RecordingSurface::new());

    // 2. Build the chart around a connector and the surface.
    let chart = Chart::builder()
        .with_connector(get_connector())
        .with_surface(surface.clone())
        .build()?;

    // 3. Select a symbol; the pipeline walks 1m -> 5m -> 1d until one has enough points.
    chart.select(Selection::new("AAPL", Timeframe::D1)?);
    let status = chart.settled().await;
    println!("status: {status}");

    let snap = chart.snapshot();
    if let Some(report) = &snap.report {
        for attempt in &report.attempts {
            let outcome = match &attempt.outcome {
                AttemptOutcome::Accepted { valid } => format!("accepted ({valid} points)"),
                AttemptOutcome::Insufficient { valid } => format!("too sparse ({valid} points)"),
                AttemptOutcome::Failed { error } => format!("failed: {error}"),
            };
            println!("  {:>3}: {outcome}", attempt.interval.as_str());
        }
    }
    println!(
        "{} candles at {:?}, visible {:?}",
        snap.candles.len(),
        snap.active_interval,
        snap.visible_range
    );

    // 4. Markers arrive shortly after Ready.
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    for m in surface.markers() {
        println!("  marker @{}: {}", m.time, m.text);
    }

    chart.shutdown().await;
    Ok(())
}
