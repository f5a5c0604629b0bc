mod common;

use std::sync::Arc;
use std::time::Duration;

use chartline::{Chart, OverlayKind, SignalMode, Timeframe};
use chartline_mock::RecordingSurface;
use common::{get_connector, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // A platform without native fullscreen, so the overlay tier is used.
    let surface = Arc::new(RecordingSurface::without_native_fullscreen());
    let chart = Chart::builder()
        .with_connector(get_connector())
        .with_surface(surface.clone())
        .marker_mode(SignalMode::Basic)
        .build()?;

    chart.set_timeframe(Timeframe::D5);
    chart.set_symbol("MSFT")?;
    println!("status: {}", chart.settled().await);

    chart.set_bollinger_enabled(true);
    println!(
        "EMA points: {}, upper band points: {}",
        surface.line(OverlayKind::Ema).len(),
        surface.line(OverlayKind::BollingerUpper).len()
    );

    chart.toggle_fullscreen();
    println!("fullscreen: {:?}", chart.fullscreen());
    tokio::time::sleep(Duration::from_millis(300)).await;
    chart.toggle_fullscreen();
    tokio::time::sleep(Duration::from_millis(300)).await;
    println!("resizes applied: {}", surface.resizes());

    chart.shutdown().await;
    Ok(())
}
