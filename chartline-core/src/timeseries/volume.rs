use chartline_types::{Candle, VolumeBar};

/// One histogram bar per candle, colored `up` when `close >= open` and
/// `down` otherwise.
#[must_use]
pub fn volume_bars(candles: &[Candle], up: &str, down: &str) -> Vec<VolumeBar> {
    candles
        .iter()
        .map(|c| VolumeBar {
            time: c.time,
            value: c.volume,
            color: (if c.is_up() { up } else { down }).to_string(),
        })
        .collect()
}
