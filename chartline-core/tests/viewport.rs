use chartline_core::{VisibleRange, initial_visible_range};

#[test]
fn long_series_shows_last_window() {
    assert_eq!(
        initial_visible_range(500, 100),
        Some(VisibleRange {
            from_index: 400,
            to_index: 499
        })
    );
}

#[test]
fn short_series_shows_everything() {
    let r = initial_visible_range(30, 100).unwrap();
    assert_eq!((r.from_index, r.to_index), (0, 29));
    assert_eq!(r.len(), 30);
}

#[test]
fn empty_series_has_no_range() {
    assert_eq!(initial_visible_range(0, 100), None);
}

#[test]
fn zero_window_shows_last_candle() {
    let r = initial_visible_range(5, 0).unwrap();
    assert_eq!((r.from_index, r.to_index), (4, 4));
}
