use chartline_core::{
    Candle, ChartPalette, MarkerPosition, MarkerShape, RawSignal, SignalSide, classify,
    marker_label, normalize_signals,
};

fn candles(times: &[i64]) -> Vec<Candle> {
    times
        .iter()
        .map(|&time| Candle {
            time,
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
            volume: 0.0,
        })
        .collect()
}

fn shaped(time: i64, shape: &str) -> RawSignal {
    RawSignal {
        time: Some(time),
        shape: Some(shape.to_string()),
        ..RawSignal::default()
    }
}

fn texted(time: i64, text: &str) -> RawSignal {
    RawSignal {
        time: Some(time),
        text: Some(text.to_string()),
        ..RawSignal::default()
    }
}

#[test]
fn explicit_type_wins_over_shape_and_text() {
    let mut s = RawSignal::typed(1, "SELL");
    s.shape = Some("arrowUp".into());
    s.text = Some("strong buy".into());
    assert_eq!(classify(&s), Some(SignalSide::Sell));
}

#[test]
fn shape_wins_over_text() {
    let mut s = shaped(1, "arrowDown");
    s.text = Some("buy the dip".into());
    assert_eq!(classify(&s), Some(SignalSide::Sell));
}

#[test]
fn unknown_type_falls_through_to_shape() {
    let mut s = RawSignal::typed(1, "HOLD");
    s.shape = Some("arrowUp".into());
    assert_eq!(classify(&s), Some(SignalSide::Buy));
}

#[test]
fn text_match_is_case_insensitive() {
    assert_eq!(classify(&texted(1, "Strong SELL pressure")), Some(SignalSide::Sell));
    assert_eq!(classify(&texted(1, "BuY")), Some(SignalSide::Buy));
}

#[test]
fn unmatched_signal_is_unclassified() {
    assert_eq!(classify(&texted(1, "neutral")), None);
    assert_eq!(classify(&RawSignal::default()), None);
}

#[test]
fn buy_type_maps_to_below_bar_arrow_up() {
    let markers = normalize_signals(
        &[RawSignal::typed(60, "BUY")],
        &candles(&[60]),
        &ChartPalette::default(),
    );
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].position, MarkerPosition::BelowBar);
    assert_eq!(markers[0].shape, MarkerShape::ArrowUp);
    assert_eq!(markers[0].color, ChartPalette::default().buy);
}

#[test]
fn sell_type_maps_to_above_bar_arrow_down() {
    let markers = normalize_signals(
        &[RawSignal::typed(60, "sell")],
        &candles(&[60]),
        &ChartPalette::default(),
    );
    assert_eq!(markers[0].position, MarkerPosition::AboveBar);
    assert_eq!(markers[0].shape, MarkerShape::ArrowDown);
}

#[test]
fn label_formats() {
    assert_eq!(marker_label(SignalSide::Buy, None, None), "▲ BUY");
    assert_eq!(marker_label(SignalSide::Sell, Some(187.5), None), "▼ SELL $187.50");
    assert_eq!(
        marker_label(SignalSide::Buy, Some(10.0), Some(0.853)),
        "▲ BUY $10.00 (85%)"
    );
    assert_eq!(marker_label(SignalSide::Sell, None, Some(72.0)), "▼ SELL (72%)");
    assert_eq!(marker_label(SignalSide::Buy, Some(f64::NAN), None), "▲ BUY");
}

#[test]
fn unaligned_and_timeless_signals_are_dropped_and_rest_sorted() {
    let signals = vec![
        RawSignal::typed(180, "SELL"),
        RawSignal::typed(90, "BUY"),
        RawSignal::typed(60, "BUY"),
        RawSignal {
            kind: Some("BUY".into()),
            ..RawSignal::default()
        },
        texted(120, "hold"),
    ];
    let markers = normalize_signals(&signals, &candles(&[60, 120, 180]), &ChartPalette::default());
    let times: Vec<i64> = markers.iter().map(|m| m.time).collect();
    assert_eq!(times, vec![60, 180]);
}

#[test]
fn empty_list_yields_no_markers() {
    assert!(normalize_signals(&[], &candles(&[60]), &ChartPalette::default()).is_empty());
}
