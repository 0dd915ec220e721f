use lantern_timeline::{select_rows, Timeline};
use lantern_trace::{SignalValue, VcdTrace};

fn v(bits: &str) -> SignalValue {
    SignalValue::Vector(bits.to_string())
}

/// clk toggling every 5 ps plus two buses changing on some edges.
fn fifo_trace() -> VcdTrace {
    VcdTrace::from_signals(vec![
        (
            "clk".to_string(),
            vec![
                (140, SignalValue::Zero),
                (145, SignalValue::One),
                (150, SignalValue::Zero),
                (155, SignalValue::One),
                (160, SignalValue::Zero),
                (165, SignalValue::One),
                (170, SignalValue::Zero),
                (175, SignalValue::One),
            ],
        ),
        (
            "din[3:0]".to_string(),
            vec![(140, v("0001")), (150, v("0010")), (170, v("0011"))],
        ),
        (
            "dout[3:0]".to_string(),
            vec![(145, v("0001")), (155, v("0111")), (175, v("0010"))],
        ),
    ])
}

#[test]
fn test_reconstruction_is_deterministic() {
    let trace = fifo_trace();
    let a = Timeline::reconstruct(&trace);
    let b = Timeline::reconstruct(&trace);
    assert_eq!(a.timestamps, b.timestamps);
    assert_eq!(a.rows, b.rows);
}

#[test]
fn test_timestamps_are_the_sorted_union() {
    let timeline = Timeline::reconstruct(&fifo_trace());
    assert_eq!(
        timeline.timestamps,
        vec![140, 145, 150, 155, 160, 165, 170, 175]
    );
}

#[test]
fn test_last_value_hold() {
    let timeline = Timeline::reconstruct(&fifo_trace());
    // din changes at 140 and 150; at 145 it must carry the 140 value.
    let r145 = timeline.row_index(145).unwrap();
    assert_eq!(timeline.rows[r145][1], Some(v("0001")));
    // dout has no event before 145.
    let r140 = timeline.row_index(140).unwrap();
    assert_eq!(timeline.rows[r140][2], None);
}

#[test]
fn test_zero_event_signal_is_all_undefined() {
    let trace = VcdTrace::from_signals(vec![
        (
            "clk".to_string(),
            vec![(0, SignalValue::Zero), (5, SignalValue::One)],
        ),
        ("floating".to_string(), vec![]),
    ]);
    let timeline = Timeline::reconstruct(&trace);
    assert_eq!(timeline.len(), 2);
    for row in &timeline.rows {
        assert_eq!(row[1], None);
    }
}

#[test]
fn test_zero_signals_yields_empty_timeline() {
    let timeline = Timeline::reconstruct(&VcdTrace::from_signals(vec![]));
    assert!(timeline.is_empty());
    assert!(timeline.signals.is_empty());
    assert!(timeline.rows.is_empty());
}

#[test]
fn test_same_timestamp_last_listed_event_wins() {
    let trace = VcdTrace::from_signals(vec![(
        "glitchy".to_string(),
        vec![
            (10, SignalValue::Zero),
            (10, SignalValue::One),
            (10, SignalValue::Zero),
        ],
    )]);
    let timeline = Timeline::reconstruct(&trace);
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline.rows[0][0], Some(SignalValue::Zero));
}

#[test]
fn test_window_clips_and_merges() {
    let timeline = Timeline::reconstruct(&fifo_trace());
    // Windows around 145 (idx 1) and 150 (idx 2) with radius 2 overlap;
    // the union is rows 0..=4 with no duplicates.
    let rows = select_rows(&timeline, &[145.0, 150.0], 2);
    assert_eq!(rows, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_window_clips_at_upper_bound() {
    let timeline = Timeline::reconstruct(&fifo_trace());
    let rows = select_rows(&timeline, &[175.0], 3);
    assert_eq!(rows, vec![4, 5, 6, 7]);
}

#[test]
fn test_unmatched_violation_time_contributes_nothing() {
    let timeline = Timeline::reconstruct(&fifo_trace());
    // 142 is between rows; 155.5 has a fractional part; neither matches.
    let rows = select_rows(&timeline, &[142.0, 155.5], 2);
    assert!(rows.is_empty());
}

#[test]
fn test_empty_violation_list_keeps_full_timeline() {
    let timeline = Timeline::reconstruct(&fifo_trace());
    let rows = select_rows(&timeline, &[], 2);
    assert_eq!(rows, (0..8).collect::<Vec<_>>());
}

#[test]
fn test_violation_at_155_with_radius_2() {
    let timeline = Timeline::reconstruct(&fifo_trace());
    let rows = select_rows(&timeline, &[155.0], 2);
    assert!(rows.len() <= 5);
    assert!(rows.iter().any(|&i| timeline.timestamps[i] == 155));
}
