use lantern_timeline::{render_csv, select_rows, Timeline};
use lantern_trace::{SignalValue, VcdTrace};

fn v(bits: &str) -> SignalValue {
    SignalValue::Vector(bits.to_string())
}

fn sample_timeline() -> Timeline {
    Timeline::reconstruct(&VcdTrace::from_signals(vec![
        (
            "clk".to_string(),
            vec![(0, SignalValue::Zero), (5, SignalValue::One)],
        ),
        ("bus[3:0]".to_string(), vec![(0, v("1010")), (5, v("1111"))]),
        (
            "$rootio.clk".to_string(),
            vec![(0, SignalValue::Zero), (5, SignalValue::One)],
        ),
    ]))
}

#[test]
fn test_header_and_rows() {
    let timeline = sample_timeline();
    let all = select_rows(&timeline, &[], 10);
    let csv = render_csv(&timeline, &all, "$rootio");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Time,clk,bus[3:0]");
    assert_eq!(lines[1], "0,0x0,0xa");
    assert_eq!(lines[2], "5,0x1,0xf");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_duplicate_namespace_columns_are_dropped() {
    let timeline = sample_timeline();
    let all = select_rows(&timeline, &[], 10);
    let csv = render_csv(&timeline, &all, "$rootio");
    assert!(!csv.contains("$rootio"));

    // An empty prefix disables the drop.
    let csv = render_csv(&timeline, &all, "");
    assert!(csv.contains("$rootio.clk"));
}

#[test]
fn test_one_bad_value_keeps_whole_column_raw() {
    let timeline = Timeline::reconstruct(&VcdTrace::from_signals(vec![(
        "bus[3:0]".to_string(),
        vec![(0, v("xxxx")), (5, v("1010"))],
    )]));
    let all = select_rows(&timeline, &[], 10);
    let csv = render_csv(&timeline, &all, "$rootio");
    let lines: Vec<&str> = csv.lines().collect();
    // The x-state row blocks hex conversion for the entire column.
    assert_eq!(lines[1], "0,xxxx");
    assert_eq!(lines[2], "5,1010");
}

#[test]
fn test_undefined_cells_render_empty() {
    let timeline = Timeline::reconstruct(&VcdTrace::from_signals(vec![
        ("clk".to_string(), vec![(0, SignalValue::Zero)]),
        ("late".to_string(), vec![(5, SignalValue::One)]),
    ]));
    let all = select_rows(&timeline, &[], 10);
    let csv = render_csv(&timeline, &all, "$rootio");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[1], "0,0x0,");
    assert_eq!(lines[2], "5,0x0,0x1");
}

#[test]
fn test_windowed_csv_contains_only_selected_rows() {
    let timeline = sample_timeline();
    let rows = select_rows(&timeline, &[5.0], 0);
    let csv = render_csv(&timeline, &rows, "$rootio");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("5,"));
}

#[test]
fn test_empty_timeline_renders_header_only() {
    let timeline = Timeline::reconstruct(&VcdTrace::from_signals(vec![]));
    let csv = render_csv(&timeline, &[], "$rootio");
    assert_eq!(csv, "Time\n");
}
