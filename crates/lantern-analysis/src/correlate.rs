use std::path::Path;

/// Marker substring denoting a violation line in the test log.
pub const VIOLATION_MARKER: &str = "VIOLATION at ";

/// Unit suffix terminating the embedded timestamp.
pub const VIOLATION_UNIT: &str = " ps";

/// Extract violation timestamps (picoseconds) from a test log.
///
/// Scans line by line for [`VIOLATION_MARKER`] and parses the float
/// between the marker and the `" ps"` suffix. Lines that fail to parse
/// are skipped. Order and duplicates follow the file. A missing or
/// unreadable log yields an empty list, not an error, so the pipeline
/// can run against a test that produced no log at all.
pub fn violation_times(log_path: &Path) -> Vec<f64> {
    let Ok(text) = std::fs::read_to_string(log_path) else {
        return Vec::new();
    };

    let mut times = Vec::new();
    for line in text.lines() {
        let Some((_, rest)) = line.split_once(VIOLATION_MARKER) else {
            continue;
        };
        let Some((ts, _)) = rest.split_once(VIOLATION_UNIT) else {
            tracing::debug!(line, "violation line without unit suffix");
            continue;
        };
        match ts.trim().parse::<f64>() {
            Ok(t) => times.push(t),
            Err(_) => tracing::debug!(line, "violation line with unparseable timestamp"),
        }
    }
    times
}
