use crate::reconstruct::Timeline;

/// Serialize the selected timeline rows as CSV text.
///
/// Columns whose identifier starts with `drop_prefix` are removed before
/// serialization (mirrored duplicate-namespace signals). Each surviving
/// column is rendered in hexadecimal only if every defined value in it
/// converts; one inconvertible value (an `x`/`z` state, say) leaves the
/// whole column in its raw form, so a column never mixes representations.
/// Undefined cells render empty. Never fails.
pub fn render_csv(timeline: &Timeline, row_indices: &[usize], drop_prefix: &str) -> String {
    let columns: Vec<usize> = timeline
        .signals
        .iter()
        .enumerate()
        .filter(|(_, name)| drop_prefix.is_empty() || !name.starts_with(drop_prefix))
        .map(|(j, _)| j)
        .collect();

    // Hex eligibility is decided over the whole column, windowed or not,
    // so the same trace always renders a signal the same way.
    let hex_ok: Vec<bool> = columns
        .iter()
        .map(|&j| {
            timeline
                .rows
                .iter()
                .filter_map(|row| row[j].as_ref())
                .all(|v| v.to_hex().is_some())
        })
        .collect();

    let mut out = String::from("Time");
    for &j in &columns {
        out.push(',');
        out.push_str(&timeline.signals[j]);
    }
    out.push('\n');

    for &i in row_indices {
        out.push_str(&timeline.timestamps[i].to_string());
        for (k, &j) in columns.iter().enumerate() {
            out.push(',');
            match timeline.rows[i][j].as_ref() {
                Some(v) if hex_ok[k] => match v.to_hex() {
                    Some(hex) => out.push_str(&hex),
                    None => out.push_str(v.render()),
                },
                Some(v) => out.push_str(v.render()),
                None => {}
            }
        }
        out.push('\n');
    }

    out
}
