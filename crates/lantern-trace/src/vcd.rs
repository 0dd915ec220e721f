use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::value::SignalValue;

/// Errors that can occur while loading a VCD trace.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("format error: {0}")]
    Format(String),
}

/// A parsed VCD trace: hierarchical signal names in declaration order
/// plus per-signal ordered change histories in picoseconds.
///
/// Within one signal, timestamps are non-decreasing and same-time
/// duplicates are preserved in file order.
#[derive(Debug, Clone)]
pub struct VcdTrace {
    /// Picoseconds per VCD time unit.
    pub ps_per_unit: u64,
    /// Hierarchical dotted signal names, in declaration order.
    pub signals: Vec<String>,
    /// Per-signal `(time_ps, value)` change lists, parallel to `signals`.
    pub events: Vec<Vec<(u64, SignalValue)>>,
}

impl VcdTrace {
    /// Build a trace directly from per-signal histories (timestamps in ps).
    pub fn from_signals(signals: Vec<(String, Vec<(u64, SignalValue)>)>) -> Self {
        let (signals, events) = signals.into_iter().unzip();
        Self {
            ps_per_unit: 1,
            signals,
            events,
        }
    }

    /// Loads a VCD trace from a filesystem path.
    pub fn load(path: &Path) -> Result<Self, TraceError> {
        let file = std::fs::File::open(path)?;
        Self::parse(std::io::BufReader::new(file))
    }

    /// Parses VCD text from a buffered reader.
    ///
    /// The header is accumulated as a token stream up to `$enddefinitions`,
    /// so multi-line `$var`/`$scope` declarations need no special casing.
    /// In the value-change section, malformed lines and unknown id codes
    /// are skipped with a warning rather than aborting the load.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, TraceError> {
        let mut lines = reader.lines();

        let mut header_tokens: Vec<String> = Vec::new();
        let mut saw_enddefinitions = false;
        'header: for line_result in lines.by_ref() {
            for tok in line_result?.split_whitespace() {
                if tok == "$enddefinitions" {
                    saw_enddefinitions = true;
                    break 'header;
                }
                header_tokens.push(tok.to_string());
            }
        }

        let header = parse_header(&header_tokens)?;
        let mut events: Vec<Vec<(u64, SignalValue)>> = vec![Vec::new(); header.signals.len()];
        let mut current_time_ps: u64 = 0;

        for line_result in lines {
            let line = line_result?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('$') {
                // $end of the enddefinitions directive, $dumpvars wrappers.
                continue;
            }

            if let Some(time_str) = trimmed.strip_prefix('#') {
                match time_str.parse::<u64>() {
                    Ok(t) => current_time_ps = t.saturating_mul(header.ps_per_unit),
                    Err(_) => {
                        tracing::warn!(line = %trimmed, "skipping unparseable timestamp");
                    }
                }
                continue;
            }

            if let Some((id, value)) = parse_value_change(trimmed) {
                match header.id_to_idx.get(&id) {
                    Some(&idx) => events[idx].push((current_time_ps, value)),
                    None => tracing::warn!(id = %id, "value change for undeclared id code"),
                }
            } else {
                tracing::warn!(line = %trimmed, "skipping malformed value change");
            }
        }

        if !saw_enddefinitions && !header.signals.is_empty() {
            return Err(TraceError::Format("missing $enddefinitions".to_string()));
        }

        Ok(Self {
            ps_per_unit: header.ps_per_unit,
            signals: header.signals,
            events,
        })
    }
}

struct Header {
    ps_per_unit: u64,
    signals: Vec<String>,
    id_to_idx: HashMap<String, usize>,
}

/// Interpret the header token stream: `$timescale`, `$scope`/`$upscope`
/// nesting, and `$var` declarations. Unrecognized directives are skipped
/// to their `$end`.
fn parse_header(tokens: &[String]) -> Result<Header, TraceError> {
    let mut ps_per_unit: u64 = 1;
    let mut signals: Vec<String> = Vec::new();
    let mut id_to_idx: HashMap<String, usize> = HashMap::new();
    let mut scope_stack: Vec<String> = Vec::new();

    let mut iter = tokens.iter();
    while let Some(tok) = iter.next() {
        if !tok.starts_with('$') {
            continue;
        }
        let body: Vec<&str> = iter
            .by_ref()
            .map(String::as_str)
            .take_while(|t| *t != "$end")
            .collect();
        match tok.as_str() {
            "$timescale" => {
                ps_per_unit = parse_timescale(&body.join(" "))?;
            }
            "$scope" => {
                // $scope <type> <name>
                if let Some(name) = body.get(1) {
                    scope_stack.push((*name).to_string());
                }
            }
            "$upscope" => {
                scope_stack.pop();
            }
            "$var" => {
                // $var <type> <width> <id> <reference...>
                if body.len() < 4 {
                    tracing::warn!(var = %body.join(" "), "skipping malformed $var");
                    continue;
                }
                let id = body[2].to_string();
                let reference = body[3..].join(" ");
                let mut name = scope_stack.join(".");
                if !name.is_empty() {
                    name.push('.');
                }
                name.push_str(&reference);
                id_to_idx.insert(id, signals.len());
                signals.push(name);
            }
            // $date, $version, $comment and anything else: body already skipped.
            _ => {}
        }
    }

    Ok(Header {
        ps_per_unit,
        signals,
        id_to_idx,
    })
}

/// Parse a `$timescale` body like `1ps` or `10 ns` into picoseconds per unit.
fn parse_timescale(body: &str) -> Result<u64, TraceError> {
    let compact: String = body.split_whitespace().collect();
    let split = compact
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| TraceError::Format(format!("bad timescale: {body}")))?;
    let (mag, unit) = compact.split_at(split);
    let mag: u64 = mag
        .parse()
        .map_err(|_| TraceError::Format(format!("bad timescale magnitude: {body}")))?;
    let ps = match unit {
        "ps" => 1,
        "ns" => 1_000,
        "us" => 1_000_000,
        "ms" => 1_000_000_000,
        "s" => 1_000_000_000_000,
        other => {
            return Err(TraceError::Format(format!(
                "unsupported timescale unit: {other}"
            )))
        }
    };
    Ok(mag.saturating_mul(ps))
}

/// Parse one value-change line: scalar (`1!`) or vector (`b1010 !` / `r1.5 !`).
///
/// Real-valued changes are carried as vectors so downstream rendering stays
/// lossless; they simply never hex-convert.
fn parse_value_change(line: &str) -> Option<(String, SignalValue)> {
    let mut chars = line.chars();
    let first = chars.next()?;
    match first {
        'b' | 'B' | 'r' | 'R' => {
            let (bits, id) = line[1..].trim().split_once(char::is_whitespace)?;
            Some((id.trim().to_string(), SignalValue::Vector(bits.to_string())))
        }
        '0' | '1' | 'x' | 'X' | 'z' | 'Z' => {
            let id = chars.as_str().trim();
            if id.is_empty() {
                return None;
            }
            Some((id.to_string(), SignalValue::from_scalar(first)))
        }
        _ => None,
    }
}
