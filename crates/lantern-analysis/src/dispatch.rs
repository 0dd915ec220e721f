use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use lantern_timeline::{render_csv, select_rows, Timeline};
use lantern_trace::{TraceError, VcdTrace};

use crate::client::{AnalysisClient, ChatMessage};
use crate::correlate::violation_times;

/// Delimiters around a successful analysis block in the log.
pub const ANALYSIS_BEGIN: &str = "=== AI Analysis Output ===";
pub const ANALYSIS_END: &str = "=== End AI Analysis ===";

/// Prefix of the single-line note recorded when the service call fails.
pub const SERVICE_ERROR_PREFIX: &str = "Error: Failed to get response from Ollama - ";

/// Narrative used when the violation log is empty at dispatch time.
pub const EMPTY_LOG_SENTINEL: &str = "No violation found. Skip analysis";

/// Hard failures of the analysis path: a required input that cannot be
/// read. Service failures are not errors here; they are contained and
/// reported through [`AnalysisStatus`].
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("failed to read specification {path}: {source}")]
    Spec {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to load trace {path}: {source}")]
    Trace { path: PathBuf, source: TraceError },

    #[error("failed to append to log {path}: {source}")]
    Log {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What the dispatcher wrote to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStatus {
    /// The service replied and the analysis block was appended.
    Completed,
    /// The service call failed; the error note was appended instead.
    ServiceFailed,
}

/// Knobs the dispatcher needs from the run configuration.
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Model identifier passed to the service.
    pub model: String,
    /// Rows kept on each side of a violation row.
    pub window_radius: usize,
    /// Duplicate-namespace column prefix dropped from the CSV.
    pub drop_signal_prefix: String,
}

/// Run the full analysis chain and persist the outcome.
///
/// Correlates violation times out of `log_path`, reconstructs and windows
/// the waveform from `vcd_path`, assembles the chat request around the
/// specification at `spec_path`, and issues exactly one synchronous call.
/// The response (or a one-line error note) is appended to `log_path`;
/// prior log content is never touched. An empty violation log substitutes
/// [`EMPTY_LOG_SENTINEL`] as the narrative and the call still proceeds.
pub fn run_analysis(
    spec_path: &Path,
    vcd_path: &Path,
    log_path: &Path,
    options: &DispatchOptions,
    client: &dyn AnalysisClient,
) -> Result<AnalysisStatus, AnalysisError> {
    let specs = std::fs::read_to_string(spec_path).map_err(|source| AnalysisError::Spec {
        path: spec_path.to_path_buf(),
        source,
    })?;
    let specs = specs.trim().to_string();

    let times = violation_times(log_path);

    let trace = VcdTrace::load(vcd_path).map_err(|source| AnalysisError::Trace {
        path: vcd_path.to_path_buf(),
        source,
    })?;
    let timeline = Timeline::reconstruct(&trace);
    let rows = select_rows(&timeline, &times, options.window_radius);
    let waveform_csv = render_csv(&timeline, &rows, &options.drop_signal_prefix);

    let narrative = match std::fs::read_to_string(log_path) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => EMPTY_LOG_SENTINEL.to_string(),
    };

    let messages = [
        system_prompt(),
        ChatMessage::user(format!(
            "SPECIFICATION: {specs}\nWAVEFORM: {waveform_csv}\nVIOLATION: {narrative}\nEnd of user input"
        )),
    ];

    tracing::info!(model = %options.model, violations = times.len(), "dispatching analysis");

    match client.chat(&options.model, &messages) {
        Ok(reply) => {
            append_to_log(log_path, &format!("\n{ANALYSIS_BEGIN}\n{reply}\n{ANALYSIS_END}\n"))?;
            Ok(AnalysisStatus::Completed)
        }
        Err(err) => {
            tracing::warn!(error = %err, "analysis service call failed");
            append_to_log(log_path, &format!("\n{SERVICE_ERROR_PREFIX}{err}\n"))?;
            Ok(AnalysisStatus::ServiceFailed)
        }
    }
}

fn append_to_log(log_path: &Path, text: &str) -> Result<(), AnalysisError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|source| AnalysisError::Log {
            path: log_path.to_path_buf(),
            source,
        })?;
    file.write_all(text.as_bytes())
        .map_err(|source| AnalysisError::Log {
            path: log_path.to_path_buf(),
            source,
        })
}

/// Fixed system instruction describing the CSV contract to the model.
fn system_prompt() -> ChatMessage {
    ChatMessage::system(
        "You are an expert in RTL waveform analysis and will be given three inputs from the user.\n\
         Waveform data in csv format marked by \"WAVEFORM:\" identifier.\n\
         Design specifications in text format marked by \"SPECIFICATION:\" identifier.\n\
         Violation description in text format marked by \"VIOLATION:\" identifier.\n\
         Important notes about csv waveform data:\n\
         1. The first row indicates the signal names. The first column is simulation timing (unit is picoseconds unless otherwise specified). A row is added whenever a signal toggles.\n\
         2. A toggle is strictly defined as a signal transition from 0->1 or 1->0. Do not infer toggles from outside the CSV data.\n\
         3. If a clock signal is present, pay close attention to signal toggling in relation to clock values.\n\
         4. Values will likely be converted to hex format for ease of interpretation. Additionally, do not assume this is the complete waveform.\n\
         Your task is the following:\n\
         1. Interpret the data given design specifications and violation descriptions.\n\
         2. Suggest 3 possible reasons for the violations in order of highest to lowest confidence.\n\
         3. Return findings in a concise bulleted list format.",
    )
}
