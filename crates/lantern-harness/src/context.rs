use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One assertion-style violation recorded by a test procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub time_ps: f64,
    pub message: String,
}

/// Per-test context handed to the wrapped procedure.
///
/// Owns the violation collector and both log files for the duration of
/// one RUNNING test. The logs are truncated on creation and append-only
/// afterwards; nothing else writes to them during the run. Violations
/// land in the error log in the exact line form the correlator re-parses
/// later, which is what allows reanalysis from the log alone.
pub struct TestContext {
    test_name: String,
    violations: Vec<Violation>,
    log: File,
    error_log: File,
    error_log_path: PathBuf,
}

impl TestContext {
    /// Create the context for `test_name`, truncating both log files.
    pub fn create(results_dir: &Path, test_name: &str) -> std::io::Result<Self> {
        std::fs::create_dir_all(results_dir)?;
        let log_path = results_dir.join(format!("{test_name}.log"));
        let error_log_path = results_dir.join(format!("{test_name}_error.log"));
        Ok(Self {
            test_name: test_name.to_string(),
            violations: Vec::new(),
            log: File::create(log_path)?,
            error_log: File::create(&error_log_path)?,
            error_log_path,
        })
    }

    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    /// Record a violation: collected in memory and written to both logs.
    ///
    /// Log write failures are traced and swallowed; losing a log line
    /// must not change what the test observed.
    pub fn record_violation(&mut self, time_ps: f64, message: &str) {
        let line = format!("VIOLATION at {time_ps} ps: {message}");
        if let Err(err) = writeln!(self.log, "{line}") {
            tracing::warn!(error = %err, "failed to write violation to test log");
        }
        if let Err(err) = writeln!(self.error_log, "{line}") {
            tracing::warn!(error = %err, "failed to write violation to error log");
        }
        self.violations.push(Violation {
            time_ps,
            message: message.to_string(),
        });
    }

    /// Write an informational line to the main test log only.
    pub fn log_info(&mut self, message: &str) {
        if let Err(err) = writeln!(self.log, "{message}") {
            tracing::warn!(error = %err, "failed to write to test log");
        }
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub(crate) fn error_log_path(&self) -> &Path {
        &self.error_log_path
    }

    /// Flush both logs before anything else reads them.
    pub(crate) fn flush(&mut self) {
        if let Err(err) = self.log.flush() {
            tracing::warn!(error = %err, "failed to flush test log");
        }
        if let Err(err) = self.error_log.flush() {
            tracing::warn!(error = %err, "failed to flush error log");
        }
    }
}
