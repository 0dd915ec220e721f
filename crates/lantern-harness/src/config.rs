use std::path::{Path, PathBuf};

use lantern_analysis::DispatchOptions;
use serde::{Deserialize, Serialize};

/// Run configuration for the test harness.
///
/// Constructed once at process start and passed by reference to every
/// component; nothing here lives in process-wide statics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Directory receiving per-test log files.
    pub results_dir: PathBuf,
    /// Whether violations trigger the AI analysis dispatch.
    pub analysis_enabled: bool,
    /// Model identifier passed to the text-generation service.
    pub model: String,
    /// Rows kept on each side of a violation row in the waveform CSV.
    pub window_radius: usize,
    /// Duplicate-namespace signal prefix dropped from the CSV.
    pub drop_signal_prefix: String,
    /// Base URL of the Ollama-compatible endpoint.
    pub ollama_base_url: String,
    /// Design specification file, resolved against the working directory.
    pub spec_file: PathBuf,
    /// Trace dump file name. Relative names resolve against the parent of
    /// `results_dir`: the simulator writes its dump beside, not inside,
    /// the results directory.
    pub vcd_file: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            analysis_enabled: true,
            model: "mistral".to_string(),
            window_radius: 10,
            drop_signal_prefix: "$rootio".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            spec_file: PathBuf::from("spec.txt"),
            vcd_file: PathBuf::from("dump.vcd"),
        }
    }
}

impl HarnessConfig {
    /// Default configuration with the results directory taken from the
    /// `RESULTS_DIR` environment variable when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var("RESULTS_DIR") {
            config.results_dir = PathBuf::from(dir);
        }
        config
    }

    /// Resolved path of the trace dump.
    pub fn vcd_path(&self) -> PathBuf {
        if self.vcd_file.is_absolute() {
            self.vcd_file.clone()
        } else {
            self.results_dir
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(&self.vcd_file)
        }
    }

    /// The dispatcher's slice of this configuration.
    pub fn dispatch_options(&self) -> DispatchOptions {
        DispatchOptions {
            model: self.model.clone(),
            window_radius: self.window_radius,
            drop_signal_prefix: self.drop_signal_prefix.clone(),
        }
    }
}
