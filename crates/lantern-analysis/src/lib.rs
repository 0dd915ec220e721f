//! Violation-log correlation and AI analysis dispatch.
//!
//! Ties the pipeline together: violation timestamps come from re-parsing
//! the test's log file, the windowed waveform CSV comes from the timeline
//! crates, and the combined request goes to an Ollama-compatible chat
//! endpoint in one synchronous call. Whatever comes back (or fails to) is
//! appended to the log; the verdict of the test is never affected by the
//! analysis step.

pub mod client;
pub mod correlate;
pub mod dispatch;

pub use client::{AnalysisClient, ChatMessage, ClientError, OllamaClient};
pub use correlate::violation_times;
pub use dispatch::{
    run_analysis, AnalysisError, AnalysisStatus, DispatchOptions, ANALYSIS_BEGIN, ANALYSIS_END,
    EMPTY_LOG_SENTINEL, SERVICE_ERROR_PREFIX,
};
