//! Test orchestration around the violation diagnostic pipeline.
//!
//! Wraps a test procedure with per-test log files and a violation
//! collector, triggers the AI analysis dispatch when violations were
//! recorded, and escalates a single aggregate failure carrying only the
//! violation count. The diagnostic tooling can never mask or alter the
//! authoritative test verdict.

pub mod config;
pub mod context;
pub mod wrapper;

pub use config::HarnessConfig;
pub use context::{TestContext, Violation};
pub use wrapper::{run_test, TestFailure, TestOutcome};
