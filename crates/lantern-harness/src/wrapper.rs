use lantern_analysis::{run_analysis, AnalysisClient, AnalysisError};

use crate::config::HarnessConfig;
use crate::context::TestContext;

/// Terminal state of one instrumented test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    Passed,
    FailedNoAnalysis,
    FailedWithAnalysis,
}

/// Failure escalated by the wrapper.
///
/// The aggregate violation failure reports only the count; per-violation
/// detail stays in the log. A procedure error or a hard analysis error
/// that coincides with violations rides along in the same value rather
/// than displacing it, so neither signal is ever silently dropped.
#[derive(Debug, thiserror::Error)]
pub enum TestFailure {
    #[error("{count} violations detected in test '{test_name}'")]
    Violations {
        test_name: String,
        count: usize,
        outcome: TestOutcome,
        procedure_error: Option<anyhow::Error>,
        analysis_error: Option<AnalysisError>,
    },

    #[error("test '{test_name}' procedure failed: {error}")]
    Procedure {
        test_name: String,
        error: anyhow::Error,
    },

    #[error("failed to set up logs for test '{test_name}': {source}")]
    Setup {
        test_name: String,
        source: std::io::Error,
    },
}

/// Run `procedure` under violation instrumentation.
///
/// INIT: create the results directory and truncate both per-test logs.
/// RUNNING: hand the procedure mutable access to the context so it can
/// record violations and log lines. On completion of every exit path
/// (normal return or procedure error) the same sequence runs: flush the
/// logs, dispatch the analysis if violations were recorded and analysis
/// is enabled, then settle the verdict. A non-empty collector always
/// escalates [`TestFailure::Violations`]; the procedure's own error
/// surfaces inside it, or alone via [`TestFailure::Procedure`] when no
/// violations accumulated.
pub fn run_test<F>(
    test_name: &str,
    config: &HarnessConfig,
    client: &dyn AnalysisClient,
    procedure: F,
) -> Result<TestOutcome, TestFailure>
where
    F: FnOnce(&mut TestContext) -> anyhow::Result<()>,
{
    let mut ctx =
        TestContext::create(&config.results_dir, test_name).map_err(|source| TestFailure::Setup {
            test_name: test_name.to_string(),
            source,
        })?;

    let procedure_result = procedure(&mut ctx);
    ctx.flush();

    let count = ctx.violation_count();
    if count == 0 {
        return match procedure_result {
            Ok(()) => Ok(TestOutcome::Passed),
            Err(error) => Err(TestFailure::Procedure {
                test_name: test_name.to_string(),
                error,
            }),
        };
    }

    let (outcome, analysis_error) = if config.analysis_enabled {
        let result = run_analysis(
            &config.spec_file,
            &config.vcd_path(),
            ctx.error_log_path(),
            &config.dispatch_options(),
            client,
        );
        if let Err(ref err) = result {
            tracing::warn!(error = %err, "analysis dispatch failed");
        }
        (TestOutcome::FailedWithAnalysis, result.err())
    } else {
        (TestOutcome::FailedNoAnalysis, None)
    };

    Err(TestFailure::Violations {
        test_name: test_name.to_string(),
        count,
        outcome,
        procedure_error: procedure_result.err(),
        analysis_error,
    })
}
