//! Build outcome reporting and exit code mapping

use crate::exit_codes;
use crate::outcome::{BuildOutcome, BuildStatus};
use crate::output::{format_size, Output};

/// Exit code for a build status. Every status maps to exactly one code.
pub fn exit_code_for(status: BuildStatus) -> i32 {
    match status {
        BuildStatus::Succeeded => exit_codes::SUCCESS,
        BuildStatus::Failed => exit_codes::BUILD_FAILED,
        BuildStatus::Cancelled => exit_codes::BUILD_CANCELLED,
        BuildStatus::Unknown => exit_codes::BUILD_UNKNOWN,
    }
}

/// Turns a build outcome into a printable summary
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultReporter;

impl ResultReporter {
    pub fn new() -> Self {
        Self
    }

    /// Summarize an outcome. The same outcome always renders the same way.
    pub fn report(&self, outcome: &BuildOutcome) -> Output {
        let summary = &outcome.summary;
        let exit_code = exit_code_for(outcome.status);

        let message = match outcome.status {
            BuildStatus::Succeeded => format!(
                "Build succeeded ({})",
                format_size(summary.total_size)
            ),
            BuildStatus::Failed => format!(
                "Build failed with {} error(s)",
                summary.total_errors
            ),
            BuildStatus::Cancelled => "Build cancelled".to_string(),
            BuildStatus::Unknown => "Build finished with an unexpected result".to_string(),
        };

        let mut output = if outcome.status == BuildStatus::Succeeded {
            Output::success("build", message)
        } else {
            Output::failure("build", message)
        };

        output = output
            .with_exit_code(exit_code)
            .with_duration(summary.total_time_ms)
            .with_build(summary)
            .with_output("result", outcome.status.as_str())
            .with_output("exit_code", exit_code.to_string())
            .with_output("output_path", summary.output_path.to_string_lossy())
            .with_output("output_size", summary.total_size.to_string());

        if let Some(ref platform) = summary.platform {
            output = output.with_output("platform", platform);
        }

        output
    }
}
