//! Classification of process outcomes into capture results.
//!
//! Success requires both a zero exit code and the artifact on disk. Any
//! other combination, and any supervision fault short of losing the child,
//! becomes a [`CaptureError`] recorded in the result.

use super::result::{CaptureError, CaptureErrorKind, CaptureOutput, CaptureStatus};
use super::supervisor::{ProcessOutcome, RunFault};
use crate::error::{PagesnapError, Result};
use crate::fs::normalize_permissions;
use std::path::Path;
use tracing::debug;

/// Number of trailing output lines kept as tail hints.
pub const TAIL_HINT_LINES: usize = 5;

/// Classified status, output and hints of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub status: CaptureStatus,
    pub output: CaptureOutput,
    pub hints: Vec<String>,
}

impl Classification {
    fn failed(error: CaptureError, hints: Vec<String>) -> Self {
        Self {
            status: CaptureStatus::Failed,
            output: CaptureOutput::Error(error),
            hints,
        }
    }
}

/// The synthetic first hint naming the observed exit code.
pub fn exit_code_hint(exit_code: i32) -> String {
    format!("Got single-file response code: {}.", exit_code)
}

/// The synthetic first hint when the tool never ran, so there is no exit code.
pub fn launch_failure_hint(program: &str) -> String {
    format!("Got no single-file response: '{}' could not be started.", program)
}

/// Exit-code hint followed by the last non-empty output lines (trimmed,
/// original order). The tool's own summary usually sits on the last line.
pub fn tail_hints(exit_code: i32, output: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(output);
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let tail = &lines[lines.len().saturating_sub(TAIL_HINT_LINES)..];

    std::iter::once(exit_code_hint(exit_code))
        .chain(tail.iter().map(|line| line.to_string()))
        .collect()
}

/// Every line of the captured output, for failure diagnostics.
pub fn full_output_hints(output: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(output)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Classify a finished process.
///
/// On success the artifact's permissions are set to `output_mode`; failing
/// to do so is fatal since the archive would be left in an unknown state.
pub fn classify(
    outcome: &ProcessOutcome,
    out_dir: &Path,
    artifact: &str,
    output_mode: u32,
) -> Result<Classification> {
    let hints = tail_hints(outcome.exit_code, &outcome.output);
    let artifact_path = out_dir.join(artifact);
    let artifact_present = artifact_path.is_file();

    let kind = match (outcome.exit_code, artifact_present) {
        (0, true) => None,
        (0, false) => Some(CaptureErrorKind::MissingArtifact),
        _ => Some(CaptureErrorKind::NonZeroExit),
    };

    let Some(kind) = kind else {
        normalize_permissions(&artifact_path, output_mode)?;
        return Ok(Classification {
            status: CaptureStatus::Succeeded,
            output: CaptureOutput::Artifact(artifact.to_string()),
            hints,
        });
    };

    let message = match kind {
        CaptureErrorKind::MissingArtifact => format!(
            "SingleFile exited without writing {} (status={})",
            artifact, outcome.exit_code
        ),
        _ => format!(
            "SingleFile was not able to archive the page (status={})",
            outcome.exit_code
        ),
    };
    debug!(?kind, exit_code = outcome.exit_code, "capture classified as failed");

    let error = CaptureError::new(kind, message, full_output_hints(&outcome.output));
    Ok(Classification::failed(error, hints))
}

/// Classify a supervision fault. Losing track of the child is the only
/// fault that cannot be recorded and is returned as an error.
pub fn classify_fault(fault: RunFault) -> Result<Classification> {
    match fault {
        RunFault::Launch { program, source } => {
            let detail = source.to_string();
            let error = CaptureError::new(
                CaptureErrorKind::ToolUnavailable,
                format!("SingleFile binary '{}' could not be started: {}", program, detail),
                vec![detail.clone()],
            );
            let hints = vec![launch_failure_hint(&program), detail];
            Ok(Classification::failed(error, hints))
        }
        RunFault::TimedOut {
            timeout, partial, ..
        } => {
            let error = CaptureError::new(
                CaptureErrorKind::Timeout,
                format!(
                    "SingleFile did not finish within {}s and was killed",
                    timeout.as_secs_f64()
                ),
                full_output_hints(&partial.output),
            );
            Ok(Classification::failed(
                error,
                tail_hints(partial.exit_code, &partial.output),
            ))
        }
        fault @ RunFault::Io { .. } => Err(PagesnapError::ProcessError(fault.to_string())),
    }
}
