//! SingleFile capture step.
//!
//! Four stages, composed one way:
//!
//! - **Gate** ([`should_capture`]): is a capture needed at all?
//! - **Command** ([`build_command`]): deduplicated SingleFile invocation
//! - **Supervisor** ([`supervisor::run`]): run it under a hard deadline
//! - **Classify** ([`classify()`]): exit code + artifact into a [`CaptureResult`]
//!
//! [`run_capture`] chains the last three. Callers run the gate first.

pub mod browser;
pub mod classify;
pub mod command;
pub mod gate;
pub mod result;
pub mod supervisor;


pub use browser::{BrowserArgOverrides, browser_args};
pub use classify::{Classification, classify, classify_fault, tail_hints};
pub use command::{ARTIFACT_NAME, CaptureCommand, build_command, dedupe_options};
pub use gate::should_capture;
pub use result::{CaptureError, CaptureErrorKind, CaptureOutput, CaptureResult, CaptureStatus};
pub use supervisor::{ProcessOutcome, RunFault};

use crate::config::Config;
use crate::error::{PagesnapError, Result};
use crate::target::Target;
use chrono::{TimeDelta, Utc};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Capture `target` into `out_dir` (default: the target's link directory).
///
/// `timeout` overrides the configured deadline. Every capture failure is
/// recorded in the returned [`CaptureResult`]; `Err` means no meaningful
/// record could be built (output directory unavailable, permission update
/// failed, child process lost).
pub fn run_capture(
    target: &Target,
    out_dir: Option<&Path>,
    timeout: Option<Duration>,
    config: &Config,
) -> Result<CaptureResult> {
    let out_dir = target.out_dir(out_dir);
    if !out_dir.is_dir() {
        return Err(PagesnapError::IoError(format!(
            "output directory '{}' does not exist or is not a directory",
            out_dir.display()
        )));
    }

    let output_mode = config.output_mode()?;
    let timeout = timeout.unwrap_or_else(|| config.timeout_duration());
    let command = build_command(target, config);
    let argv = command.argv();

    info!(
        url = %target.url,
        out_dir = %out_dir.display(),
        timeout_secs = timeout.as_secs_f64(),
        "capturing page"
    );
    debug!(cmd = %command.display(), "singlefile command");

    let start_ts = Utc::now();
    let started = Instant::now();

    let classification = match supervisor::run(&argv, out_dir, timeout) {
        Ok(outcome) => classify(&outcome, out_dir, &command.output, output_mode)?,
        Err(fault) => classify_fault(fault)?,
    };

    // Stamp the end from the monotonic clock so the recorded duration is
    // never shorter than what was measured.
    let end_ts = TimeDelta::from_std(started.elapsed())
        .ok()
        .and_then(|elapsed| start_ts.checked_add_signed(elapsed))
        .unwrap_or_else(Utc::now);

    let Classification {
        status,
        output,
        hints,
    } = classification;

    match &output {
        CaptureOutput::Error(err) => warn!(
            url = %target.url,
            kind = ?err.kind,
            error = %err.message,
            "capture failed"
        ),
        CaptureOutput::Artifact(name) => info!(url = %target.url, artifact = %name, "capture succeeded"),
    }

    Ok(CaptureResult {
        cmd: argv,
        pwd: out_dir.to_path_buf(),
        cmd_version: config.singlefile_version.clone(),
        output,
        status,
        hints,
        start_ts,
        end_ts,
    })
}
