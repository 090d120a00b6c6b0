//! Implementation of the `pagesnap capture` command.

use super::resolve_out_dir;
use crate::cli::CaptureArgs;
use pagesnap::binary::{detect_version, resolve_binary};
use pagesnap::capture::{CaptureResult, run_capture, should_capture};
use pagesnap::config::Config;
use pagesnap::error::{PagesnapError, Result};
use pagesnap::exit_codes;
use pagesnap::fs::atomic_write;
use pagesnap::target::Target;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Execute the `pagesnap capture` command.
///
/// 1. Runs the precondition gate (skips exit 0)
/// 2. Fills in the tool version if the config does not pin one
/// 3. Runs the capture under the deadline
/// 4. Prints the result and optionally writes it to `--result-file`
pub fn cmd_capture(mut config: Config, args: CaptureArgs) -> Result<i32> {
    let timeout = match args.timeout {
        Some(0) => {
            return Err(PagesnapError::UserError(
                "--timeout must be greater than 0".to_string(),
            ));
        }
        Some(secs) => Some(Duration::from_secs(secs)),
        None => None,
    };

    let out_dir = resolve_out_dir(args.out_dir)?;
    let target = Target::new(args.url, out_dir);

    if !should_capture(&target, None, args.overwrite, &config) {
        if args.json {
            println!("{}", json!({ "url": target.url, "status": "skipped" }));
        } else {
            println!(
                "Skipped {}: static file, existing snapshot (use --overwrite), or capture disabled.",
                target.url
            );
        }
        return Ok(exit_codes::SUCCESS);
    }

    if config.singlefile_version.is_none() {
        let binary = resolve_binary(&config.singlefile_binary);
        config.singlefile_version = binary.and_then(|b| detect_version(&b.to_string_lossy()));
        debug!(version = ?config.singlefile_version, "detected singlefile version");
    }

    let result = run_capture(&target, None, timeout, &config)?;

    if let Some(path) = &args.result_file {
        let bytes = serde_json::to_vec_pretty(&result).map_err(|e| {
            PagesnapError::UserError(format!("failed to serialize result to JSON: {}", e))
        })?;
        atomic_write(path, &bytes)?;
    }

    if args.json {
        let text = serde_json::to_string_pretty(&result).map_err(|e| {
            PagesnapError::UserError(format!("failed to serialize result to JSON: {}", e))
        })?;
        println!("{}", text);
    } else {
        print_summary(&result);
    }

    if result.is_success() {
        Ok(exit_codes::SUCCESS)
    } else {
        Ok(exit_codes::CAPTURE_FAILED)
    }
}

fn print_summary(result: &CaptureResult) {
    println!("Status:   {}", result.status);
    println!("Dir:      {}", result.pwd.display());
    println!("Duration: {:.1}s", result.duration().as_secs_f64());
    if let Some(version) = &result.cmd_version {
        println!("Version:  {}", version);
    }

    if let Some(artifact) = result.artifact() {
        println!("Output:   {}", artifact);
    }

    if let Some(err) = result.error() {
        println!("Error:    {}", err.message);
        println!("Command:  {}", shell_words::join(&result.cmd));
        if !err.hints.is_empty() {
            println!();
            println!("Output:");
            for hint in &err.hints {
                println!("    {}", hint);
            }
        }
    } else {
        for hint in &result.hints {
            println!("  > {}", hint);
        }
    }
}
