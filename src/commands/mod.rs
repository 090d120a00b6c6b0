//! Command implementations for pagesnap.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations and loads the effective configuration they share.

mod capture;
mod inspect;

use crate::cli::{Cli, Command};
use pagesnap::config::Config;
use pagesnap::error::{PagesnapError, Result};
use std::path::{Path, PathBuf};

/// Dispatch a command to its implementation.
///
/// Returns the process exit code on success; fatal errors are returned as
/// `Err` and mapped to exit codes by the caller.
pub fn dispatch(cli: Cli) -> Result<i32> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Capture(args) => capture::cmd_capture(config, args),
        Command::Check(args) => inspect::cmd_check(&config, args),
        Command::Command(args) => inspect::cmd_command(&config, args),
        Command::Config => inspect::cmd_config(&config),
    }
}

/// Load the config file (if given) and overlay the process environment.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_process_env()?;
    Ok(config)
}

/// The explicit output directory, or the current working directory.
fn resolve_out_dir(out_dir: Option<PathBuf>) -> Result<PathBuf> {
    match out_dir {
        Some(dir) => Ok(dir),
        None => std::env::current_dir().map_err(|e| {
            PagesnapError::IoError(format!("failed to get current working directory: {}", e))
        }),
    }
}
