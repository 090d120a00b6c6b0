//! CLI argument parsing for pagesnap.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// pagesnap: capture web pages into standalone HTML with SingleFile.
///
/// Each capture runs the SingleFile CLI under a hard deadline and reports a
/// structured result. Configuration comes from an optional YAML file with
/// environment overrides (TIMEOUT, SINGLEFILE_ARGS, CHROME_BINARY, ...).
#[derive(Parser, Debug)]
#[command(name = "pagesnap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a pagesnap.yaml config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for pagesnap.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Capture a URL into singlefile.html.
    ///
    /// Runs the precondition gate first; skipped captures exit 0.
    Capture(CaptureArgs),

    /// Report whether a capture would run, without running it.
    Check(CheckArgs),

    /// Print the SingleFile command that would be executed.
    Command(CommandArgs),

    /// Print the effective configuration as YAML.
    Config,
}

/// Arguments for the `capture` command.
#[derive(Parser, Debug)]
pub struct CaptureArgs {
    /// URL to capture.
    pub url: String,

    /// Output directory (default: current directory).
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Capture even if singlefile.html already exists.
    #[arg(long)]
    pub overwrite: bool,

    /// Deadline in seconds (overrides config `timeout`).
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Print the result record as JSON.
    #[arg(long)]
    pub json: bool,

    /// Also write the result record as JSON to this file.
    #[arg(long)]
    pub result_file: Option<PathBuf>,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// URL to check.
    pub url: String,

    /// Output directory (default: current directory).
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Ignore an existing singlefile.html.
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments for the `command` command.
#[derive(Parser, Debug)]
pub struct CommandArgs {
    /// URL to build the command for.
    pub url: String,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_args() {
        let cli = Cli::try_parse_from([
            "pagesnap",
            "capture",
            "https://example.com",
            "--out-dir",
            "/archive/1",
            "--overwrite",
            "--timeout",
            "30",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Command::Capture(args) => {
                assert_eq!(args.url, "https://example.com");
                assert_eq!(args.out_dir, Some(PathBuf::from("/archive/1")));
                assert!(args.overwrite);
                assert_eq!(args.timeout, Some(30));
                assert!(args.json);
                assert!(args.result_file.is_none());
            }
            other => panic!("expected capture, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "pagesnap",
            "check",
            "https://example.com",
            "--config",
            "pagesnap.yaml",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("pagesnap.yaml")));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Check(_)));
    }

    #[test]
    fn test_capture_requires_url() {
        assert!(Cli::try_parse_from(["pagesnap", "capture"]).is_err());
    }

    #[test]
    fn test_config_command() {
        let cli = Cli::try_parse_from(["pagesnap", "config"]).unwrap();
        assert!(matches!(cli.command, Command::Config));
    }
}
