//! Implementation of the read-only commands: `check`, `command`, `config`.

use super::resolve_out_dir;
use crate::cli::{CheckArgs, CommandArgs};
use pagesnap::capture::{build_command, should_capture};
use pagesnap::config::Config;
use pagesnap::error::Result;
use pagesnap::exit_codes;
use pagesnap::target::Target;

/// Execute the `pagesnap check` command.
pub fn cmd_check(config: &Config, args: CheckArgs) -> Result<i32> {
    let target = Target::new(args.url, resolve_out_dir(args.out_dir)?);

    if should_capture(&target, None, args.overwrite, config) {
        println!("capture: would run for {}", target.url);
    } else {
        println!("capture: would skip {}", target.url);
    }

    Ok(exit_codes::SUCCESS)
}

/// Execute the `pagesnap command` command.
pub fn cmd_command(config: &Config, args: CommandArgs) -> Result<i32> {
    let target = Target::new(args.url, resolve_out_dir(None)?);
    println!("{}", build_command(&target, config).display());
    Ok(exit_codes::SUCCESS)
}

/// Execute the `pagesnap config` command.
pub fn cmd_config(config: &Config) -> Result<i32> {
    print!("{}", config.to_yaml()?);
    Ok(exit_codes::SUCCESS)
}
