//! SingleFile command construction.
//!
//! SingleFile rejects an option given twice, so the combined option list is
//! deduplicated by option name. Options listed earlier win: the user's
//! `singlefile_args` come first and clobber generated defaults of the same
//! name.

use super::browser::{BrowserArgOverrides, browser_args};
use crate::binary::resolve_binary;
use crate::config::Config;
use crate::target::Target;
use std::collections::HashSet;

/// Fixed artifact name written by SingleFile into the output directory.
pub const ARTIFACT_NAME: &str = "singlefile.html";

/// A fully built SingleFile invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureCommand {
    /// Resolved path of the SingleFile binary (argv\[0\]).
    pub program: String,
    /// Deduplicated options, in precedence order.
    pub options: Vec<String>,
    /// The page URL.
    pub url: String,
    /// Artifact filename, relative to the working directory.
    pub output: String,
}

impl CaptureCommand {
    /// The exact argument vector to execute.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.options.len() + 3);
        argv.push(self.program.clone());
        argv.extend(self.options.iter().cloned());
        argv.push(self.url.clone());
        argv.push(self.output.clone());
        argv
    }

    /// Shell-quoted rendering that can be pasted into a terminal as-is.
    pub fn display(&self) -> String {
        shell_words::join(self.argv())
    }
}

/// The option family of an argument: the text before the first `=`, or the
/// whole argument when it has none.
pub fn option_name(arg: &str) -> &str {
    arg.split_once('=').map_or(arg, |(name, _)| name)
}

/// Keep only the first argument of each option family, preserving order.
pub fn dedupe_options<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let (_, kept) = args.into_iter().fold(
        (HashSet::new(), Vec::new()),
        |(mut seen, mut kept): (HashSet<String>, Vec<String>), arg| {
            if seen.insert(option_name(&arg).to_string()) {
                kept.push(arg);
            }
            (seen, kept)
        },
    );
    kept
}

/// Build the SingleFile command for a target.
pub fn build_command(target: &Target, config: &Config) -> CaptureCommand {
    // The outer deadline governs the time budget, so the browser gets none.
    let browser = browser_args(&config.browser, BrowserArgOverrides { timeout: Some(0) });
    let browser_flags = serde_json::Value::from(browser.get(1..).unwrap_or_default().to_vec());

    let combined = config.singlefile_args.iter().cloned().chain([
        format!("--browser-executable-path={}", config.browser.chrome_binary),
        format!("--browser-args={}", browser_flags),
    ]);

    let program = resolve_binary(&config.singlefile_binary)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| config.singlefile_binary.clone());

    CaptureCommand {
        program,
        options: dedupe_options(combined),
        url: target.url.clone(),
        output: ARTIFACT_NAME.to_string(),
    }
}
