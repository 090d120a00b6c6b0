//! pagesnap: SingleFile page capture as one step of an archiving pipeline.
//!
//! Given a URL and an output directory, decide whether a capture is needed,
//! build a deduplicated SingleFile invocation, run it under a hard deadline,
//! and classify the outcome into a [`CaptureResult`](capture::CaptureResult).
//!
//! ```no_run
//! use pagesnap::capture::{run_capture, should_capture};
//! use pagesnap::config::Config;
//! use pagesnap::target::Target;
//!
//! let config = Config::default();
//! let target = Target::new("https://example.com", "/archive/1700000000");
//! if should_capture(&target, None, false, &config) {
//!     let result = run_capture(&target, None, None, &config)?;
//!     println!("{}", result.status);
//! }
//! # Ok::<(), pagesnap::error::PagesnapError>(())
//! ```

pub mod binary;
pub mod capture;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod target;

#[cfg(test)]
mod test_support;
