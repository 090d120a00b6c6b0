//! Error types for pagesnap.
//!
//! These are the fatal errors: conditions under which no meaningful
//! [`CaptureResult`](crate::capture::CaptureResult) can be built. Ordinary
//! capture failures (tool missing, non-zero exit, timeout) are recorded in
//! the result instead.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for pagesnap operations.
#[derive(Error, Debug)]
pub enum PagesnapError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// The output directory or artifact could not be accessed.
    #[error("Filesystem error: {0}")]
    IoError(String),

    /// The supervisor lost track of the child process.
    #[error("Process supervision failed: {0}")]
    ProcessError(String),
}

impl PagesnapError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PagesnapError::UserError(_) => exit_codes::USER_ERROR,
            PagesnapError::IoError(_) => exit_codes::IO_FAILURE,
            PagesnapError::ProcessError(_) => exit_codes::IO_FAILURE,
        }
    }
}

/// Result type alias for pagesnap operations.
pub type Result<T> = std::result::Result<T, PagesnapError>;
