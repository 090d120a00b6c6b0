//! Capture result records.
//!
//! A [`CaptureResult`] is built exactly once per capture and handed to the
//! caller (usually an indexing layer) as an immutable record. Callers must
//! discriminate on [`CaptureResult::status`], not on the shape of `output`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Final status of a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureStatus {
    Succeeded,
    Failed,
}

impl std::fmt::Display for CaptureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureStatus::Succeeded => write!(f, "succeeded"),
            CaptureStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Why a capture failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureErrorKind {
    /// The binary is missing or cannot be executed.
    ToolUnavailable,
    /// The tool exited with a non-zero code.
    NonZeroExit,
    /// The tool exited cleanly but left no artifact.
    MissingArtifact,
    /// The deadline elapsed and the tool was killed.
    Timeout,
}

/// A recorded capture failure with diagnostic hints.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct CaptureError {
    pub kind: CaptureErrorKind,
    pub message: String,
    /// Output lines to help a human debug the failure, in order.
    pub hints: Vec<String>,
}

impl CaptureError {
    pub fn new(kind: CaptureErrorKind, message: impl Into<String>, hints: Vec<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            hints,
        }
    }
}

/// The artifact filename on success, the error on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaptureOutput {
    Artifact(String),
    Error(CaptureError),
}

/// The record of one capture invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureResult {
    /// The argument vector that was executed.
    pub cmd: Vec<String>,
    /// Working directory of the invocation.
    pub pwd: PathBuf,
    /// Version of the capture tool, when known.
    pub cmd_version: Option<String>,
    pub output: CaptureOutput,
    pub status: CaptureStatus,
    /// Exit-code hint followed by the last few lines of output.
    pub hints: Vec<String>,
    pub start_ts: DateTime<Utc>,
    pub end_ts: DateTime<Utc>,
}

impl CaptureResult {
    pub fn is_success(&self) -> bool {
        self.status == CaptureStatus::Succeeded
    }

    /// The error, if the capture failed.
    pub fn error(&self) -> Option<&CaptureError> {
        match &self.output {
            CaptureOutput::Error(err) => Some(err),
            CaptureOutput::Artifact(_) => None,
        }
    }

    /// The artifact filename, if the capture succeeded.
    pub fn artifact(&self) -> Option<&str> {
        match &self.output {
            CaptureOutput::Artifact(name) if self.is_success() => Some(name),
            _ => None,
        }
    }

    /// Wall-clock duration between start and end timestamps.
    pub fn duration(&self) -> Duration {
        (self.end_ts - self.start_ts).to_std().unwrap_or_default()
    }
}
