//! Exit code constants for the pagesnap CLI.
//!
//! - 0: Success (capture succeeded, or was skipped by the gate)
//! - 1: User error (bad args, invalid config)
//! - 2: Capture failed (tool error, missing artifact, timeout)
//! - 3: Fatal I/O or process supervision failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// The capture ran but was classified as failed.
pub const CAPTURE_FAILED: i32 = 2;

/// Filesystem unavailable, permission update failed, or the child was lost.
pub const IO_FAILURE: i32 = 3;
