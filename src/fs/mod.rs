//! Filesystem utilities for pagesnap.
//!
//! Permission normalization for capture artifacts and atomic writes for
//! result records.

pub mod atomic;
pub mod permissions;

pub use atomic::atomic_write;
pub use permissions::normalize_permissions;
