//! Error types for taskdesk store operations.

use taskdesk_core::{InvalidId, TaskId};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No task carries the requested identifier.
    #[error("Task not found: {0}")]
    NotFound(TaskId),

    /// The caller-supplied identifier is not numeric.
    #[error("Invalid task ID: {0}")]
    InvalidId(#[from] InvalidId),

    /// Seed dataset could not be decoded.
    #[error("Failed to parse seed data: {0}")]
    SeedParse(#[from] serde_json::Error),

    /// Seed dataset could not be read.
    #[error("Failed to read seed data: {0}")]
    SeedIo(#[from] std::io::Error),

    /// Every task id has been allocated.
    #[error("Task IDs exhausted")]
    IdsExhausted,

    /// The spawned operation did not run to completion (runtime shutdown or panic).
    #[error("Store operation interrupted: {0}")]
    Interrupted(String),
}

impl StoreError {
    /// Returns true for [`StoreError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
