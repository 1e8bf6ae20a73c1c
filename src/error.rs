//! Errors surfaced by progression operations.

use uuid::Uuid;

use crate::storage::StoreError;

/// Errors returned by quest, reward and achievement operations.
#[derive(Debug, thiserror::Error)]
pub enum ProgressionError {
    #[error("Quest not found: {0}")]
    QuestNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A concurrent writer changed the document between read and update.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(StoreError),
}

impl ProgressionError {
    /// Whether this is one of the not-found kinds.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ProgressionError::QuestNotFound(_) | ProgressionError::UserNotFound(_)
        )
    }
}

impl From<StoreError> for ProgressionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::VersionConflict { collection, id } => {
                ProgressionError::Conflict(format!("{} {} was modified concurrently", collection, id))
            }
            other => ProgressionError::Storage(other),
        }
    }
}
