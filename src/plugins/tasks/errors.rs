use crate::shared::errors::StorageError;
use thiserror::Error;

/// Failures of the pure data operations shared by the store and the backends.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskOpError {
    #[error("Folder not found: {0}")]
    FolderNotFound(String),
    #[error("Task {task_id} not found in folder {folder_id}")]
    TaskNotFound { task_id: String, folder_id: String },
    #[error("Expected {expected} task clone ids, got {got}")]
    CloneCountMismatch { expected: usize, got: usize },
}

impl TaskOpError {
    pub fn task_not_found(task_id: &str, folder_id: &str) -> Self {
        TaskOpError::TaskNotFound {
            task_id: task_id.to_string(),
            folder_id: folder_id.to_string(),
        }
    }
}

/// A rejected persistence call.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Rejected(#[from] TaskOpError),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Error returned by store operations. The store has already shown the
/// failure toast and left its state as it was.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to {action}: {source}")]
    Persistence {
        action: &'static str,
        #[source]
        source: BackendError,
    },
}

impl StoreError {
    pub fn action(&self) -> &'static str {
        match self {
            StoreError::Persistence { action, .. } => action,
        }
    }
}
