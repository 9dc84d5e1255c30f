pub mod backend;
pub mod clipboard;
pub mod commands;
pub mod drag;
pub mod editing;
pub mod errors;
pub mod helpers;
pub mod notify;
pub mod ops;
pub mod selection;
pub mod shortcuts;
pub mod storage;
pub mod store;
pub mod types;

use std::path::Path;
use std::sync::Arc;

use self::notify::Notifier;
use storage::JsonFileBackend;
use store::{StoreDefaults, TaskDataStore};

use crate::shared::errors::StorageError;

/// Opens the task data file and builds a store over it. The caller loads
/// the first snapshot with [`TaskDataStore::load`].
pub async fn init_task_store(
    data_file: &Path,
    defaults: StoreDefaults,
    notifier: Arc<dyn Notifier>,
) -> Result<TaskDataStore, StorageError> {
    let backend = JsonFileBackend::open(data_file).await?;
    tracing::info!(
        target: "tasks",
        "Task store initialized at {}",
        data_file.display()
    );
    Ok(TaskDataStore::new(Arc::new(backend), notifier, defaults))
}
