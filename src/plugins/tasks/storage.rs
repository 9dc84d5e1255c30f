use super::backend::TaskBackend;
use super::errors::{BackendError, TaskOpError};
use super::ops;
use super::types::{Folder, FolderLayout, Task, TaskData};
use crate::shared::errors::StorageError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

// ============================================================================
// Snapshot Storage
// ============================================================================

/// Somewhere a whole [`TaskData`] snapshot can be read from and written to.
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    async fn load(&self) -> Result<TaskData, BackendError>;
    async fn save(&self, data: &TaskData) -> Result<(), BackendError>;
}

/// Pretty-printed JSON array of folders in a single file.
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStorage for JsonFile {
    async fn load(&self) -> Result<TaskData, BackendError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::not_found(self.path.display().to_string()).into());
            }
            Err(e) => return Err(StorageError::from(e).into()),
        };

        if content.trim().is_empty() {
            return Ok(TaskData::default());
        }

        let data: TaskData = serde_json::from_str(&content).map_err(StorageError::from)?;
        Ok(data)
    }

    async fn save(&self, data: &TaskData) -> Result<(), BackendError> {
        let content = serde_json::to_string_pretty(data).map_err(StorageError::from)?;

        // Write next to the target and rename so a crash never leaves half a file.
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content.as_bytes())
            .await
            .map_err(StorageError::from)?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(StorageError::from)?;

        tracing::trace!(
            target: "tasks::storage",
            path = %self.path.display(),
            folders = data.folders.len(),
            "Wrote task data"
        );
        Ok(())
    }
}

/// Snapshot kept in process memory.
#[derive(Default)]
pub struct InMemory {
    data: std::sync::Mutex<TaskData>,
}

#[async_trait]
impl SnapshotStorage for InMemory {
    async fn load(&self) -> Result<TaskData, BackendError> {
        let data = self
            .data
            .lock()
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        Ok(data.clone())
    }

    async fn save(&self, data: &TaskData) -> Result<(), BackendError> {
        let mut stored = self
            .data
            .lock()
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        *stored = data.clone();
        Ok(())
    }
}

// ============================================================================
// Snapshot Backend
// ============================================================================

/// [`TaskBackend`] that answers every command with load, pure op, save.
/// Commands are serialized so concurrent callers never interleave a
/// load/save pair.
pub struct SnapshotBackend<S> {
    storage: S,
    lock: Mutex<()>,
}

pub type JsonFileBackend = SnapshotBackend<JsonFile>;
pub type MemoryBackend = SnapshotBackend<InMemory>;

impl<S: SnapshotStorage> SnapshotBackend<S> {
    pub fn with_storage(storage: S) -> Self {
        Self {
            storage,
            lock: Mutex::new(()),
        }
    }

    async fn mutate<F>(&self, command: &'static str, op: F) -> Result<(), BackendError>
    where
        F: FnOnce(&mut TaskData) -> Result<(), TaskOpError> + Send,
    {
        let _guard = self.lock.lock().await;

        let mut data = self.storage.load().await?;
        if let Err(e) = op(&mut data) {
            tracing::debug!(target: "tasks::storage", command, "Rejected: {}", e);
            return Err(e.into());
        }
        self.storage.save(&data).await?;

        tracing::debug!(target: "tasks::storage", command, "Applied");
        Ok(())
    }
}

impl JsonFileBackend {
    /// Opens the data file at `path`, creating it (and its directory) with an
    /// empty folder list when missing or empty.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| StorageError::directory(format!("{}: {}", dir.display(), e)))?;
        }

        let needs_init = match tokio::fs::metadata(&path).await {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        if needs_init {
            let empty = serde_json::to_string_pretty(&TaskData::default())?;
            tokio::fs::write(&path, empty).await?;
            tracing::info!(target: "tasks::storage", path = %path.display(), "Initialized task data file");
        }

        Ok(Self::with_storage(JsonFile { path }))
    }
}

impl MemoryBackend {
    pub fn new(data: TaskData) -> Self {
        Self::with_storage(InMemory {
            data: std::sync::Mutex::new(data),
        })
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(TaskData::default())
    }
}

#[async_trait]
impl<S: SnapshotStorage> TaskBackend for SnapshotBackend<S> {
    async fn fetch_task_data(&self) -> Result<TaskData, BackendError> {
        let _guard = self.lock.lock().await;
        self.storage.load().await
    }

    async fn create_task(&self, task: &Task, folder_id: &str) -> Result<(), BackendError> {
        let task = task.clone();
        self.mutate("create_task", |data| ops::insert_task(data, task, folder_id))
            .await
    }

    async fn delete_task(&self, task_id: &str, folder_id: &str) -> Result<(), BackendError> {
        self.mutate("delete_task", |data| {
            ops::remove_task(data, task_id, folder_id).map(|_| ())
        })
        .await
    }

    async fn complete_task(&self, task_id: &str, folder_id: &str) -> Result<(), BackendError> {
        self.mutate("complete_task", |data| ops::toggle_task(data, task_id, folder_id))
            .await
    }

    async fn edit_task(
        &self,
        task_id: &str,
        folder_id: &str,
        new_text: &str,
        new_colour: &str,
    ) -> Result<(), BackendError> {
        self.mutate("edit_task", |data| {
            ops::edit_task(data, task_id, folder_id, new_text, new_colour)
        })
        .await
    }

    async fn duplicate_task(
        &self,
        task_id: &str,
        clone_task_id: &str,
        folder_id: &str,
    ) -> Result<(), BackendError> {
        self.mutate("duplicate_task", |data| {
            ops::duplicate_task(data, task_id, clone_task_id, folder_id)
        })
        .await
    }

    async fn create_folder(
        &self,
        name: &str,
        id: &str,
        colour: &str,
        layout: FolderLayout,
    ) -> Result<(), BackendError> {
        let folder = Folder::new(id, name, colour, layout);
        self.mutate("create_folder", |data| {
            ops::insert_folder(data, folder);
            Ok(())
        })
        .await
    }

    async fn delete_tasks_folder(&self, folder_id: &str) -> Result<(), BackendError> {
        self.mutate("delete_tasks_folder", |data| {
            ops::remove_folder(data, folder_id).map(|_| ())
        })
        .await
    }

    async fn toggle_visability_folder(&self, folder_id: &str) -> Result<(), BackendError> {
        self.mutate("toggle_visability_folder", |data| ops::toggle_folder(data, folder_id))
            .await
    }

    async fn edit_folder(
        &self,
        folder_id: &str,
        new_name: &str,
        new_colour: &str,
    ) -> Result<(), BackendError> {
        self.mutate("edit_folder", |data| {
            ops::edit_folder(data, folder_id, new_name, new_colour)
        })
        .await
    }

    async fn duplicate_folder(
        &self,
        folder_id: &str,
        folder_clone_id: &str,
        task_clone_ids: &[String],
    ) -> Result<(), BackendError> {
        self.mutate("duplicate_folder", |data| {
            ops::duplicate_folder(data, folder_id, folder_clone_id, task_clone_ids)
        })
        .await
    }

    async fn move_task_to_folder(
        &self,
        task_id: &str,
        folder_id: &str,
        new_folder_id: &str,
    ) -> Result<(), BackendError> {
        self.mutate("move_task_to_folder", |data| {
            ops::move_task(data, task_id, folder_id, new_folder_id)
        })
        .await
    }

    async fn move_task_order(
        &self,
        task_id: &str,
        folder_id: &str,
        new_index: usize,
    ) -> Result<(), BackendError> {
        self.mutate("move_task_order", |data| {
            ops::reorder_task(data, task_id, folder_id, new_index)
        })
        .await
    }
}
