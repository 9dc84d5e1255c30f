//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use todo_widget_lib::plugins::tasks::backend::TaskBackend;
use todo_widget_lib::plugins::tasks::errors::BackendError;
use todo_widget_lib::plugins::tasks::notify::ToastQueue;
use todo_widget_lib::plugins::tasks::storage::MemoryBackend;
use todo_widget_lib::plugins::tasks::store::{StoreDefaults, TaskDataStore};
use todo_widget_lib::plugins::tasks::types::{Folder, FolderLayout, Task, TaskData};

/// In-memory backend that records every command name and can be told to
/// reject specific ones.
#[derive(Default)]
pub struct ScriptedBackend {
    inner: MemoryBackend,
    calls: Mutex<Vec<&'static str>>,
    failing: Mutex<HashSet<&'static str>>,
}

impl ScriptedBackend {
    pub fn new(data: TaskData) -> Self {
        Self {
            inner: MemoryBackend::new(data),
            ..Self::default()
        }
    }

    pub fn fail_on(&self, command: &'static str) {
        self.failing.lock().unwrap().insert(command);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub async fn stored(&self) -> TaskData {
        self.inner.fetch_task_data().await.unwrap()
    }

    fn record(&self, command: &'static str) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(command);
        if self.failing.lock().unwrap().contains(command) {
            return Err(BackendError::Unavailable(format!("{} rejected", command)));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskBackend for ScriptedBackend {
    async fn fetch_task_data(&self) -> Result<TaskData, BackendError> {
        self.record("fetch_task_data")?;
        self.inner.fetch_task_data().await
    }

    async fn create_task(&self, task: &Task, folder_id: &str) -> Result<(), BackendError> {
        self.record("create_task")?;
        self.inner.create_task(task, folder_id).await
    }

    async fn delete_task(&self, task_id: &str, folder_id: &str) -> Result<(), BackendError> {
        self.record("delete_task")?;
        self.inner.delete_task(task_id, folder_id).await
    }

    async fn complete_task(&self, task_id: &str, folder_id: &str) -> Result<(), BackendError> {
        self.record("complete_task")?;
        self.inner.complete_task(task_id, folder_id).await
    }

    async fn edit_task(
        &self,
        task_id: &str,
        folder_id: &str,
        new_text: &str,
        new_colour: &str,
    ) -> Result<(), BackendError> {
        self.record("edit_task")?;
        self.inner.edit_task(task_id, folder_id, new_text, new_colour).await
    }

    async fn duplicate_task(
        &self,
        task_id: &str,
        clone_task_id: &str,
        folder_id: &str,
    ) -> Result<(), BackendError> {
        self.record("duplicate_task")?;
        self.inner.duplicate_task(task_id, clone_task_id, folder_id).await
    }

    async fn create_folder(
        &self,
        name: &str,
        id: &str,
        colour: &str,
        layout: FolderLayout,
    ) -> Result<(), BackendError> {
        self.record("create_folder")?;
        self.inner.create_folder(name, id, colour, layout).await
    }

    async fn delete_tasks_folder(&self, folder_id: &str) -> Result<(), BackendError> {
        self.record("delete_tasks_folder")?;
        self.inner.delete_tasks_folder(folder_id).await
    }

    async fn toggle_visability_folder(&self, folder_id: &str) -> Result<(), BackendError> {
        self.record("toggle_visability_folder")?;
        self.inner.toggle_visability_folder(folder_id).await
    }

    async fn edit_folder(
        &self,
        folder_id: &str,
        new_name: &str,
        new_colour: &str,
    ) -> Result<(), BackendError> {
        self.record("edit_folder")?;
        self.inner.edit_folder(folder_id, new_name, new_colour).await
    }

    async fn duplicate_folder(
        &self,
        folder_id: &str,
        folder_clone_id: &str,
        task_clone_ids: &[String],
    ) -> Result<(), BackendError> {
        self.record("duplicate_folder")?;
        self.inner
            .duplicate_folder(folder_id, folder_clone_id, task_clone_ids)
            .await
    }

    async fn move_task_to_folder(
        &self,
        task_id: &str,
        folder_id: &str,
        new_folder_id: &str,
    ) -> Result<(), BackendError> {
        self.record("move_task_to_folder")?;
        self.inner
            .move_task_to_folder(task_id, folder_id, new_folder_id)
            .await
    }

    async fn move_task_order(
        &self,
        task_id: &str,
        folder_id: &str,
        new_index: usize,
    ) -> Result<(), BackendError> {
        self.record("move_task_order")?;
        self.inner.move_task_order(task_id, folder_id, new_index).await
    }
}

pub fn task(id: &str) -> Task {
    Task {
        id: id.to_string(),
        text: format!("Task {}", id),
        completed: false,
        colour: "#111827".to_string(),
    }
}

pub fn folder(id: &str, name: &str, task_ids: &[&str]) -> Folder {
    let mut folder = Folder::new(id, name, "#8b5cf6", FolderLayout::default());
    folder.tasks = task_ids.iter().map(|id| task(id)).collect();
    folder
}

pub struct Harness {
    pub store: TaskDataStore,
    pub backend: Arc<ScriptedBackend>,
    pub toasts: Arc<ToastQueue>,
}

/// A store already loaded with `folders`. Backend calls made during the
/// load are cleared.
pub async fn harness(folders: Vec<Folder>) -> Harness {
    let backend = Arc::new(ScriptedBackend::new(TaskData::new(folders)));
    let toasts = Arc::new(ToastQueue::new());
    let mut store = TaskDataStore::new(backend.clone(), toasts.clone(), StoreDefaults::default());
    store.load().await.unwrap();
    backend.clear_calls();

    Harness {
        store,
        backend,
        toasts,
    }
}

pub fn task_ids(store: &TaskDataStore, folder_id: &str) -> Vec<String> {
    store
        .folder(folder_id)
        .map(|folder| folder.tasks.iter().map(|task| task.id.clone()).collect())
        .unwrap_or_default()
}
