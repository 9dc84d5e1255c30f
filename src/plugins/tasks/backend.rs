use super::errors::BackendError;
use super::types::{FolderLayout, Task, TaskData};
use async_trait::async_trait;

/// Persistence commands the store drives. Each call either applies fully or
/// returns an error; the store never patches local state after an error.
#[async_trait]
pub trait TaskBackend: Send + Sync {
    /// Full snapshot of every folder and task.
    async fn fetch_task_data(&self) -> Result<TaskData, BackendError>;

    async fn create_task(&self, task: &Task, folder_id: &str) -> Result<(), BackendError>;

    async fn delete_task(&self, task_id: &str, folder_id: &str) -> Result<(), BackendError>;

    /// Flips `completed`.
    async fn complete_task(&self, task_id: &str, folder_id: &str) -> Result<(), BackendError>;

    async fn edit_task(
        &self,
        task_id: &str,
        folder_id: &str,
        new_text: &str,
        new_colour: &str,
    ) -> Result<(), BackendError>;

    async fn duplicate_task(
        &self,
        task_id: &str,
        clone_task_id: &str,
        folder_id: &str,
    ) -> Result<(), BackendError>;

    async fn create_folder(
        &self,
        name: &str,
        id: &str,
        colour: &str,
        layout: FolderLayout,
    ) -> Result<(), BackendError>;

    /// Deletes the folder and every task in it.
    async fn delete_tasks_folder(&self, folder_id: &str) -> Result<(), BackendError>;

    async fn toggle_visability_folder(&self, folder_id: &str) -> Result<(), BackendError>;

    async fn edit_folder(
        &self,
        folder_id: &str,
        new_name: &str,
        new_colour: &str,
    ) -> Result<(), BackendError>;

    async fn duplicate_folder(
        &self,
        folder_id: &str,
        folder_clone_id: &str,
        task_clone_ids: &[String],
    ) -> Result<(), BackendError>;

    /// Moves the task to the end of `new_folder_id`.
    async fn move_task_to_folder(
        &self,
        task_id: &str,
        folder_id: &str,
        new_folder_id: &str,
    ) -> Result<(), BackendError>;

    async fn move_task_order(
        &self,
        task_id: &str,
        folder_id: &str,
        new_index: usize,
    ) -> Result<(), BackendError>;
}
