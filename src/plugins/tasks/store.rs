use super::backend::TaskBackend;
use super::clipboard::TaskClipboard;
use super::commands::TaskCommand;
use super::errors::{BackendError, StoreError};
use super::helpers::{find_folder, find_task_in};
use super::notify::{Notifier, ToastKind};
use super::types::{Folder, FolderLayout, Task, TaskData, TaskInput};
use crate::core::settings::WidgetSettings;
use std::sync::Arc;
use uuid::Uuid;

/// Values filled in when the caller leaves them out.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreDefaults {
    pub task_colour: String,
    pub folder_colour: String,
    pub folder_layout: FolderLayout,
}

impl Default for StoreDefaults {
    fn default() -> Self {
        StoreDefaults::from(&WidgetSettings::default())
    }
}

impl From<&WidgetSettings> for StoreDefaults {
    fn from(settings: &WidgetSettings) -> Self {
        Self {
            task_colour: settings.default_task_colour.clone(),
            folder_colour: settings.default_folder_colour.clone(),
            folder_layout: settings.folder_layout,
        }
    }
}

/// Whether a mutation changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    /// The target was not in local state (or the input was empty); nothing
    /// was sent to the backend and nothing changed.
    Skipped,
}

impl MutationOutcome {
    pub fn is_applied(self) -> bool {
        self == MutationOutcome::Applied
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Single source of truth for folders and tasks.
///
/// Every mutation is persisted before local state changes. A rejected
/// persistence call shows one error toast, returns [`StoreError`] and leaves
/// the snapshot exactly as it was. The snapshot is replaced wholesale on each
/// change, so an `Arc` handed out by [`snapshot`](Self::snapshot) never
/// changes under the reader.
pub struct TaskDataStore {
    data: Arc<TaskData>,
    backend: Arc<dyn TaskBackend>,
    notifier: Arc<dyn Notifier>,
    defaults: StoreDefaults,
}

impl TaskDataStore {
    pub fn new(
        backend: Arc<dyn TaskBackend>,
        notifier: Arc<dyn Notifier>,
        defaults: StoreDefaults,
    ) -> Self {
        Self {
            data: Arc::new(TaskData::default()),
            backend,
            notifier,
            defaults,
        }
    }

    // ========================================================================
    // Reading
    // ========================================================================

    pub fn snapshot(&self) -> Arc<TaskData> {
        Arc::clone(&self.data)
    }

    pub fn data(&self) -> &TaskData {
        &self.data
    }

    pub fn folders(&self) -> &[Folder] {
        &self.data.folders
    }

    pub fn folder(&self, folder_id: &str) -> Option<&Folder> {
        find_folder(&self.data, folder_id)
    }

    pub fn task(&self, task_id: &str, folder_id: &str) -> Option<&Task> {
        find_task_in(&self.data, task_id, folder_id)
    }

    pub fn defaults(&self) -> &StoreDefaults {
        &self.defaults
    }

    /// Replaces local state with the backend's full snapshot.
    pub async fn load(&mut self) -> Result<(), StoreError> {
        match self.backend.fetch_task_data().await {
            Ok(data) => {
                tracing::info!(
                    target: "tasks",
                    folders = data.folders.len(),
                    tasks = data.task_count(),
                    "Task data loaded"
                );
                self.data = Arc::new(data);
                Ok(())
            }
            Err(source) => Err(self.fail("load tasks", source)),
        }
    }

    // ========================================================================
    // Command execution
    // ========================================================================

    fn fail(&self, action: &'static str, source: BackendError) -> StoreError {
        tracing::error!(target: "tasks", action, "Persistence failed: {}", source);
        self.notifier
            .notify(&format!("Failed to {}", action), ToastKind::Error);
        StoreError::Persistence { action, source }
    }

    async fn execute(&mut self, command: TaskCommand) -> Result<MutationOutcome, StoreError> {
        let mut staged = TaskData::clone(&self.data);
        if let Err(e) = command.patch(&mut staged) {
            tracing::warn!(target: "tasks", action = command.action(), "Skipped: {}", e);
            return Ok(MutationOutcome::Skipped);
        }

        if let Err(source) = command.persist(self.backend.as_ref()).await {
            return Err(self.fail(command.action(), source));
        }

        self.data = Arc::new(staged);
        tracing::debug!(target: "tasks", action = command.action(), "Applied");
        Ok(MutationOutcome::Applied)
    }

    // ========================================================================
    // Tasks
    // ========================================================================

    /// Creates a task at the end of `folder_id`. Returns the new id, or `None`
    /// when the text is empty or the folder is unknown.
    pub async fn add_task(
        &mut self,
        input: TaskInput,
        folder_id: &str,
    ) -> Result<Option<String>, StoreError> {
        if input.text.trim().is_empty() {
            tracing::warn!(target: "tasks", folder_id, "Ignoring task with empty text");
            return Ok(None);
        }

        let colour = input
            .colour
            .filter(|colour| !colour.is_empty())
            .unwrap_or_else(|| self.defaults.task_colour.clone());
        let task = Task {
            id: new_id(),
            text: input.text,
            completed: input.completed,
            colour,
        };
        let id = task.id.clone();

        let outcome = self
            .execute(TaskCommand::CreateTask {
                task,
                folder_id: folder_id.to_string(),
            })
            .await?;
        Ok(outcome.is_applied().then_some(id))
    }

    pub async fn delete_task(
        &mut self,
        task_id: &str,
        folder_id: &str,
    ) -> Result<MutationOutcome, StoreError> {
        self.execute(TaskCommand::DeleteTask {
            task_id: task_id.to_string(),
            folder_id: folder_id.to_string(),
        })
        .await
    }

    pub async fn toggle_task_completion(
        &mut self,
        task_id: &str,
        folder_id: &str,
    ) -> Result<MutationOutcome, StoreError> {
        self.execute(TaskCommand::ToggleTask {
            task_id: task_id.to_string(),
            folder_id: folder_id.to_string(),
        })
        .await
    }

    pub async fn edit_task(
        &mut self,
        task_id: &str,
        folder_id: &str,
        new_text: &str,
        new_colour: &str,
    ) -> Result<MutationOutcome, StoreError> {
        if new_text.trim().is_empty() {
            tracing::warn!(target: "tasks", task_id, "Ignoring edit with empty text");
            return Ok(MutationOutcome::Skipped);
        }

        self.execute(TaskCommand::EditTask {
            task_id: task_id.to_string(),
            folder_id: folder_id.to_string(),
            text: new_text.to_string(),
            colour: new_colour.to_string(),
        })
        .await
    }

    /// Appends a copy of the task to the end of its folder and returns the
    /// copy's id.
    pub async fn duplicate_task(
        &mut self,
        task_id: &str,
        folder_id: &str,
    ) -> Result<Option<String>, StoreError> {
        let clone_id = new_id();
        let outcome = self
            .execute(TaskCommand::DuplicateTask {
                task_id: task_id.to_string(),
                clone_id: clone_id.clone(),
                folder_id: folder_id.to_string(),
            })
            .await?;
        Ok(outcome.is_applied().then_some(clone_id))
    }

    // ========================================================================
    // Folders
    // ========================================================================

    /// Creates an empty, visible folder at the end of the list. An empty
    /// `colour` uses the default.
    pub async fn add_folder(
        &mut self,
        name: &str,
        colour: &str,
    ) -> Result<Option<String>, StoreError> {
        if name.trim().is_empty() {
            tracing::warn!(target: "tasks", "Ignoring folder with empty name");
            return Ok(None);
        }

        let colour = if colour.is_empty() {
            self.defaults.folder_colour.as_str()
        } else {
            colour
        };
        let folder = Folder::new(new_id(), name, colour, self.defaults.folder_layout);
        let id = folder.id.clone();

        let outcome = self.execute(TaskCommand::CreateFolder { folder }).await?;
        Ok(outcome.is_applied().then_some(id))
    }

    /// Deletes the folder and every task in it.
    pub async fn delete_folder(&mut self, folder_id: &str) -> Result<MutationOutcome, StoreError> {
        self.execute(TaskCommand::DeleteFolder {
            folder_id: folder_id.to_string(),
        })
        .await
    }

    pub async fn toggle_folder_visibility(
        &mut self,
        folder_id: &str,
    ) -> Result<MutationOutcome, StoreError> {
        self.execute(TaskCommand::ToggleFolder {
            folder_id: folder_id.to_string(),
        })
        .await
    }

    pub async fn edit_folder(
        &mut self,
        folder_id: &str,
        new_name: &str,
        new_colour: &str,
    ) -> Result<MutationOutcome, StoreError> {
        if new_name.trim().is_empty() {
            tracing::warn!(target: "tasks", folder_id, "Ignoring edit with empty name");
            return Ok(MutationOutcome::Skipped);
        }

        self.execute(TaskCommand::EditFolder {
            folder_id: folder_id.to_string(),
            name: new_name.to_string(),
            colour: new_colour.to_string(),
        })
        .await
    }

    /// Clones the folder and all of its tasks under fresh ids as
    /// `"<name> (Copy)"`. Returns the clone's id.
    pub async fn duplicate_folder(&mut self, folder_id: &str) -> Result<Option<String>, StoreError> {
        let Some(folder) = self.folder(folder_id) else {
            tracing::warn!(target: "tasks", folder_id, "Folder to duplicate not found");
            return Ok(None);
        };

        let task_clone_ids: Vec<String> = folder.tasks.iter().map(|_| new_id()).collect();
        let clone_id = new_id();

        let outcome = self
            .execute(TaskCommand::DuplicateFolder {
                folder_id: folder_id.to_string(),
                clone_id: clone_id.clone(),
                task_clone_ids,
            })
            .await?;
        Ok(outcome.is_applied().then_some(clone_id))
    }

    // ========================================================================
    // Moving and ordering
    // ========================================================================

    /// Moves the task to the end of `to_folder_id`. Moving into the folder it
    /// is already in does nothing and sends nothing.
    pub async fn move_task_to_folder(
        &mut self,
        task_id: &str,
        from_folder_id: &str,
        to_folder_id: &str,
    ) -> Result<MutationOutcome, StoreError> {
        if from_folder_id == to_folder_id {
            return Ok(MutationOutcome::Skipped);
        }

        self.execute(TaskCommand::MoveTask {
            task_id: task_id.to_string(),
            from_folder_id: from_folder_id.to_string(),
            to_folder_id: to_folder_id.to_string(),
        })
        .await
    }

    /// Puts the task at `new_index` of its folder; indices past the end
    /// append.
    pub async fn reorder_task(
        &mut self,
        task_id: &str,
        folder_id: &str,
        new_index: usize,
    ) -> Result<MutationOutcome, StoreError> {
        self.execute(TaskCommand::ReorderTask {
            task_id: task_id.to_string(),
            folder_id: folder_id.to_string(),
            new_index,
        })
        .await
    }

    /// Moves the task into another folder at `new_index`, then reloads the
    /// whole snapshot from the backend instead of patching locally. Any
    /// failed call leaves local state at its previous snapshot.
    pub async fn move_task_to_folder_and_reorder(
        &mut self,
        task_id: &str,
        from_folder_id: &str,
        to_folder_id: &str,
        new_index: usize,
    ) -> Result<MutationOutcome, StoreError> {
        if from_folder_id == to_folder_id {
            return self.reorder_task(task_id, from_folder_id, new_index).await;
        }

        let mv = TaskCommand::MoveTask {
            task_id: task_id.to_string(),
            from_folder_id: from_folder_id.to_string(),
            to_folder_id: to_folder_id.to_string(),
        };
        let mut staged = TaskData::clone(&self.data);
        if let Err(e) = mv.patch(&mut staged) {
            tracing::warn!(target: "tasks", action = mv.action(), "Skipped: {}", e);
            return Ok(MutationOutcome::Skipped);
        }

        let action = mv.action();
        if let Err(source) = mv.persist(self.backend.as_ref()).await {
            return Err(self.fail(action, source));
        }
        if let Err(source) = self
            .backend
            .move_task_order(task_id, to_folder_id, new_index)
            .await
        {
            return Err(self.fail(action, source));
        }
        let refreshed = match self.backend.fetch_task_data().await {
            Ok(data) => data,
            Err(source) => return Err(self.fail(action, source)),
        };

        self.data = Arc::new(refreshed);
        tracing::debug!(target: "tasks", task_id, to_folder_id, new_index, "Moved and reordered");
        Ok(MutationOutcome::Applied)
    }

    // ========================================================================
    // Clipboard
    // ========================================================================

    /// Puts the task into `clipboard`. Returns false when the task is unknown.
    pub fn copy_task(&self, task_id: &str, folder_id: &str, clipboard: &mut TaskClipboard) -> bool {
        match self.task(task_id, folder_id) {
            Some(task) => {
                clipboard.set(task.clone(), folder_id);
                true
            }
            None => {
                tracing::warn!(target: "tasks", task_id, folder_id, "Task to copy not found");
                false
            }
        }
    }

    /// Adds a new task to `folder_id` with the clipboard task's text, colour
    /// and completion state.
    pub async fn paste_task(
        &mut self,
        clipboard: &TaskClipboard,
        folder_id: &str,
    ) -> Result<Option<String>, StoreError> {
        let Some(copied) = clipboard.get() else {
            return Ok(None);
        };

        let input = TaskInput::new(copied.task.text.clone())
            .with_colour(copied.task.colour.clone())
            .completed(copied.task.completed);
        self.add_task(input, folder_id).await
    }
}
