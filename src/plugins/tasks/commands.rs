//! Store mutations as command objects.
//!
//! A command knows how to persist itself through a [`TaskBackend`] and how
//! to patch a local [`TaskData`] snapshot. The store runs them uniformly:
//! stage the patch on a copy, persist, then commit the copy.

use super::backend::TaskBackend;
use super::errors::{BackendError, TaskOpError};
use super::ops;
use super::types::{Folder, Task, TaskData};

#[derive(Debug, Clone, PartialEq)]
pub enum TaskCommand {
    CreateTask {
        task: Task,
        folder_id: String,
    },
    DeleteTask {
        task_id: String,
        folder_id: String,
    },
    ToggleTask {
        task_id: String,
        folder_id: String,
    },
    EditTask {
        task_id: String,
        folder_id: String,
        text: String,
        colour: String,
    },
    DuplicateTask {
        task_id: String,
        clone_id: String,
        folder_id: String,
    },
    CreateFolder {
        folder: Folder,
    },
    DeleteFolder {
        folder_id: String,
    },
    ToggleFolder {
        folder_id: String,
    },
    EditFolder {
        folder_id: String,
        name: String,
        colour: String,
    },
    DuplicateFolder {
        folder_id: String,
        clone_id: String,
        task_clone_ids: Vec<String>,
    },
    MoveTask {
        task_id: String,
        from_folder_id: String,
        to_folder_id: String,
    },
    ReorderTask {
        task_id: String,
        folder_id: String,
        new_index: usize,
    },
}

impl TaskCommand {
    /// What the user was trying to do, as in "Failed to <action>".
    pub fn action(&self) -> &'static str {
        match self {
            TaskCommand::CreateTask { .. } => "create task",
            TaskCommand::DeleteTask { .. } => "delete task",
            TaskCommand::ToggleTask { .. } => "toggle task completion",
            TaskCommand::EditTask { .. } => "edit task",
            TaskCommand::DuplicateTask { .. } => "duplicate task",
            TaskCommand::CreateFolder { .. } => "create folder",
            TaskCommand::DeleteFolder { .. } => "delete folder",
            TaskCommand::ToggleFolder { .. } => "toggle folder visibility",
            TaskCommand::EditFolder { .. } => "edit folder",
            TaskCommand::DuplicateFolder { .. } => "duplicate folder",
            TaskCommand::MoveTask { .. } => "move task",
            TaskCommand::ReorderTask { .. } => "reorder task",
        }
    }

    pub async fn persist(&self, backend: &dyn TaskBackend) -> Result<(), BackendError> {
        match self {
            TaskCommand::CreateTask { task, folder_id } => backend.create_task(task, folder_id).await,
            TaskCommand::DeleteTask { task_id, folder_id } => {
                backend.delete_task(task_id, folder_id).await
            }
            TaskCommand::ToggleTask { task_id, folder_id } => {
                backend.complete_task(task_id, folder_id).await
            }
            TaskCommand::EditTask {
                task_id,
                folder_id,
                text,
                colour,
            } => backend.edit_task(task_id, folder_id, text, colour).await,
            TaskCommand::DuplicateTask {
                task_id,
                clone_id,
                folder_id,
            } => backend.duplicate_task(task_id, clone_id, folder_id).await,
            TaskCommand::CreateFolder { folder } => {
                backend
                    .create_folder(&folder.name, &folder.id, &folder.colour, folder.layout)
                    .await
            }
            TaskCommand::DeleteFolder { folder_id } => backend.delete_tasks_folder(folder_id).await,
            TaskCommand::ToggleFolder { folder_id } => {
                backend.toggle_visability_folder(folder_id).await
            }
            TaskCommand::EditFolder {
                folder_id,
                name,
                colour,
            } => backend.edit_folder(folder_id, name, colour).await,
            TaskCommand::DuplicateFolder {
                folder_id,
                clone_id,
                task_clone_ids,
            } => {
                backend
                    .duplicate_folder(folder_id, clone_id, task_clone_ids)
                    .await
            }
            TaskCommand::MoveTask {
                task_id,
                from_folder_id,
                to_folder_id,
            } => {
                backend
                    .move_task_to_folder(task_id, from_folder_id, to_folder_id)
                    .await
            }
            TaskCommand::ReorderTask {
                task_id,
                folder_id,
                new_index,
            } => backend.move_task_order(task_id, folder_id, *new_index).await,
        }
    }

    /// Applies the command to `data`. On error `data` is unchanged.
    pub fn patch(&self, data: &mut TaskData) -> Result<(), TaskOpError> {
        match self {
            TaskCommand::CreateTask { task, folder_id } => {
                ops::insert_task(data, task.clone(), folder_id)
            }
            TaskCommand::DeleteTask { task_id, folder_id } => {
                ops::remove_task(data, task_id, folder_id).map(|_| ())
            }
            TaskCommand::ToggleTask { task_id, folder_id } => {
                ops::toggle_task(data, task_id, folder_id)
            }
            TaskCommand::EditTask {
                task_id,
                folder_id,
                text,
                colour,
            } => ops::edit_task(data, task_id, folder_id, text, colour),
            TaskCommand::DuplicateTask {
                task_id,
                clone_id,
                folder_id,
            } => ops::duplicate_task(data, task_id, clone_id, folder_id),
            TaskCommand::CreateFolder { folder } => {
                ops::insert_folder(data, folder.clone());
                Ok(())
            }
            TaskCommand::DeleteFolder { folder_id } => ops::remove_folder(data, folder_id).map(|_| ()),
            TaskCommand::ToggleFolder { folder_id } => ops::toggle_folder(data, folder_id),
            TaskCommand::EditFolder {
                folder_id,
                name,
                colour,
            } => ops::edit_folder(data, folder_id, name, colour),
            TaskCommand::DuplicateFolder {
                folder_id,
                clone_id,
                task_clone_ids,
            } => ops::duplicate_folder(data, folder_id, clone_id, task_clone_ids),
            TaskCommand::MoveTask {
                task_id,
                from_folder_id,
                to_folder_id,
            } => ops::move_task(data, task_id, from_folder_id, to_folder_id),
            TaskCommand::ReorderTask {
                task_id,
                folder_id,
                new_index,
            } => ops::reorder_task(data, task_id, folder_id, *new_index),
        }
    }
}
