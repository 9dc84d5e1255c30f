use crate::plugins::tasks::errors::StoreError;
use crate::plugins::tasks::helpers::{find_folder, task_index};
use crate::plugins::tasks::store::{MutationOutcome, TaskDataStore};
use crate::plugins::tasks::types::TaskData;

/// Where a dragged task would land if released now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Next to a specific task: before it, or after it when `insert_after`.
    Task {
        task_id: String,
        folder_id: String,
        insert_after: bool,
    },
    /// Anywhere in a folder; the task is appended.
    Folder { folder_id: String },
}

/// The store mutation a release resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    Reorder {
        task_id: String,
        folder_id: String,
        new_index: usize,
    },
    Move {
        task_id: String,
        from_folder_id: String,
        to_folder_id: String,
    },
    /// Move into another folder, then reorder there once the move landed.
    MoveAndReorder {
        task_id: String,
        from_folder_id: String,
        to_folder_id: String,
        new_index: usize,
    },
}

impl DropAction {
    /// Works out what dropping `task_id` (currently in `origin_folder_id`) on
    /// `target` means. `None` when the target or the task is no longer in
    /// `data`, or when a folder drop points at the task's own folder.
    pub fn compute(
        task_id: &str,
        origin_folder_id: &str,
        target: &DropTarget,
        data: &TaskData,
    ) -> Option<DropAction> {
        match target {
            DropTarget::Folder { folder_id } => {
                if folder_id == origin_folder_id {
                    return None;
                }
                Some(DropAction::Move {
                    task_id: task_id.to_string(),
                    from_folder_id: origin_folder_id.to_string(),
                    to_folder_id: folder_id.clone(),
                })
            }
            DropTarget::Task {
                task_id: target_id,
                folder_id,
                insert_after,
            } => {
                let folder = find_folder(data, folder_id)?;
                let mut new_index = task_index(folder, target_id)?;
                if *insert_after {
                    new_index += 1;
                }

                if folder_id == origin_folder_id {
                    let original = task_index(folder, task_id)?;
                    // Removing the task first shifts everything after it.
                    if original < new_index {
                        new_index -= 1;
                    }
                    Some(DropAction::Reorder {
                        task_id: task_id.to_string(),
                        folder_id: folder_id.clone(),
                        new_index,
                    })
                } else {
                    Some(DropAction::MoveAndReorder {
                        task_id: task_id.to_string(),
                        from_folder_id: origin_folder_id.to_string(),
                        to_folder_id: folder_id.clone(),
                        new_index,
                    })
                }
            }
        }
    }

    pub async fn apply(&self, store: &mut TaskDataStore) -> Result<MutationOutcome, StoreError> {
        match self {
            DropAction::Reorder {
                task_id,
                folder_id,
                new_index,
            } => store.reorder_task(task_id, folder_id, *new_index).await,
            DropAction::Move {
                task_id,
                from_folder_id,
                to_folder_id,
            } => {
                store
                    .move_task_to_folder(task_id, from_folder_id, to_folder_id)
                    .await
            }
            DropAction::MoveAndReorder {
                task_id,
                from_folder_id,
                to_folder_id,
                new_index,
            } => {
                let moved = store
                    .move_task_to_folder(task_id, from_folder_id, to_folder_id)
                    .await?;
                if !moved.is_applied() {
                    return Ok(moved);
                }
                store.reorder_task(task_id, to_folder_id, *new_index).await
            }
        }
    }
}
