//! Effects of the widget's keyboard shortcuts on the task data.
//!
//! Key bindings belong to the host. It maps keys to [`ShortcutAction`]s and
//! hands them to the [`ShortcutCoordinator`], which owns the clipboard, the
//! selection, the inline editor and the add form.

use std::sync::Arc;
use std::time::Instant;

use super::clipboard::TaskClipboard;
use super::drag::DragEngine;
use super::editing::EditTarget;
use super::errors::StoreError;
use super::helpers::{find_folder, owning_folder};
use super::notify::{Notifier, ToastKind};
use super::selection::{Direction, Selection};
use super::store::TaskDataStore;
use super::types::{Task, TaskInput};

const QUICK_TASK_TEXT: &str = "New Task";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Task,
    Folder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Copy,
    Paste,
    Duplicate,
    Delete,
    ToggleCompletion,
    QuickAddTask,
    OpenAddForm(FormMode),
    CloseForms,
    StartEditing,
    CommitEdit,
    CancelEdit,
    Navigate(Direction),
}

pub struct ShortcutCoordinator {
    clipboard: TaskClipboard,
    selection: Selection,
    edit_target: EditTarget,
    add_form: Option<FormMode>,
    notifier: Arc<dyn Notifier>,
}

impl ShortcutCoordinator {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            clipboard: TaskClipboard::new(),
            selection: Selection::none(),
            edit_target: EditTarget::None,
            add_form: None,
            notifier,
        }
    }

    pub fn clipboard(&self) -> &TaskClipboard {
        &self.clipboard
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn edit_target(&self) -> &EditTarget {
        &self.edit_target
    }

    /// Lets the host's inline editor update the pending label and colour.
    pub fn edit_target_mut(&mut self) -> &mut EditTarget {
        &mut self.edit_target
    }

    pub fn add_form(&self) -> Option<FormMode> {
        self.add_form
    }

    /// Selects a task unless the click is the tail of a drag. Returns whether
    /// the selection changed.
    pub fn click_task(&mut self, task_id: &str, folder_id: &str, drag: &DragEngine, now: Instant) -> bool {
        if drag.should_ignore_click(now) {
            tracing::debug!(target: "drag", task_id, "Click swallowed after drag");
            return false;
        }
        self.selection = Selection::task(task_id, folder_id);
        true
    }

    pub fn click_folder(&mut self, folder_id: &str, drag: &DragEngine, now: Instant) -> bool {
        if drag.should_ignore_click(now) {
            tracing::debug!(target: "drag", folder_id, "Click swallowed after drag");
            return false;
        }
        self.selection = Selection::folder(folder_id);
        true
    }

    fn toast(&self, message: &str, kind: ToastKind) {
        self.notifier.notify(message, kind);
    }

    fn selected_task(&self, store: &TaskDataStore) -> Option<(Task, String)> {
        let task_id = self.selection.task_id.as_deref()?;
        let folder = owning_folder(store.data(), task_id)?;
        let task = folder.tasks.iter().find(|task| task.id == task_id)?;
        Some((task.clone(), folder.id.clone()))
    }

    fn selected_folder_name(&self, store: &TaskDataStore) -> Option<(String, String)> {
        let folder_id = self.selection.folder_id.as_deref()?;
        let folder = find_folder(store.data(), folder_id)?;
        Some((folder.id.clone(), folder.name.clone()))
    }

    pub async fn apply(
        &mut self,
        action: ShortcutAction,
        store: &mut TaskDataStore,
    ) -> Result<(), StoreError> {
        tracing::debug!(target: "tasks", ?action, "Shortcut");
        let result = self.dispatch(action, store).await;
        self.selection.retain_existing(store.data());
        result
    }

    async fn dispatch(&mut self, action: ShortcutAction, store: &mut TaskDataStore) -> Result<(), StoreError> {
        match action {
            ShortcutAction::Copy => self.copy(store),
            ShortcutAction::Paste => self.paste(store).await?,
            ShortcutAction::Duplicate => self.duplicate(store).await?,
            ShortcutAction::Delete => self.delete(store).await?,
            ShortcutAction::ToggleCompletion => {
                if let Some((task, folder_id)) = self.selected_task(store) {
                    let outcome = store.toggle_task_completion(&task.id, &folder_id).await?;
                    if outcome.is_applied() {
                        let status = if task.completed { "incomplete" } else { "complete" };
                        self.toast(&format!("Marked task as {}", status), ToastKind::Success);
                    }
                }
            }
            ShortcutAction::QuickAddTask => {
                let Some(folder_id) = self.selection.folder_id.clone() else {
                    self.toast("Select a folder first.", ToastKind::Info);
                    return Ok(());
                };
                if store
                    .add_task(TaskInput::new(QUICK_TASK_TEXT), &folder_id)
                    .await?
                    .is_some()
                {
                    self.toast("Quick task added", ToastKind::Success);
                }
            }
            ShortcutAction::OpenAddForm(mode) => self.add_form = Some(mode),
            ShortcutAction::CloseForms => self.add_form = None,
            ShortcutAction::StartEditing => self.start_editing(store),
            ShortcutAction::CommitEdit => {
                self.edit_target.commit(store).await?;
            }
            ShortcutAction::CancelEdit => self.edit_target.cancel(),
            ShortcutAction::Navigate(direction) => self.selection.navigate(store.data(), direction),
        }
        Ok(())
    }

    fn copy(&mut self, store: &TaskDataStore) {
        if let Some((task, folder_id)) = self.selected_task(store) {
            if store.copy_task(&task.id, &folder_id, &mut self.clipboard) {
                self.toast(&format!("Copied task: \"{}\"", task.text), ToastKind::Success);
            }
        } else if self.selection.folder_id.is_some() {
            self.toast("Cannot copy folders. Use Ctrl+D to duplicate.", ToastKind::Info);
        }
    }

    async fn paste(&mut self, store: &mut TaskDataStore) -> Result<(), StoreError> {
        let Some(copied) = self.clipboard.get() else {
            self.toast("Clipboard is empty.", ToastKind::Info);
            return Ok(());
        };
        let text = copied.task.text.clone();
        let Some(folder_id) = self.selection.folder_id.clone() else {
            self.toast("Select a folder to paste into.", ToastKind::Info);
            return Ok(());
        };

        if store.paste_task(&self.clipboard, &folder_id).await?.is_some() {
            self.toast(&format!("Pasted task: \"{}\"", text), ToastKind::Success);
        }
        Ok(())
    }

    async fn duplicate(&mut self, store: &mut TaskDataStore) -> Result<(), StoreError> {
        if let Some((task, folder_id)) = self.selected_task(store) {
            if store.duplicate_task(&task.id, &folder_id).await?.is_some() {
                self.toast(&format!("Duplicated task: \"{}\"", task.text), ToastKind::Success);
            }
        } else if let Some((folder_id, name)) = self.selected_folder_name(store) {
            if store.duplicate_folder(&folder_id).await?.is_some() {
                self.toast(&format!("Duplicated folder: \"{}\"", name), ToastKind::Success);
            }
        }
        Ok(())
    }

    async fn delete(&mut self, store: &mut TaskDataStore) -> Result<(), StoreError> {
        if let Some((task, folder_id)) = self.selected_task(store) {
            if store.delete_task(&task.id, &folder_id).await?.is_applied() {
                self.toast(&format!("Deleted task: \"{}\"", task.text), ToastKind::Success);
            }
        } else if let Some((folder_id, name)) = self.selected_folder_name(store) {
            if store.delete_folder(&folder_id).await?.is_applied() {
                self.toast(&format!("Deleted folder: \"{}\"", name), ToastKind::Success);
            }
        }
        Ok(())
    }

    fn start_editing(&mut self, store: &TaskDataStore) {
        if let Some((task, folder_id)) = self.selected_task(store) {
            self.edit_target = EditTarget::EditingTask {
                id: task.id,
                folder_id,
                text: task.text,
                colour: task.colour,
            };
        } else if let Some(folder) = self
            .selection
            .folder_id
            .as_deref()
            .and_then(|id| find_folder(store.data(), id))
        {
            self.edit_target = EditTarget::EditingFolder {
                id: folder.id.clone(),
                name: folder.name.clone(),
                colour: folder.colour.clone(),
            };
        } else {
            self.toast("No item selected to edit", ToastKind::Info);
        }
    }
}
