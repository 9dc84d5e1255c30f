//! Pure mutations over [`TaskData`].
//!
//! Both the persistence backends and the store's local patch run these, so
//! the on-disk and in-memory results of a command can never drift apart.
//! Every function either applies its change completely or returns an error
//! with `data` untouched.

use super::errors::TaskOpError;
use super::helpers::{find_folder, find_folder_mut, find_task_mut, task_index};
use super::types::{Folder, Task, TaskData};

/// Suffix appended to the name of a duplicated folder.
pub const COPY_SUFFIX: &str = " (Copy)";

fn folder_mut<'a>(data: &'a mut TaskData, folder_id: &str) -> Result<&'a mut Folder, TaskOpError> {
    find_folder_mut(data, folder_id).ok_or_else(|| TaskOpError::FolderNotFound(folder_id.to_string()))
}

fn task_mut<'a>(
    data: &'a mut TaskData,
    task_id: &str,
    folder_id: &str,
) -> Result<&'a mut Task, TaskOpError> {
    let folder = folder_mut(data, folder_id)?;
    find_task_mut(folder, task_id).ok_or_else(|| TaskOpError::task_not_found(task_id, folder_id))
}

/// Appends `task` to the end of the folder's sequence.
pub fn insert_task(data: &mut TaskData, task: Task, folder_id: &str) -> Result<(), TaskOpError> {
    folder_mut(data, folder_id)?.tasks.push(task);
    Ok(())
}

pub fn remove_task(data: &mut TaskData, task_id: &str, folder_id: &str) -> Result<Task, TaskOpError> {
    let folder = folder_mut(data, folder_id)?;
    let index = task_index(folder, task_id).ok_or_else(|| TaskOpError::task_not_found(task_id, folder_id))?;
    Ok(folder.tasks.remove(index))
}

pub fn toggle_task(data: &mut TaskData, task_id: &str, folder_id: &str) -> Result<(), TaskOpError> {
    let task = task_mut(data, task_id, folder_id)?;
    task.completed = !task.completed;
    Ok(())
}

pub fn edit_task(
    data: &mut TaskData,
    task_id: &str,
    folder_id: &str,
    new_text: &str,
    new_colour: &str,
) -> Result<(), TaskOpError> {
    let task = task_mut(data, task_id, folder_id)?;
    task.text = new_text.to_string();
    task.colour = new_colour.to_string();
    Ok(())
}

/// Appends a copy of the task under `clone_id` at the end of the same folder.
pub fn duplicate_task(
    data: &mut TaskData,
    task_id: &str,
    clone_id: &str,
    folder_id: &str,
) -> Result<(), TaskOpError> {
    let folder = folder_mut(data, folder_id)?;
    let index = task_index(folder, task_id).ok_or_else(|| TaskOpError::task_not_found(task_id, folder_id))?;

    let mut clone = folder.tasks[index].clone();
    clone.id = clone_id.to_string();
    folder.tasks.push(clone);
    Ok(())
}

pub fn insert_folder(data: &mut TaskData, folder: Folder) {
    data.folders.push(folder);
}

/// Removes the folder together with every task it owns.
pub fn remove_folder(data: &mut TaskData, folder_id: &str) -> Result<Folder, TaskOpError> {
    let index = data
        .folders
        .iter()
        .position(|folder| folder.id == folder_id)
        .ok_or_else(|| TaskOpError::FolderNotFound(folder_id.to_string()))?;
    Ok(data.folders.remove(index))
}

pub fn toggle_folder(data: &mut TaskData, folder_id: &str) -> Result<(), TaskOpError> {
    let folder = folder_mut(data, folder_id)?;
    folder.visible = !folder.visible;
    Ok(())
}

pub fn edit_folder(
    data: &mut TaskData,
    folder_id: &str,
    new_name: &str,
    new_colour: &str,
) -> Result<(), TaskOpError> {
    let folder = folder_mut(data, folder_id)?;
    folder.name = new_name.to_string();
    folder.colour = new_colour.to_string();
    Ok(())
}

/// Appends a deep copy of the folder named `"<name> (Copy)"`. Task `i` of the
/// clone gets `task_clone_ids[i]`.
pub fn duplicate_folder(
    data: &mut TaskData,
    folder_id: &str,
    folder_clone_id: &str,
    task_clone_ids: &[String],
) -> Result<(), TaskOpError> {
    let source = find_folder(data, folder_id).ok_or_else(|| TaskOpError::FolderNotFound(folder_id.to_string()))?;

    if source.tasks.len() != task_clone_ids.len() {
        return Err(TaskOpError::CloneCountMismatch {
            expected: source.tasks.len(),
            got: task_clone_ids.len(),
        });
    }

    let mut clone = source.clone();
    clone.id = folder_clone_id.to_string();
    clone.name = format!("{}{}", source.name, COPY_SUFFIX);
    for (task, clone_id) in clone.tasks.iter_mut().zip(task_clone_ids) {
        task.id = clone_id.clone();
    }

    data.folders.push(clone);
    Ok(())
}

/// Moves the task to the end of `new_folder_id`. Both folders are resolved
/// before anything is removed, so a failed move never loses the task.
pub fn move_task(
    data: &mut TaskData,
    task_id: &str,
    folder_id: &str,
    new_folder_id: &str,
) -> Result<(), TaskOpError> {
    if find_folder(data, new_folder_id).is_none() {
        return Err(TaskOpError::FolderNotFound(new_folder_id.to_string()));
    }
    if folder_id == new_folder_id {
        return match find_folder(data, folder_id).and_then(|folder| task_index(folder, task_id)) {
            Some(_) => Ok(()),
            None => Err(TaskOpError::task_not_found(task_id, folder_id)),
        };
    }

    let task = remove_task(data, task_id, folder_id)?;
    folder_mut(data, new_folder_id)?.tasks.push(task);
    Ok(())
}

/// Re-inserts the task at `new_index` within its folder. Indices past the end
/// append.
pub fn reorder_task(
    data: &mut TaskData,
    task_id: &str,
    folder_id: &str,
    new_index: usize,
) -> Result<(), TaskOpError> {
    let folder = folder_mut(data, folder_id)?;
    let old_index = task_index(folder, task_id).ok_or_else(|| TaskOpError::task_not_found(task_id, folder_id))?;

    let task = folder.tasks.remove(old_index);
    let final_index = new_index.min(folder.tasks.len());
    folder.tasks.insert(final_index, task);
    Ok(())
}
