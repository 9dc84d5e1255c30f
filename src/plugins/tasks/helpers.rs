use super::types::{Folder, Task, TaskData};

pub fn find_folder<'a>(data: &'a TaskData, id: &str) -> Option<&'a Folder> {
    data.folders.iter().find(|folder| folder.id == id)
}

pub fn find_folder_mut<'a>(data: &'a mut TaskData, id: &str) -> Option<&'a mut Folder> {
    data.folders.iter_mut().find(|folder| folder.id == id)
}

pub fn find_task<'a>(folder: &'a Folder, id: &str) -> Option<&'a Task> {
    folder.tasks.iter().find(|task| task.id == id)
}

pub fn find_task_mut<'a>(folder: &'a mut Folder, id: &str) -> Option<&'a mut Task> {
    folder.tasks.iter_mut().find(|task| task.id == id)
}

pub fn task_index(folder: &Folder, id: &str) -> Option<usize> {
    folder.tasks.iter().position(|task| task.id == id)
}

/// The folder currently holding `task_id`, wherever it is.
pub fn owning_folder<'a>(data: &'a TaskData, task_id: &str) -> Option<&'a Folder> {
    data.folders
        .iter()
        .find(|folder| folder.tasks.iter().any(|task| task.id == task_id))
}

pub fn find_task_in<'a>(data: &'a TaskData, task_id: &str, folder_id: &str) -> Option<&'a Task> {
    find_folder(data, folder_id).and_then(|folder| find_task(folder, task_id))
}
