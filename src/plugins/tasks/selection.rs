use super::types::TaskData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What the keyboard currently points at. A selected task always carries the
/// folder it lives in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub folder_id: Option<String>,
    pub task_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item<'a> {
    Folder(&'a str),
    Task { id: &'a str, folder_id: &'a str },
}

fn flatten(data: &TaskData) -> Vec<Item<'_>> {
    let mut items = Vec::with_capacity(data.folders.len() + data.task_count());
    for folder in &data.folders {
        items.push(Item::Folder(&folder.id));
        for task in &folder.tasks {
            items.push(Item::Task {
                id: &task.id,
                folder_id: &folder.id,
            });
        }
    }
    items
}

impl Selection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn folder(folder_id: impl Into<String>) -> Self {
        Self {
            folder_id: Some(folder_id.into()),
            task_id: None,
        }
    }

    pub fn task(task_id: impl Into<String>, folder_id: impl Into<String>) -> Self {
        Self {
            folder_id: Some(folder_id.into()),
            task_id: Some(task_id.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.folder_id.is_none() && self.task_id.is_none()
    }

    /// Drops ids that no longer exist in `data`.
    pub fn retain_existing(&mut self, data: &TaskData) {
        let items = flatten(data);
        if let Some(task_id) = self.task_id.as_deref() {
            let owner = items.iter().find_map(|item| match item {
                Item::Task { id, folder_id } if *id == task_id => Some(folder_id.to_string()),
                _ => None,
            });
            match owner {
                Some(folder_id) => {
                    self.folder_id = Some(folder_id);
                    return;
                }
                None => self.task_id = None,
            }
        }
        if let Some(folder_id) = self.folder_id.as_deref() {
            if !items.contains(&Item::Folder(folder_id)) {
                self.folder_id = None;
            }
        }
    }

    /// Up/down walk every folder and task in display order; left/right jump
    /// between folders. Movement stops at either end.
    pub fn navigate(&mut self, data: &TaskData, direction: Direction) {
        match direction {
            Direction::Left | Direction::Right => self.navigate_folders(data, direction),
            Direction::Up | Direction::Down => self.navigate_items(data, direction),
        }
    }

    fn navigate_folders(&mut self, data: &TaskData, direction: Direction) {
        if data.folders.is_empty() {
            return;
        }
        let last = data.folders.len() - 1;
        let current = self
            .folder_id
            .as_deref()
            .and_then(|id| data.folders.iter().position(|f| f.id == id));

        let next = match (current, direction) {
            (Some(index), Direction::Left) => index.saturating_sub(1),
            (Some(index), _) => (index + 1).min(last),
            (None, Direction::Left) => last,
            (None, _) => 0,
        };
        if current == Some(next) {
            return;
        }
        *self = Selection::folder(data.folders[next].id.clone());
    }

    fn navigate_items(&mut self, data: &TaskData, direction: Direction) {
        let items = flatten(data);
        if items.is_empty() {
            return;
        }

        let current = match (self.task_id.as_deref(), self.folder_id.as_deref()) {
            (Some(task_id), _) => items
                .iter()
                .position(|item| matches!(item, Item::Task { id, .. } if *id == task_id)),
            (None, Some(folder_id)) => items.iter().position(|item| *item == Item::Folder(folder_id)),
            (None, None) => None,
        };

        let next = match (current, direction) {
            (None, _) => 0,
            (Some(index), Direction::Up) => index.saturating_sub(1),
            (Some(index), _) => (index + 1).min(items.len() - 1),
        };
        if current == Some(next) {
            return;
        }

        *self = match items[next] {
            Item::Folder(id) => Selection::folder(id),
            Item::Task { id, folder_id } => Selection::task(id, folder_id),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::tasks::types::{Folder, FolderLayout, Task};

    fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            text: id.to_string(),
            completed: false,
            colour: "#111827".to_string(),
        }
    }

    fn data() -> TaskData {
        let mut f1 = Folder::new("F1", "One", "#8b5cf6", FolderLayout::default());
        f1.tasks = vec![task("A"), task("B")];
        let mut f2 = Folder::new("F2", "Two", "#8b5cf6", FolderLayout::default());
        f2.tasks = vec![task("X")];
        TaskData::new(vec![f1, f2])
    }

    #[test]
    fn test_down_from_nothing_selects_first_item() {
        let mut selection = Selection::none();
        selection.navigate(&data(), Direction::Down);
        assert_eq!(selection, Selection::folder("F1"));
    }

    #[test]
    fn test_up_down_walk_folders_and_tasks() {
        let data = data();
        let mut selection = Selection::task("B", "F1");

        selection.navigate(&data, Direction::Down);
        assert_eq!(selection, Selection::folder("F2"));
        selection.navigate(&data, Direction::Down);
        assert_eq!(selection, Selection::task("X", "F2"));
        selection.navigate(&data, Direction::Down);
        assert_eq!(selection, Selection::task("X", "F2"));

        selection.navigate(&data, Direction::Up);
        selection.navigate(&data, Direction::Up);
        assert_eq!(selection, Selection::task("B", "F1"));
    }

    #[test]
    fn test_left_right_move_between_folders() {
        let data = data();
        let mut selection = Selection::none();

        selection.navigate(&data, Direction::Left);
        assert_eq!(selection, Selection::folder("F2"));
        selection.navigate(&data, Direction::Left);
        assert_eq!(selection, Selection::folder("F1"));
        selection.navigate(&data, Direction::Left);
        assert_eq!(selection, Selection::folder("F1"));
    }

    #[test]
    fn test_left_right_from_task_drops_task() {
        let mut selection = Selection::task("A", "F1");
        selection.navigate(&data(), Direction::Right);
        assert_eq!(selection, Selection::folder("F2"));
    }

    #[test]
    fn test_retain_existing_forgets_deleted_task() {
        let mut data = data();
        data.folders[0].tasks.remove(0);
        let mut selection = Selection::task("A", "F1");
        selection.retain_existing(&data);
        assert_eq!(selection, Selection::folder("F1"));

        data.folders.remove(0);
        selection.retain_existing(&data);
        assert!(selection.is_empty());
    }
}
