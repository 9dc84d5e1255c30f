use serde::{Deserialize, Serialize};

pub use crate::shared::layout::FolderLayout;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub colour: String,
}

/// Fields supplied when creating a task; the id is assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub text: String,
    pub completed: bool,
    /// Falls back to the configured default colour when `None` or empty.
    pub colour: Option<String>,
}

impl TaskInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = Some(colour.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub colour: String,
    pub visible: bool,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(flatten)]
    pub layout: FolderLayout,
}

impl Folder {
    /// An empty, expanded folder.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        colour: impl Into<String>,
        layout: FolderLayout,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            colour: colour.into(),
            visible: true,
            tasks: Vec::new(),
            layout,
        }
    }

    pub fn task_ids(&self) -> Vec<&str> {
        self.tasks.iter().map(|task| task.id.as_str()).collect()
    }
}

/// Every folder with its tasks, in display order. Stored on disk as a plain
/// JSON array of folders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskData {
    pub folders: Vec<Folder>,
}

impl TaskData {
    pub fn new(folders: Vec<Folder>) -> Self {
        Self { folders }
    }

    pub fn task_count(&self) -> usize {
        self.folders.iter().map(|folder| folder.tasks.len()).sum()
    }
}
