use super::types::Task;

/// Last task copied by the user. Owned by whoever handles the shortcuts and
/// passed to the store's copy/paste operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskClipboard {
    entry: Option<CopiedTask>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedTask {
    pub task: Task,
    pub folder_id: String,
}

impl TaskClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, task: Task, folder_id: impl Into<String>) {
        self.entry = Some(CopiedTask {
            task,
            folder_id: folder_id.into(),
        });
    }

    pub fn get(&self) -> Option<&CopiedTask> {
        self.entry.as_ref()
    }

    pub fn has_task(&self) -> bool {
        self.entry.is_some()
    }
}
