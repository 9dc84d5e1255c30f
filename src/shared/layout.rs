use serde::{Deserialize, Serialize};

/// Placement of a folder's floating window. Persisted with the folder but
/// never read by the task/drag logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderLayout {
    pub width: i32,
    pub height: i32,
    pub x: i32,
    pub y: i32,
    pub zindex: i32,
}

impl Default for FolderLayout {
    fn default() -> Self {
        Self {
            width: 280,
            height: 360,
            x: 40,
            y: 40,
            zindex: 1,
        }
    }
}
