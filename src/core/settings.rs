use crate::shared::errors::StorageError;
use crate::shared::layout::FolderLayout;
use crate::shared::paths::ensure_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetSettings {
    pub default_task_colour: String,
    pub default_folder_colour: String,
    /// Overrides the default `Tasks.json` location.
    pub data_file: Option<PathBuf>,
    pub drag: DragSettings,
    /// Window placement given to newly created folders.
    pub folder_layout: FolderLayout,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            default_task_colour: "#111827".to_string(),
            default_folder_colour: "#8b5cf6".to_string(),
            data_file: None,
            drag: DragSettings::default(),
            folder_layout: FolderLayout::default(),
        }
    }
}

/// Timing and distance thresholds for the pointer drag gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DragSettings {
    /// Hold time after which a press on a task turns into a drag.
    pub press_delay_ms: u64,
    /// Movement (on either axis) that turns a press into a drag immediately.
    pub press_threshold_px: f64,
    /// Movement only counts as a real drag after this long.
    pub activation_delay_ms: u64,
    /// Clicks are ignored for this long after a real drag ends.
    pub click_cooldown_ms: u64,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            press_delay_ms: 200,
            press_threshold_px: 5.0,
            activation_delay_ms: 100,
            click_cooldown_ms: 100,
        }
    }
}

impl DragSettings {
    pub fn press_delay(&self) -> Duration {
        Duration::from_millis(self.press_delay_ms)
    }

    pub fn activation_delay(&self) -> Duration {
        Duration::from_millis(self.activation_delay_ms)
    }

    pub fn click_cooldown(&self) -> Duration {
        Duration::from_millis(self.click_cooldown_ms)
    }
}

/// Loads settings from `path`, falling back to defaults when the file is
/// missing or unreadable.
pub fn load_settings(path: &Path) -> WidgetSettings {
    if !path.exists() {
        return WidgetSettings::default();
    }

    match load_settings_from_file(path) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(target: "system", path = %path.display(), "Ignoring unreadable settings: {}", e);
            WidgetSettings::default()
        }
    }
}

fn load_settings_from_file(path: &Path) -> Result<WidgetSettings, StorageError> {
    let contents = std::fs::read_to_string(path)?;
    let settings = serde_json::from_str(&contents)?;
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &WidgetSettings) -> Result<(), StorageError> {
    if let Some(dir) = path.parent() {
        ensure_dir(dir).map_err(|e| StorageError::directory(e.to_string()))?;
    }

    let contents = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, contents)?;
    Ok(())
}
