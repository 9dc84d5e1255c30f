pub mod core;
pub mod plugins;
pub mod shared;

use std::path::PathBuf;
use std::sync::Arc;

use crate::core::logging::{init_logging, LoggingGuards};
use crate::core::settings::{load_settings, WidgetSettings};
use crate::plugins::tasks::drag::{DragEngine, HitRegions};
use crate::plugins::tasks::init_task_store;
use crate::plugins::tasks::notify::ToastQueue;
use crate::plugins::tasks::shortcuts::ShortcutCoordinator;
use crate::plugins::tasks::store::{StoreDefaults, TaskDataStore};
use crate::shared::errors::StorageError;
use crate::shared::paths::{get_log_dir, get_settings_path, get_tasks_file};

/// Where things live. Every `None` falls back to the per-user data directory.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub settings_path: Option<PathBuf>,
    /// Wins over `dataFile` from the settings file.
    pub data_file: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    /// Skip installing the file logger (hosts with their own subscriber).
    pub skip_logging: bool,
}

/// Everything the presentation layer talks to.
pub struct Widget {
    pub settings: WidgetSettings,
    pub store: TaskDataStore,
    pub drag: DragEngine,
    pub hit_regions: HitRegions,
    pub shortcuts: ShortcutCoordinator,
    /// Toasts raised by the store and shortcuts, drained by the host.
    pub toasts: Arc<ToastQueue>,
    _logging: Option<LoggingGuards>,
}

/// Loads settings, starts logging, opens the task data file and loads the
/// first snapshot.
///
/// A failed first load is not fatal: the widget starts empty and the error
/// toast is already queued.
pub async fn bootstrap(options: Options) -> Result<Widget, StorageError> {
    let logging = if options.skip_logging {
        None
    } else {
        let log_dir = options.log_dir.clone().unwrap_or_else(get_log_dir);
        match init_logging(&log_dir) {
            Ok(guards) => Some(guards),
            Err(e) => {
                eprintln!("File logging disabled: {}", e);
                None
            }
        }
    };

    let settings_path = options.settings_path.clone().unwrap_or_else(get_settings_path);
    let settings = load_settings(&settings_path);

    let data_file = options
        .data_file
        .clone()
        .or_else(|| settings.data_file.clone())
        .unwrap_or_else(get_tasks_file);

    let toasts = Arc::new(ToastQueue::new());
    let mut store = init_task_store(&data_file, StoreDefaults::from(&settings), toasts.clone()).await?;

    if let Err(e) = store.load().await {
        tracing::error!(target: "system", "Starting with no tasks: {}", e);
    }

    tracing::info!(
        target: "system",
        data_file = %data_file.display(),
        folders = store.folders().len(),
        "Widget ready"
    );

    Ok(Widget {
        drag: DragEngine::new(settings.drag.clone()),
        hit_regions: HitRegions::new(),
        shortcuts: ShortcutCoordinator::new(toasts.clone()),
        settings,
        store,
        toasts,
        _logging: logging,
    })
}
