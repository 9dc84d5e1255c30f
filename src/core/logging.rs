use std::collections::HashMap;
use std::path::Path;

use crate::shared::errors::StorageError;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Targets that get their own log file. Everything else lands in `system.log`.
pub const LOG_TARGETS: [&str; 2] = ["tasks", "drag"];

/// Guards that must be kept alive to ensure logs are flushed
pub struct LoggingGuards {
    _guards: Vec<WorkerGuard>,
}

struct TargetWriter {
    writers: HashMap<String, tracing_appender::non_blocking::NonBlocking>,
    system_writer: tracing_appender::non_blocking::NonBlocking,
}

impl TargetWriter {
    fn new(
        writers: HashMap<String, tracing_appender::non_blocking::NonBlocking>,
        system_writer: tracing_appender::non_blocking::NonBlocking,
    ) -> Self {
        Self {
            writers,
            system_writer,
        }
    }
}

/// True when `target` is `name` itself or one of its `name::` children.
pub(crate) fn target_matches(target: &str, name: &str) -> bool {
    target == name
        || target
            .strip_prefix(name)
            .is_some_and(|rest| rest.starts_with("::"))
}

impl<'a> MakeWriter<'a> for TargetWriter {
    type Writer = Box<dyn std::io::Write + 'a>;

    fn make_writer(&'a self) -> Self::Writer {
        Box::new(self.system_writer.clone())
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        let target = meta.target();

        for (name, writer) in &self.writers {
            if target_matches(target, name) {
                return Box::new(writer.clone());
            }
        }

        Box::new(self.system_writer.clone())
    }
}

fn daily_appender(log_dir: &Path, prefix: &str) -> Result<RollingFileAppender, StorageError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| StorageError::directory(format!("{}: {}", log_dir.display(), e)))
}

/// Initialize the logging system with one rolling file per target in `log_dir`.
///
/// A subscriber that is already installed (tests, embedding hosts) is left in
/// place; the file writers are still created so the guards stay valid.
/// Fails without installing anything when the log files can't be created.
pub fn init_logging(log_dir: &Path) -> Result<LoggingGuards, StorageError> {
    std::fs::create_dir_all(log_dir)
        .map_err(|e| StorageError::directory(format!("{}: {}", log_dir.display(), e)))?;

    let mut guards = Vec::new();
    let mut target_writers = HashMap::new();

    for target in LOG_TARGETS {
        let (non_blocking, guard) = tracing_appender::non_blocking(daily_appender(log_dir, target)?);
        target_writers.insert(target.to_string(), non_blocking);
        guards.push(guard);
    }

    let (system_writer, system_guard) =
        tracing_appender::non_blocking(daily_appender(log_dir, "system")?);
    guards.push(system_guard);

    let writer = TargetWriter::new(target_writers, system_writer);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false),
    );

    match tracing::subscriber::set_global_default(subscriber) {
        Ok(()) => tracing::info!(target: "system", "Logging initialized at {:?}", log_dir),
        Err(_) => tracing::debug!(target: "system", "Global subscriber already set, keeping it"),
    }

    Ok(LoggingGuards { _guards: guards })
}
