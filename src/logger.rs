//! Logging setup for the pipeline binary.

use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::setting::LogSettings;

/// Log level constants (compatible with Python logging module)
pub const DEBUG: i32 = 10;
pub const INFO: i32 = 20;
pub const WARNING: i32 = 30;
pub const ERROR: i32 = 40;

/// Convert integer log level to tracing Level
pub fn level_from_int(level: i32) -> Level {
    match level {
        i32::MIN..=10 => Level::DEBUG,
        11..=20 => Level::INFO,
        21..=30 => Level::WARN,
        _ => Level::ERROR,
    }
}

/// Initialize the global subscriber. Later calls are no-ops.
pub fn init_logger(settings: &LogSettings) {
    let level = level_from_int(settings.level);
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let console_layer = settings.console.then(|| {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_ansi(true)
    });

    let mut file_failure = None;
    let file_layer = if settings.file {
        let log_path = get_log_file_path(&settings.folder);
        match open_log_file(&log_path) {
            Ok(file) => Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false)),
            Err(e) => {
                file_failure = Some((log_path, e));
                None
            }
        }
    } else {
        None
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if let (true, Some((path, e))) = (installed, file_failure) {
        tracing::warn!("cannot open log file {}: {}", path.display(), e);
    }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Get the log file path for today
fn get_log_file_path(folder: &Path) -> PathBuf {
    let today = Local::now().format("%Y%m%d").to_string();
    folder.join(format!("sales_prep_{}.log", today))
}
