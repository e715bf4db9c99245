// Copyright 2025 The photon-client Authors
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the client tools
//!
//! Console output is always installed. With the `file-logging` feature and a log
//! directory, a JSON file layer is added under a timestamped run folder:
//! ```text
//! ./logs/
//!   └── run_20250101_120000/
//!       └── photon.log.2025-01-01
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;

/// Keeps file writers flushing until dropped
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    run_folder: Option<PathBuf>,
}

impl LoggingGuard {
    /// Folder the log files of this run are written to, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.run_folder.as_deref()
    }
}

/// Build the `EnvFilter` for the given flags and base level
pub fn build_env_filter(debug_flags: &CrateDebugFlags, base_level: &str) -> Result<EnvFilter> {
    let directives = debug_flags.to_filter_string(base_level);
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter: {}", directives))
}

/// Install the global subscriber
///
/// # Arguments
/// * `debug_flags` - Per-crate debug flags
/// * `base_level` - Level for everything not raised by a flag
/// * `log_dir` - Base directory for JSON log files. Ignored without `file-logging`.
///
/// # Errors
///
/// Fails if the filter is invalid, the run folder cannot be created, or a global
/// subscriber is already installed.
pub fn init_logging(
    debug_flags: &CrateDebugFlags,
    base_level: &str,
    log_dir: Option<PathBuf>,
) -> Result<LoggingGuard> {
    let mut layers = Vec::new();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_filter(build_env_filter(debug_flags, base_level)?)
        .boxed();
    layers.push(console_layer);

    #[cfg(feature = "file-logging")]
    let mut file_guards = Vec::new();
    #[cfg(feature = "file-logging")]
    let run_folder = match log_dir {
        Some(base_log_dir) => {
            let run_folder = create_run_folder(&base_log_dir)?;
            let file_appender = tracing_appender::rolling::daily(&run_folder, "photon.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            file_guards.push(guard);

            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(build_env_filter(debug_flags, base_level)?)
                .boxed();
            layers.push(file_layer);
            Some(run_folder)
        }
        None => None,
    };
    #[cfg(not(feature = "file-logging"))]
    let run_folder: Option<PathBuf> = {
        let _ = log_dir;
        None
    };

    Registry::default()
        .with(layers)
        .try_init()
        .context("Failed to install the global tracing subscriber")?;

    if let Some(folder) = &run_folder {
        tracing::info!("[LOGGING] Writing logs to {}", folder.display());
    }

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        run_folder,
    })
}

/// Console-only logging at `info`
pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    init_logging(debug_flags, "info", None)
}

#[cfg(feature = "file-logging")]
fn create_run_folder(base_log_dir: &Path) -> Result<PathBuf> {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let run_folder = base_log_dir.join(format!("run_{}", timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;
    Ok(run_folder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_flags() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-photon-camera".to_string()]);
        assert!(build_env_filter(&flags, "warn").is_ok());
    }

    #[test]
    fn test_filter_rejects_unknown_level() {
        let flags = CrateDebugFlags::default();
        assert!(build_env_filter(&flags, "photon_camera=loudest").is_err());
    }

    #[cfg(feature = "file-logging")]
    #[test]
    fn test_run_folder_is_timestamped() {
        let dir = tempfile::tempdir().unwrap();
        let run_folder = create_run_folder(dir.path()).unwrap();
        assert!(run_folder.is_dir());
        let name = run_folder.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("run_"));
        assert_eq!(name.len(), "run_20250101_120000".len());
    }
}
