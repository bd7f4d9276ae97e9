//! This module defines the logging facilities, using tracing and tracing-subscriber.
//!
//! Logs will be displayed in the terminal and written to log files. By default, only the log files
//! of the last 15 runs will be kept.

use chrono::Local;
use color_eyre::Result;
use color_eyre::eyre::{OptionExt, WrapErr};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Configured, but not yet started, logging setup.
#[derive(Debug)]
pub(crate) struct Logger {
    verbosity: u8,
    log_dir: PathBuf,
    max_logs: usize,
}

#[derive(Debug, Default)]
pub(crate) struct LoggerBuilder {
    verbosity: u8,
    log_dir: Option<PathBuf>,
    max_logs: Option<usize>,
}

impl LoggerBuilder {
    pub(crate) fn with_verbosity(&mut self, verbosity: u8) -> &mut Self {
        let new = self;
        new.verbosity = verbosity;
        new
    }

    pub(crate) fn with_log_dir<P: AsRef<Path>>(&mut self, log_dir: P) -> &mut Self {
        let new = self;
        new.log_dir = Some(log_dir.as_ref().to_path_buf());
        new
    }

    pub(crate) fn with_max_logs(&mut self, max_logs: usize) -> &mut Self {
        let new = self;
        new.max_logs = Some(max_logs);
        new
    }

    pub(crate) fn build(&self) -> Result<Logger> {
        let log_dir = match self.log_dir {
            Some(ref dir) => dir.clone(),
            None => get_default_log_dir()?,
        };

        Ok(Logger {
            verbosity: self.verbosity,
            log_dir,
            max_logs: self.max_logs.unwrap_or(15),
        })
    }
}

impl Logger {
    /// Installs the global subscriber with a terminal and a file layer.
    ///
    /// The returned guard flushes the file writer on drop and has to be kept alive for the
    /// duration of the program.
    pub(crate) fn start(&self) -> Result<WorkerGuard> {
        let level = match self.verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };

        fs::create_dir_all(&self.log_dir)
            .wrap_err_with(|| format!("Failed to create log directory at {:?}", self.log_dir))?;

        // Make room for the new log file
        rotate_logs(&self.log_dir, self.max_logs.saturating_sub(1))?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let log_file = self.log_dir.join(format!("mmrl_{}.log", timestamp));
        let file = fs::File::create(&log_file)
            .wrap_err_with(|| format!("Failed to create log file at {:?}", log_file))?;
        let (file_writer, guard) = tracing_appender::non_blocking(file);

        let terminal_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(self.verbosity > 0)
            .without_time()
            .with_filter(EnvFilter::new(format!("mmrl={}", level)));

        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .with_timer(ChronoLocal::rfc_3339())
            .with_thread_ids(true)
            .with_filter(EnvFilter::new(format!("mmrl={}", level)));

        tracing_subscriber::registry()
            .with(terminal_layer)
            .with(file_layer)
            .with(ErrorLayer::default())
            .try_init()
            .wrap_err("Failed to initialize logging")?;

        Ok(guard)
    }
}

/// Get the default directory where log files should be stored.
///
/// Uses `$XDG_DATA_HOME/mmrl/logs`, which usually resolves to `~/.local/share/mmrl/logs`.
pub(crate) fn get_default_log_dir() -> Result<PathBuf> {
    Ok(dirs::data_dir()
        .ok_or_eyre("Could not determine user's data directory")?
        .join("mmrl")
        .join("logs"))
}

/// Rotate log files, keeping only the `keep` most recent ones.
fn rotate_logs<P: AsRef<Path>>(log_dir: P, keep: usize) -> Result<()> {
    let mut log_files: Vec<_> = fs::read_dir(&log_dir)
        .wrap_err_with(|| format!("Failed to read log directory {:?}", log_dir.as_ref()))?
        // Filter out entries which could not be read (should be zero).
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "log"))
        .collect();

    // Sort by file name and reverse order -> newest first
    log_files.sort_by_key(|entry| entry.file_name());
    log_files.reverse();

    for old_log in log_files.iter().skip(keep) {
        fs::remove_file(old_log.path())
            .wrap_err_with(|| format!("Failed to remove old log file {:?}", old_log.path()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_log_rotation() -> Result<()> {
        let temp_dir = tempdir()?;
        for i in 0..10 {
            File::create(temp_dir.path().join(format!("mmrl_20241028_21441{}.log", i)))?;
        }
        for i in 0..5 {
            File::create(temp_dir.path().join(format!("mmrl_20241028_21442{}.log", i)))?;
        }
        File::create(temp_dir.path().join("notes.txt"))?;

        rotate_logs(temp_dir.path(), 10)?;

        let mut remaining_logs: Vec<_> = fs::read_dir(&temp_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "log"))
            .collect();
        remaining_logs.sort();

        assert_eq!(remaining_logs.len(), 10, "Should keep exactly 10 log files");
        assert_eq!(
            remaining_logs[0],
            temp_dir.path().join("mmrl_20241028_214415.log"),
            "Oldest remaining file should be mmrl_20241028_214415.log"
        );
        assert_eq!(
            remaining_logs[remaining_logs.len() - 1],
            temp_dir.path().join("mmrl_20241028_214424.log"),
            "Newest remaining file should be mmrl_20241028_214424.log"
        );
        assert!(temp_dir.path().join("notes.txt").exists());

        Ok(())
    }

    #[test]
    fn test_default_log_dir() -> Result<()> {
        let temp_dir = tempdir()?;

        temp_env::with_var("XDG_DATA_HOME", Some(temp_dir.path()), || -> Result<()> {
            assert_eq!(
                get_default_log_dir()?,
                temp_dir.path().join("mmrl").join("logs"),
                "Should use XDG_DATA_HOME when available"
            );
            Ok(())
        })
    }

    #[test]
    fn test_builder_defaults() -> Result<()> {
        let temp_dir = tempdir()?;
        let logger = LoggerBuilder::default()
            .with_verbosity(2)
            .with_log_dir(temp_dir.path())
            .build()?;

        assert_eq!(logger.verbosity, 2);
        assert_eq!(logger.max_logs, 15);
        assert_eq!(logger.log_dir, temp_dir.path());
        Ok(())
    }
}
