//! Append-only log file with daily rotation.
//!
//! `FileLogger` is owned by the client and records failed API calls for
//! offline diagnosis. The first write after the local date changes renames
//! the current file to `{path}.{YYYYMMDD}` (the previous day) and reopens a
//! fresh file at `path`.
//!
//! Rotation is serialized by a write lock; appends only take the read lock,
//! so concurrent writers do not block each other.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Days, Local, NaiveDate};

/// Log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    /// Verbose diagnostics.
    Debug,
    /// Informational messages.
    #[default]
    Info,
    /// Recoverable problems.
    Warn,
    /// Failed operations.
    Error,
}

impl LogLevel {
    /// Returns the tag written in front of each line.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Debug => "[DEBUG]",
            Self::Info => "[INFO]",
            Self::Warn => "[WARN]",
            Self::Error => "[ERROR]",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug)]
struct LogFileState {
    file: File,
    current_day: NaiveDate,
}

/// Daily-rotated log file.
#[derive(Debug)]
pub struct FileLogger {
    path: PathBuf,
    min_level: LogLevel,
    state: RwLock<LogFileState>,
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl FileLogger {
    /// Opens (or creates) the log file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened for appending.
    pub fn open(path: impl Into<PathBuf>, min_level: LogLevel) -> io::Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        Ok(Self {
            path,
            min_level,
            state: RwLock::new(LogFileState {
                file,
                current_day: Local::now().date_naive(),
            }),
        })
    }

    /// Returns the path of the active log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the minimum level that is written.
    #[must_use]
    pub const fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Writes one entry if `level` passes the minimum level.
    ///
    /// # Errors
    ///
    /// Returns an error if rotation or the append fails.
    pub fn write(&self, level: LogLevel, message: &str) -> io::Result<()> {
        self.write_at(level, message, Local::now())
    }

    fn write_at(&self, level: LogLevel, message: &str, now: DateTime<Local>) -> io::Result<()> {
        if level < self.min_level {
            return Ok(());
        }

        self.rotate_if_needed(now)?;

        let line = format!(
            "{} {} {}\n",
            now.format("%Y/%m/%d %H:%M:%S%.6f"),
            level.tag(),
            message
        );
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        (&state.file).write_all(line.as_bytes())
    }

    fn rotate_if_needed(&self, now: DateTime<Local>) -> io::Result<()> {
        let today = now.date_naive();
        {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            if state.current_day == today {
                return Ok(());
            }
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        // Another writer may have rotated while we waited.
        if state.current_day == today {
            return Ok(());
        }

        state.file.flush()?;
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
        let mut rotated = self.path.clone().into_os_string();
        rotated.push(format!(".{}", yesterday.format("%Y%m%d")));
        // Rotation failures are not fatal; `path` is reopened regardless.
        if let Err(e) = fs::rename(&self.path, &rotated) {
            if e.kind() == ErrorKind::NotFound {
                tracing::debug!("log file {} vanished before rotation", self.path.display());
            } else {
                tracing::warn!("failed to rotate log file {}: {}", self.path.display(), e);
            }
        }

        // The old handle is closed when replaced.
        state.file = open_append(&self.path)?;
        state.current_day = today;
        Ok(())
    }

    #[cfg(test)]
    fn set_current_day(&self, day: NaiveDate) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.current_day = day;
    }
}
