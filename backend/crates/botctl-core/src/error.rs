use crate::ProcessId;

use std::panic::Location;
use std::path::{Path, PathBuf};

use error_location::ErrorLocation;
use thiserror::Error;

/// Longest slice of a corrupt record echoed back in messages.
const MAX_RECORD_EXCERPT: usize = 32;

#[derive(Error, Debug)]
pub enum SupervisorError {
    #[error("Bot executable not found at {path} {location}")]
    ExecutableMissing {
        path: PathBuf,
        location: ErrorLocation,
    },

    #[error("PID record {path} is corrupt: {content:?} {location}")]
    CorruptRecord {
        path: PathBuf,
        content: String,
        location: ErrorLocation,
    },

    #[error("Failed to spawn {program}: {source} {location}")]
    SpawnFailure {
        program: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to signal PID {pid}: {source} {location}")]
    SignalFailure {
        pid: ProcessId,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("IO error on {path}: {source} {location}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl SupervisorError {
    #[track_caller]
    pub fn executable_missing(path: &Path) -> Self {
        Self::ExecutableMissing {
            path: path.to_path_buf(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn corrupt_record(path: &Path, content: &str) -> Self {
        let content: String = content.trim().chars().take(MAX_RECORD_EXCERPT).collect();
        Self::CorruptRecord {
            path: path.to_path_buf(),
            content,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn spawn_failure(program: &str, source: std::io::Error) -> Self {
        Self::SpawnFailure {
            program: program.to_string(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn signal_failure(pid: ProcessId, source: std::io::Error) -> Self {
        Self::SignalFailure {
            pid,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Machine-readable code carried by reports
    pub fn code(&self) -> &'static str {
        match self {
            Self::ExecutableMissing { .. } => "EXECUTABLE_MISSING",
            Self::CorruptRecord { .. } => "CORRUPT_RECORD",
            Self::SpawnFailure { .. } => "SPAWN_FAILURE",
            Self::SignalFailure { .. } => "SIGNAL_FAILURE",
            Self::Io { .. } => "IO_FAILURE",
        }
    }

    /// User-facing sentence, without source locations.
    pub fn user_message(&self, bot_name: &str) -> String {
        match self {
            Self::ExecutableMissing { path, .. } => {
                format!("Bot file not found at: {}", path.display())
            }
            Self::CorruptRecord { path, content, .. } => format!(
                "PID file {} is corrupt (content: {content:?})",
                path.display()
            ),
            Self::SpawnFailure { source, .. } => format!("Failed to start {bot_name}: {source}"),
            Self::SignalFailure { pid, source, .. } => {
                format!("Failed to stop {bot_name} (PID={pid}): {source}")
            }
            Self::Io { path, source, .. } => {
                format!("I/O error on {}: {source}", path.display())
            }
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::ExecutableMissing { .. } => {
                "Check BOT_PATH. The file must exist before the bot can be started."
            }
            Self::CorruptRecord { .. } => {
                "Use Stop (or Restart) to discard the unreadable PID file."
            }
            Self::SpawnFailure { .. } => {
                "Check that the bot (or BOT_INTERPRETER) is executable \
                   and that its log file is writable."
            }
            Self::SignalFailure { .. } => {
                "The PID record was cleared. The process may belong to another user; \
                   check it manually before starting again."
            }
            Self::Io { .. } => {
                "Check permissions and free space for the PID and log files."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SupervisorError>;
