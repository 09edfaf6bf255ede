// Typed errors for the record store and task engine

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Mode a store file was being opened in when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Read,
    Append,
    Write,
}

impl OpenMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpenMode::Read => "reading",
            OpenMode::Append => "appending",
            OpenMode::Write => "writing",
        }
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum LogWorkError {
    #[error("Failed to open {} for {mode}", path.display())]
    StoreOpen {
        path: PathBuf,
        mode: OpenMode,
        #[source]
        source: io::Error,
    },

    /// Persisting failed; the original file is left as it was
    #[error("Failed to write {}", path.display())]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed record on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Failed to format timestamp {0} as local time")]
    Format(u32),

    #[error("Index {index} is out of range (store has {count} records)")]
    Index { index: usize, count: usize },

    #[error("Task '{0}' doesn't exist")]
    NotFound(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Store {} has no records", .0.display())]
    EmptyStore(PathBuf),

    #[error("System clock reads {0}, outside the supported timestamp range")]
    Clock(i64),
}

impl LogWorkError {
    /// The operation did not apply, but nothing went wrong either
    pub fn is_informational(&self) -> bool {
        matches!(self, LogWorkError::NotFound(_))
    }

    /// Caused by what the user asked for rather than by the environment
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            LogWorkError::InvalidArgument(_)
                | LogWorkError::Index { .. }
                | LogWorkError::EmptyStore(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LogWorkError>;
