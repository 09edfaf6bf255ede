// Error classification for consistent messages and exit codes

use crate::error::LogWorkError;

/// How a failed command is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The operation did not apply (e.g. no such task); exit code 0
    Informational,
    /// Invalid input or a request the store can't satisfy; exit code 1
    User,
    /// Unreadable, corrupt or unwritable store, clock trouble; exit code 2
    Internal,
}

impl ErrorClass {
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorClass::Informational => 0,
            ErrorClass::User => 1,
            ErrorClass::Internal => 2,
        }
    }
}

/// Classify an error returned from `run`
pub fn classify(err: &anyhow::Error) -> ErrorClass {
    match err.downcast_ref::<LogWorkError>() {
        Some(e) if e.is_informational() => ErrorClass::Informational,
        Some(e) if e.is_user_error() => ErrorClass::User,
        _ => ErrorClass::Internal,
    }
}
