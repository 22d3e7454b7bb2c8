//! Error types
//!
//! Every failure a confined filesystem operation can report.

use std::fmt;
use std::io;

/// Virtual filesystem errors
///
/// Resolution errors (`PathTooLong`, `PathEscapesRoot`, `InvalidPath`) are
/// raised before any filesystem call is made. The string payload is the
/// offending path as the client sent it, or the candidate path that failed.
#[derive(Debug)]
pub enum VfsError {
    PathTooLong(String),
    PathEscapesRoot(String),
    NotADirectory(String),
    InvalidPath(String),
    OperationFailed(io::Error),
    AllocationFailure,
}

impl VfsError {
    /// Returns whether the error was raised while resolving a client path.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            VfsError::PathTooLong(_) | VfsError::PathEscapesRoot(_) | VfsError::InvalidPath(_)
        )
    }
}

impl fmt::Display for VfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VfsError::PathTooLong(p) => write!(f, "Path too long: {}", p),
            VfsError::PathEscapesRoot(p) => {
                write!(f, "Path outside the current directory: {}", p)
            }
            VfsError::NotADirectory(p) => write!(f, "Not a directory: {}", p),
            VfsError::InvalidPath(p) => write!(f, "Invalid path: {:?}", p),
            VfsError::OperationFailed(e) => write!(f, "Operation failed: {}", e),
            VfsError::AllocationFailure => write!(f, "Failed to allocate session buffers"),
        }
    }
}

impl std::error::Error for VfsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VfsError::OperationFailed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for VfsError {
    fn from(error: io::Error) -> Self {
        VfsError::OperationFailed(error)
    }
}
