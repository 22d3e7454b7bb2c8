//! Error handlers
//!
//! Helpers for the protocol layer sitting on top of a session.

use crate::error::types::VfsError;
use log::error;

/// Log a virtual filesystem error
pub fn handle_error(err: &VfsError) {
    error!("VFS error: {}", err);
}

/// Convert error to FTP response code
pub fn error_to_ftp_code(err: &VfsError) -> u16 {
    match err {
        VfsError::PathTooLong(_) => 553,
        VfsError::InvalidPath(_) => 553,
        VfsError::PathEscapesRoot(_) => 550,
        VfsError::NotADirectory(_) => 550,
        VfsError::OperationFailed(_) => 550,
        VfsError::AllocationFailure => 451,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_to_ftp_code() {
        assert_eq!(error_to_ftp_code(&VfsError::PathTooLong("x".into())), 553);
        assert_eq!(error_to_ftp_code(&VfsError::NotADirectory("x".into())), 550);
        assert_eq!(
            error_to_ftp_code(&VfsError::OperationFailed(io::Error::other("busy"))),
            550
        );
        assert_eq!(error_to_ftp_code(&VfsError::AllocationFailure), 451);

        handle_error(&VfsError::PathEscapesRoot("/other".into()));
    }
}
