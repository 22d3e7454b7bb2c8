//! Storage result types
//!
//! Records exchanged with the underlying filesystem.

use std::fs::{Metadata, OpenOptions};
use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::VfsError;

/// Kind of a filesystem entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileKind {
    Directory,
    Regular,
    #[default]
    Other,
}

/// Result of a stat operation
///
/// The default value is the inert all-zero record handed out when a stat
/// fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStat {
    pub kind: FileKind,
    pub size: u64,
    /// Seconds since the unix epoch
    pub modified: u64,
    /// Seconds since the unix epoch
    pub accessed: u64,
}

impl FileStat {
    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == FileKind::Regular
    }
}

impl From<&Metadata> for FileStat {
    fn from(metadata: &Metadata) -> Self {
        let kind = if metadata.is_dir() {
            FileKind::Directory
        } else if metadata.is_file() {
            FileKind::Regular
        } else {
            FileKind::Other
        };

        let secs = |time: io::Result<SystemTime>| {
            time.ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs())
                .unwrap_or(0)
        };

        Self {
            kind,
            size: if metadata.is_dir() { 0 } else { metadata.len() },
            modified: secs(metadata.modified()),
            accessed: secs(metadata.accessed()),
        }
    }
}

/// How a file should be opened, in `fopen` terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMode {
    pub read: bool,
    pub write: bool,
    pub append: bool,
    pub truncate: bool,
    pub create: bool,
}

impl OpenMode {
    pub const READ: OpenMode = OpenMode {
        read: true,
        write: false,
        append: false,
        truncate: false,
        create: false,
    };

    pub const WRITE: OpenMode = OpenMode {
        read: false,
        write: true,
        append: false,
        truncate: true,
        create: true,
    };

    pub const APPEND: OpenMode = OpenMode {
        read: false,
        write: false,
        append: true,
        truncate: false,
        create: true,
    };

    /// Parses a C `fopen` mode string such as `"rb"` or `"a+"`.
    pub fn from_fopen(mode: &str) -> Result<Self, VfsError> {
        let stripped: String = mode.chars().filter(|&c| c != 'b').collect();
        let parsed = match stripped.as_str() {
            "r" => Self::READ,
            "w" => Self::WRITE,
            "a" => Self::APPEND,
            "r+" => Self {
                write: true,
                ..Self::READ
            },
            "w+" => Self {
                read: true,
                ..Self::WRITE
            },
            "a+" => Self {
                read: true,
                ..Self::APPEND
            },
            _ => {
                return Err(VfsError::OperationFailed(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("unsupported open mode: {}", mode),
                )));
            }
        };
        Ok(parsed)
    }

    pub fn to_open_options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options
            .read(self.read)
            .write(self.write)
            .append(self.append)
            .truncate(self.truncate)
            .create(self.create);
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stat_is_inert() {
        let st = FileStat::default();
        assert_eq!(st.kind, FileKind::Other);
        assert_eq!(st.size, 0);
        assert_eq!(st.modified, 0);
        assert!(!st.is_dir());
        assert!(!st.is_file());
    }

    #[test]
    fn test_from_fopen() {
        assert_eq!(OpenMode::from_fopen("r").unwrap(), OpenMode::READ);
        assert_eq!(OpenMode::from_fopen("rb").unwrap(), OpenMode::READ);
        assert_eq!(OpenMode::from_fopen("wb").unwrap(), OpenMode::WRITE);
        assert_eq!(OpenMode::from_fopen("a").unwrap(), OpenMode::APPEND);

        let rw = OpenMode::from_fopen("r+b").unwrap();
        assert!(rw.read && rw.write && !rw.create);

        let append_read = OpenMode::from_fopen("a+").unwrap();
        assert!(append_read.read && append_read.append && append_read.create);

        assert!(OpenMode::from_fopen("x").is_err());
        assert!(OpenMode::from_fopen("").is_err());
    }
}
