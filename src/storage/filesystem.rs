//! File system operations
//!
//! The primitives a session delegates to once a client path has been
//! confined. Paths handed to a [`Filesystem`] are always absolute real paths.

use std::fs::{self, File, ReadDir};
use std::io::Result;
use std::path::Path;

use crate::storage::results::{FileStat, OpenMode};

/// Blocking filesystem primitives consumed by the session
pub trait Filesystem {
    type File;
    type Dir;

    fn open(&self, path: &Path, mode: OpenMode) -> Result<Self::File>;
    fn stat(&self, path: &Path) -> Result<FileStat>;
    fn make_dir(&self, path: &Path, mode: u32) -> Result<()>;
    fn remove_dir(&self, path: &Path) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
    fn open_dir(&self, path: &Path) -> Result<Self::Dir>;
}

/// The host filesystem via `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    type File = File;
    type Dir = ReadDir;

    fn open(&self, path: &Path, mode: OpenMode) -> Result<File> {
        mode.to_open_options().open(path)
    }

    fn stat(&self, path: &Path) -> Result<FileStat> {
        fs::metadata(path).map(|metadata| FileStat::from(&metadata))
    }

    fn make_dir(&self, path: &Path, mode: u32) -> Result<()> {
        let mut builder = fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;
        builder.create(path)
    }

    fn remove_dir(&self, path: &Path) -> Result<()> {
        fs::remove_dir(path)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to)
    }

    fn open_dir(&self, path: &Path) -> Result<ReadDir> {
        fs::read_dir(path)
    }
}
