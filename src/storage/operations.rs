//! Storage operations
//!
//! Confined equivalents of the filesystem calls a file-transfer session
//! needs. Every client path is resolved inside the working directory before
//! anything reaches the filesystem; a path that fails to resolve is never
//! passed on.

use log::{debug, info};
use std::path::Path;

use crate::error::VfsError;
use crate::session::Session;
use crate::session::resolve::{resolve_pair_with_filesystem, resolve_with_filesystem};
use crate::storage::filesystem::Filesystem;
use crate::storage::results::{FileStat, OpenMode};

/// Creates a directory
pub fn make_directory<F: Filesystem>(session: &mut Session<F>, path: &str) -> Result<(), VfsError> {
    let mode = session.dir_mode();
    let (fs, real_path) = resolve_with_filesystem(session, path)?;
    fs.make_dir(real_path, mode)
        .map_err(|e| failed("mkdir", real_path, e))
}

/// Removes an empty directory
pub fn remove_directory<F: Filesystem>(
    session: &mut Session<F>,
    path: &str,
) -> Result<(), VfsError> {
    let (fs, real_path) = resolve_with_filesystem(session, path)?;
    fs.remove_dir(real_path)
        .map_err(|e| failed("rmdir", real_path, e))
}

/// Deletes a file
pub fn remove_file<F: Filesystem>(session: &mut Session<F>, path: &str) -> Result<(), VfsError> {
    let (fs, real_path) = resolve_with_filesystem(session, path)?;
    fs.remove_file(real_path)
        .map_err(|e| failed("unlink", real_path, e))
}

/// Renames `from` to `to`
///
/// Both paths must resolve before the filesystem is touched.
pub fn rename<F: Filesystem>(session: &mut Session<F>, from: &str, to: &str) -> Result<(), VfsError> {
    let (fs, real_from, real_to) = resolve_pair_with_filesystem(session, from, to)?;
    info!("rename: {} -> {}", real_from.display(), real_to.display());
    fs.rename(real_from, real_to)
        .map_err(|e| failed("rename", real_from, e))
}

/// Stats a path
pub fn stat<F: Filesystem>(session: &mut Session<F>, path: &str) -> Result<FileStat, VfsError> {
    let (fs, real_path) = resolve_with_filesystem(session, path)?;
    fs.stat(real_path).map_err(|e| failed("stat", real_path, e))
}

/// Stats a path into `st`
///
/// On any failure `st` is reset to the all-zero record, so callers that
/// ignore the result still read an inert value.
pub fn stat_into<F: Filesystem>(
    session: &mut Session<F>,
    path: &str,
    st: &mut FileStat,
) -> Result<(), VfsError> {
    match stat(session, path) {
        Ok(found) => {
            *st = found;
            Ok(())
        }
        Err(e) => {
            *st = FileStat::default();
            Err(e)
        }
    }
}

/// Opens a file
pub fn open_file<F: Filesystem>(
    session: &mut Session<F>,
    path: &str,
    mode: OpenMode,
) -> Result<F::File, VfsError> {
    let (fs, real_path) = resolve_with_filesystem(session, path)?;
    fs.open(real_path, mode)
        .map_err(|e| failed("open", real_path, e))
}

/// Opens a directory for iteration
pub fn open_directory<F: Filesystem>(
    session: &mut Session<F>,
    path: &str,
) -> Result<F::Dir, VfsError> {
    let (fs, real_path) = resolve_with_filesystem(session, path)?;
    fs.open_dir(real_path)
        .map_err(|e| failed("opendir", real_path, e))
}

fn failed(op: &str, real_path: &Path, e: std::io::Error) -> VfsError {
    debug!("{} failed on {}: {}", op, real_path.display(), e);
    VfsError::OperationFailed(e)
}
