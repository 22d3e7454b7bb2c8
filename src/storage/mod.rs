//! File system storage management
//!
//! Confined file operations and the filesystem they delegate to.

pub mod filesystem;
pub mod operations;
pub mod results;

// Re-export commonly used operations and records
pub use filesystem::{Filesystem, LocalFilesystem};
pub use operations::{
    make_directory, open_directory, open_file, remove_directory, remove_file, rename, stat,
    stat_into,
};
pub use results::{FileKind, FileStat, OpenMode};
