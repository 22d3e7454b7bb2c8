//! Path confinement for a single-rooted virtual filesystem.
//!
//! A [`Session`] pins a root directory and tracks a per-client working
//! directory. Every client path goes through the resolver, which turns it
//! into an absolute real path that cannot leave the root, before the
//! [`storage`] operations hand it to the underlying [`Filesystem`].

pub mod config;
pub mod error;
pub mod navigate;
pub mod path;
pub mod session;
pub mod storage;
pub mod utils;

pub use config::VfsConfig;
pub use error::VfsError;
pub use navigate::{change_directory, change_to_parent, current_directory};
pub use session::{BufferSlot, Session, resolve_pair, resolve_within_session};
pub use storage::{FileKind, FileStat, Filesystem, LocalFilesystem, OpenMode};
