//! Module `session`
//!
//! Defines the `Session` struct holding the per-connection view of the
//! virtual filesystem: the fixed root, the current working directory and the
//! two path buffers resolution writes into.

use std::fmt;

use log::debug;

use crate::config::VfsConfig;
use crate::error::VfsError;
use crate::path::PathBuffer;
use crate::storage::filesystem::{Filesystem, LocalFilesystem};

/// Lengths of the protected prefixes shared by both buffers.
///
/// `root_len <= cwd_len <= max_path_len`, and both prefixes end with `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefix {
    pub root_len: usize,
    pub cwd_len: usize,
}

/// Which of the two session buffers a resolution writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferSlot {
    Primary,
    Secondary,
}

/// Represents one client's confined view of the filesystem.
///
/// Outside of an operation, the first `cwd_len` bytes of both buffers hold
/// the same committed working directory, and its first `root_len` bytes are
/// the root. Paths returned by the resolver borrow a buffer and are only
/// valid until the next resolution into that buffer.
pub struct Session<F: Filesystem = LocalFilesystem> {
    fs: F,
    prefix: Prefix,
    primary: PathBuffer,
    secondary: PathBuffer,
    dir_mode: u32,
}

impl Session<LocalFilesystem> {
    /// Opens a session on the host filesystem.
    pub fn open(config: &VfsConfig) -> Result<Self, VfsError> {
        Self::with_filesystem(config, LocalFilesystem)
    }
}

impl<F: Filesystem> Session<F> {
    /// Opens a session delegating to `fs`.
    ///
    /// Both buffers are allocated here and never grow afterwards. The working
    /// directory starts at the root.
    pub fn with_filesystem(config: &VfsConfig, fs: F) -> Result<Self, VfsError> {
        let root = config.root_prefix();
        if !root.starts_with('/') || root.contains('\0') {
            return Err(VfsError::InvalidPath(config.root.clone()));
        }

        let mut primary = PathBuffer::with_max_len(config.max_path_len)?;
        let mut secondary = PathBuffer::with_max_len(config.max_path_len)?;
        primary.push_str(&root)?;
        secondary.push_str(&root)?;

        debug!("Opened session rooted at {}", root);

        Ok(Self {
            fs,
            prefix: Prefix {
                root_len: root.len(),
                cwd_len: root.len(),
            },
            primary,
            secondary,
            dir_mode: config.dir_mode,
        })
    }

    /// Ends the session, releasing both buffers.
    pub fn close(self) {
        debug!("Closed session rooted at {}", self.root());
    }

    // --------------------
    // Getter methods
    // --------------------

    /// Real root path, with trailing separator.
    pub fn root(&self) -> &str {
        &self.secondary.as_str()[..self.prefix.root_len]
    }

    /// Real path of the working directory, with trailing separator.
    pub fn cwd(&self) -> &str {
        &self.secondary.as_str()[..self.prefix.cwd_len]
    }

    pub fn prefix(&self) -> Prefix {
        self.prefix
    }

    pub fn max_path_len(&self) -> usize {
        self.primary.max_len()
    }

    pub fn dir_mode(&self) -> u32 {
        self.dir_mode
    }

    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    pub(crate) fn buffer_mut(&mut self, slot: BufferSlot) -> &mut PathBuffer {
        match slot {
            BufferSlot::Primary => &mut self.primary,
            BufferSlot::Secondary => &mut self.secondary,
        }
    }

    /// Splits the session so both buffers can be borrowed at once.
    pub(crate) fn split_mut(&mut self) -> (&F, Prefix, &mut PathBuffer, &mut PathBuffer) {
        (&self.fs, self.prefix, &mut self.primary, &mut self.secondary)
    }

    // --------------------
    // Working directory transitions
    // --------------------

    /// Makes the primary buffer's contents the new working directory.
    ///
    /// The primary buffer must hold an absolute path under the root ending
    /// with `/`.
    pub(crate) fn commit_primary(&mut self) {
        let len = self.primary.len();
        debug_assert!(len >= self.prefix.root_len && self.primary.ends_with_separator());
        self.prefix.cwd_len = len;
        self.secondary.copy_prefix_from(&self.primary, len);
    }

    /// Restores the primary buffer to the committed working directory.
    pub(crate) fn rollback_primary(&mut self) {
        self.primary
            .copy_prefix_from(&self.secondary, self.prefix.cwd_len);
    }
}

impl<F: Filesystem> fmt::Debug for Session<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("root", &self.root())
            .field("cwd", &self.cwd())
            .field("max_path_len", &self.max_path_len())
            .finish()
    }
}
