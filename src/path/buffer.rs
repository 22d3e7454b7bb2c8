//! Bounded path buffer
//!
//! An owned string whose storage is reserved once, when the session opens.
//! Every mutation that could grow it is checked against `max_len` and fails
//! with [`VfsError::PathTooLong`] instead of reallocating.

use std::fmt;
use std::path::Path;

use crate::error::VfsError;
use crate::path::normalize::normalize_from;

/// Fixed-capacity scratch space for one absolute path.
#[derive(Debug, Clone)]
pub struct PathBuffer {
    inner: String,
    max_len: usize,
}

impl PathBuffer {
    /// Reserves room for `max_len` bytes up front.
    ///
    /// Fails with [`VfsError::AllocationFailure`] when the memory cannot be
    /// obtained.
    pub fn with_max_len(max_len: usize) -> Result<Self, VfsError> {
        let mut inner = String::new();
        inner
            .try_reserve_exact(max_len)
            .map_err(|_| VfsError::AllocationFailure)?;
        Ok(Self { inner, max_len })
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.inner)
    }

    /// Returns whether a path of `len` bytes fits.
    pub fn fits(&self, len: usize) -> bool {
        len <= self.max_len
    }

    pub fn ends_with_separator(&self) -> bool {
        self.inner.ends_with('/')
    }

    /// Shortens the buffer to `len` bytes. `len` must be on a char boundary.
    pub fn truncate(&mut self, len: usize) {
        self.inner.truncate(len);
    }

    /// Appends `s`, or fails without modifying the buffer.
    pub fn push_str(&mut self, s: &str) -> Result<(), VfsError> {
        if !self.fits(self.inner.len() + s.len()) {
            return Err(VfsError::PathTooLong(format!("{}{}", self.inner, s)));
        }
        self.inner.push_str(s);
        Ok(())
    }

    pub fn push_separator(&mut self) -> Result<(), VfsError> {
        self.push_str("/")
    }

    /// Replaces the contents with the first `len` bytes of `other`.
    pub fn copy_prefix_from(&mut self, other: &PathBuffer, len: usize) {
        debug_assert!(self.fits(len));
        self.inner.clear();
        self.inner.push_str(&other.inner[..len]);
    }

    /// Normalizes everything past `start`, which is left untouched.
    pub fn normalize_from(&mut self, start: usize) {
        normalize_from(&mut self.inner, start);
    }
}

impl fmt::Display for PathBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl AsRef<Path> for PathBuffer {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}
