//! Absolute path resolution
//!
//! Turns a client path into a confined real path inside one of the session
//! buffers. The client path is spliced after the protected prefix and only
//! the part past that prefix is normalized, so `..` can never climb above it.

use std::path::Path;

use log::{error, warn};

use crate::error::VfsError;
use crate::path::PathBuffer;
use crate::session::state::{BufferSlot, Prefix, Session};
use crate::storage::filesystem::Filesystem;

/// How far up the tree a resolution may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// Confined to the working directory. Absolute paths must point inside it.
    WorkingDirectory,
    /// Anywhere under the root. Only used for directory change candidates.
    Root,
}

/// Resolves `path` into `slot`, confined to the working directory.
///
/// Relative paths are taken from the working directory. Absolute paths are
/// read from the client's virtual root and must name the working directory
/// or something below it; anything else fails with
/// [`VfsError::PathEscapesRoot`].
pub fn resolve_within_session<'a, F: Filesystem>(
    session: &'a mut Session<F>,
    slot: BufferSlot,
    path: &str,
) -> Result<&'a Path, VfsError> {
    let prefix = session.prefix();
    resolve_into(session.buffer_mut(slot), prefix, path, Scope::WorkingDirectory)
}

/// Resolves two paths at once, `first` into the primary buffer and `second`
/// into the secondary one.
///
/// Both must resolve; neither result clobbers the other.
pub fn resolve_pair<'a, F: Filesystem>(
    session: &'a mut Session<F>,
    first: &str,
    second: &str,
) -> Result<(&'a Path, &'a Path), VfsError> {
    resolve_pair_with_filesystem(session, first, second).map(|(_, first, second)| (first, second))
}

/// Like [`resolve_within_session`] into the primary buffer, also handing back
/// the filesystem the resolved path is meant for.
pub(crate) fn resolve_with_filesystem<'a, F: Filesystem>(
    session: &'a mut Session<F>,
    path: &str,
) -> Result<(&'a F, &'a Path), VfsError> {
    let (fs, prefix, primary, _) = session.split_mut();
    let resolved = resolve_into(primary, prefix, path, Scope::WorkingDirectory)?;
    Ok((fs, resolved))
}

/// Like [`resolve_pair`], also handing back the filesystem.
pub(crate) fn resolve_pair_with_filesystem<'a, F: Filesystem>(
    session: &'a mut Session<F>,
    first: &str,
    second: &str,
) -> Result<(&'a F, &'a Path, &'a Path), VfsError> {
    let (fs, prefix, primary, secondary) = session.split_mut();
    let first = resolve_into(primary, prefix, first, Scope::WorkingDirectory)?;
    let second = resolve_into(secondary, prefix, second, Scope::WorkingDirectory)?;
    Ok((fs, first, second))
}

/// Resolves `path` into the primary buffer, allowed to reach anywhere under
/// the root.
///
/// This overwrites the primary buffer's copy of the working directory; the
/// caller must follow up with `commit_primary` or `rollback_primary`.
pub(crate) fn resolve_within_root<'a, F: Filesystem>(
    session: &'a mut Session<F>,
    path: &str,
) -> Result<&'a Path, VfsError> {
    let prefix = session.prefix();
    resolve_into(session.buffer_mut(BufferSlot::Primary), prefix, path, Scope::Root)
}

fn resolve_into<'a>(
    buffer: &'a mut PathBuffer,
    prefix: Prefix,
    path: &str,
    scope: Scope,
) -> Result<&'a Path, VfsError> {
    if path.contains('\0') {
        warn!("refusing path with embedded NUL: {:?}", path);
        return Err(VfsError::InvalidPath(path.to_string()));
    }

    if !buffer.fits(prefix.cwd_len + path.len()) {
        error!("path too long: {}", path);
        return Err(VfsError::PathTooLong(path.to_string()));
    }

    let boundary = if path.starts_with('/') {
        match scope {
            Scope::WorkingDirectory => {
                // The working directory as the client sees it, without the
                // trailing separator ("" when it is the root).
                let virtual_cwd = &buffer.as_str()[prefix.root_len - 1..prefix.cwd_len - 1];
                let rest = match path.strip_prefix(virtual_cwd) {
                    Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
                    _ => {
                        warn!(
                            "refusing absolute path which doesn't point into the cwd: {}",
                            path
                        );
                        return Err(VfsError::PathEscapesRoot(path.to_string()));
                    }
                };
                buffer.truncate(prefix.cwd_len);
                buffer.push_str(rest)?;
                prefix.cwd_len
            }
            Scope::Root => {
                buffer.truncate(prefix.root_len);
                buffer.push_str(path)?;
                prefix.root_len
            }
        }
    } else {
        buffer.truncate(prefix.cwd_len);
        buffer.push_str(path)?;
        match scope {
            Scope::WorkingDirectory => prefix.cwd_len,
            Scope::Root => prefix.root_len,
        }
    };

    buffer.normalize_from(boundary);
    Ok(buffer.as_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VfsConfig;

    fn session_at(cwd: &str) -> Session {
        let mut session = Session::open(&VfsConfig::new("/data")).unwrap();
        session
            .buffer_mut(BufferSlot::Primary)
            .push_str(cwd)
            .unwrap();
        session.commit_primary();
        session
    }

    fn resolved(session: &mut Session, path: &str) -> Result<String, VfsError> {
        resolve_within_session(session, BufferSlot::Primary, path)
            .map(|p| p.to_string_lossy().into_owned())
    }

    #[test]
    fn test_relative_paths() {
        let mut session = session_at("");
        assert_eq!(resolved(&mut session, "a.txt").unwrap(), "/data/a.txt");
        assert_eq!(resolved(&mut session, "./a//b/./c").unwrap(), "/data/a/b/c");
        assert_eq!(resolved(&mut session, "").unwrap(), "/data/");
    }

    #[test]
    fn test_parent_cannot_escape_root() {
        let mut session = session_at("");
        assert_eq!(resolved(&mut session, "../../etc").unwrap(), "/data/etc");
        assert_eq!(resolved(&mut session, "..").unwrap(), "/data/");
    }

    #[test]
    fn test_parent_cannot_escape_cwd() {
        let mut session = session_at("sub/");
        assert_eq!(resolved(&mut session, "../x").unwrap(), "/data/sub/x");
        assert_eq!(resolved(&mut session, "a/../../../b").unwrap(), "/data/sub/b");
    }

    #[test]
    fn test_absolute_inside_cwd() {
        let mut session = session_at("sub/");
        assert_eq!(resolved(&mut session, "/sub/y").unwrap(), "/data/sub/y");
        assert_eq!(resolved(&mut session, "/sub").unwrap(), "/data/sub/");
        assert_eq!(resolved(&mut session, "/sub/../../y").unwrap(), "/data/sub/y");

        let mut session = session_at("");
        assert_eq!(resolved(&mut session, "/etc/passwd").unwrap(), "/data/etc/passwd");
    }

    #[test]
    fn test_absolute_outside_cwd() {
        let mut session = session_at("sub/");
        for path in ["/other", "/subway", "/", "/su"] {
            let err = resolved(&mut session, path).unwrap_err();
            assert!(matches!(err, VfsError::PathEscapesRoot(_)), "{path}");
        }
        // The failure leaves the cwd prefix intact.
        assert_eq!(resolved(&mut session, "z").unwrap(), "/data/sub/z");
    }

    #[test]
    fn test_too_long() {
        let mut session =
            Session::open(&VfsConfig::new("/data").with_max_path_len(12)).unwrap();
        assert_eq!(resolved(&mut session, "abcdef").unwrap(), "/data/abcdef");
        let err = resolved(&mut session, "abcdefg").unwrap_err();
        assert!(matches!(err, VfsError::PathTooLong(_)));
        // Counted before normalization.
        let err = resolved(&mut session, "./././a").unwrap_err();
        assert!(matches!(err, VfsError::PathTooLong(_)));
    }

    #[test]
    fn test_embedded_nul() {
        let mut session = session_at("");
        let err = resolved(&mut session, "a\0b").unwrap_err();
        assert!(matches!(err, VfsError::InvalidPath(_)));
    }

    #[test]
    fn test_within_root_reaches_siblings() {
        let mut session = session_at("sub/");
        let path = resolve_within_root(&mut session, "../x").unwrap();
        assert_eq!(path, Path::new("/data/x"));
        session.rollback_primary();

        let path = resolve_within_root(&mut session, "/other/y").unwrap();
        assert_eq!(path, Path::new("/data/other/y"));
        session.rollback_primary();

        let path = resolve_within_root(&mut session, "/../../..").unwrap();
        assert_eq!(path, Path::new("/data/"));
        session.rollback_primary();

        assert_eq!(session.cwd(), "/data/sub/");
    }

    #[test]
    fn test_pair_results_are_independent() {
        let mut session = session_at("sub/");
        let (from, to) = resolve_pair(&mut session, "a/../old", "/sub/new").unwrap();
        assert_eq!(from, Path::new("/data/sub/old"));
        assert_eq!(to, Path::new("/data/sub/new"));
        assert!(from.starts_with("/data/sub/"));
        assert!(to.starts_with("/data/sub/"));
    }
}
