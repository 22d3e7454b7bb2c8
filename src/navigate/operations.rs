//! Navigation operations implementation

use std::path::Path;

use log::{info, warn};

use crate::error::VfsError;
use crate::session::Session;
use crate::session::resolve::resolve_within_root;
use crate::storage::filesystem::Filesystem;

/// Changes the working directory of a session
///
/// The target may be anywhere under the root, including above the current
/// working directory. It must be the root itself or an existing directory.
/// On failure the session is left exactly as it was.
pub fn change_directory<F: Filesystem>(
    session: &mut Session<F>,
    target_path: &str,
) -> Result<(), VfsError> {
    let resolved = resolve_within_root(session, target_path).map(|_| ());
    let outcome = resolved.and_then(|()| validate_candidate(session));

    match outcome {
        Ok(()) => {
            session.commit_primary();
            info!("Changed directory to {}", current_directory(session));
            Ok(())
        }
        Err(e) => {
            session.rollback_primary();
            Err(e)
        }
    }
}

/// Moves the working directory one level up (a no-op at the root)
pub fn change_to_parent<F: Filesystem>(session: &mut Session<F>) -> Result<(), VfsError> {
    change_directory(session, "..")
}

/// Returns the working directory as the client sees it
///
/// `/` for the root, otherwise the path below the root without a trailing
/// separator.
pub fn current_directory<F: Filesystem>(session: &Session<F>) -> String {
    let root_len = session.prefix().root_len;
    let cwd = session.cwd();

    if cwd.len() > root_len {
        cwd[root_len - 1..cwd.len() - 1].to_string()
    } else {
        "/".to_string()
    }
}

/// Checks the candidate sitting in the primary buffer.
fn validate_candidate<F: Filesystem>(session: &mut Session<F>) -> Result<(), VfsError> {
    let root_len = session.prefix().root_len;
    let (fs, _, candidate, _) = session.split_mut();

    if !candidate.ends_with_separator() {
        candidate.push_separator().inspect_err(|_| {
            warn!("path too long in chdir: {}", candidate.as_str());
        })?;
    }

    if candidate.len() == root_len {
        return Ok(());
    }

    let dir = &candidate.as_str()[..candidate.len() - 1];
    match fs.stat(Path::new(dir)) {
        Ok(st) if st.is_dir() => Ok(()),
        _ => {
            warn!(
                "client tried to chdir to a directory that doesn't exist: {}",
                dir
            );
            Err(VfsError::NotADirectory(dir[root_len - 1..].to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VfsConfig;
    use crate::storage::filesystem::LocalFilesystem;
    use std::fs;

    fn session_in(dir: &Path) -> Session<LocalFilesystem> {
        crate::utils::logging::setup_test_logging();
        let root = dir.to_str().unwrap();
        Session::open(&VfsConfig::new(root)).unwrap()
    }

    #[test]
    fn test_change_directory_and_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub/inner")).unwrap();
        let mut session = session_in(dir.path());

        assert_eq!(current_directory(&session), "/");

        change_directory(&mut session, "sub").unwrap();
        assert_eq!(current_directory(&session), "/sub");

        change_directory(&mut session, "inner/").unwrap();
        assert_eq!(current_directory(&session), "/sub/inner");

        change_to_parent(&mut session).unwrap();
        assert_eq!(current_directory(&session), "/sub");

        change_directory(&mut session, "/").unwrap();
        assert_eq!(current_directory(&session), "/");

        change_directory(&mut session, "/sub/./inner//").unwrap();
        assert_eq!(current_directory(&session), "/sub/inner");
    }

    #[test]
    fn test_change_directory_to_sibling() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        let mut session = session_in(dir.path());

        change_directory(&mut session, "a").unwrap();
        change_directory(&mut session, "../b").unwrap();
        assert_eq!(current_directory(&session), "/b");

        change_directory(&mut session, "/a").unwrap();
        assert_eq!(current_directory(&session), "/a");
    }

    #[test]
    fn test_parent_of_root_stays_at_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());

        change_to_parent(&mut session).unwrap();
        change_directory(&mut session, "../../..").unwrap();
        assert_eq!(current_directory(&session), "/");
    }

    #[test]
    fn test_failed_change_is_rolled_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/file.txt"), b"data").unwrap();
        let mut session = session_in(dir.path());
        change_directory(&mut session, "sub").unwrap();
        let before = session.cwd().to_string();

        let err = change_directory(&mut session, "nonexistent").unwrap_err();
        assert!(matches!(err, VfsError::NotADirectory(ref p) if p == "/sub/nonexistent"));
        assert_eq!(current_directory(&session), "/sub");

        let err = change_directory(&mut session, "file.txt").unwrap_err();
        assert!(matches!(err, VfsError::NotADirectory(_)));
        assert_eq!(session.cwd(), before);

        // Both buffers still agree: a rename-style pair resolution starts from
        // the same directory.
        let (a, b) = crate::session::resolve_pair(&mut session, "x", "y").unwrap();
        assert_eq!(a.parent(), b.parent());
        assert!(a.ends_with("sub/x"));
    }

    #[test]
    fn test_change_directory_too_long() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let max = root.len() + 1 + 4;
        fs::create_dir_all(dir.path().join("abcd")).unwrap();
        let mut session =
            Session::open(&VfsConfig::new(root).with_max_path_len(max)).unwrap();

        // Fits only without the separator the cwd needs.
        let err = change_directory(&mut session, "abcd").unwrap_err();
        assert!(matches!(err, VfsError::PathTooLong(_)));
        assert_eq!(current_directory(&session), "/");

        let err = change_directory(&mut session, "abcdefgh").unwrap_err();
        assert!(matches!(err, VfsError::PathTooLong(_)));
        assert_eq!(current_directory(&session), "/");
    }
}
