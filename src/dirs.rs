//! Directory get-or-create primitives.
//!
//! All three helpers end with the same postcondition: the path exists and is a directory (a symlink to a
//! directory counts). Anything else is reported as [`Error::DirectoryCreation`].

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::errors::{Error, Result};

/// Ensure `path` is a directory, creating it and any missing parents.
pub fn ensure_dir_all(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    if let Err(source) = fs::create_dir_all(path) {
        if path.exists() && !path.is_dir() {
            return Err(Error::not_a_directory(path));
        }
        return Err(Error::directory_creation(path, source));
    }
    if !path.is_dir() {
        return Err(Error::not_a_directory(path));
    }
    debug!(path = %path.display(), "created output directory");
    Ok(())
}

/// Ensure `path` is a directory, creating only the last component.
///
/// The parent must already exist; a missing parent is an error rather than being created on the fly.
pub fn ensure_dir(path: &Path) -> Result<()> {
    match fs::create_dir(path) {
        Ok(()) => debug!(path = %path.display(), "created output directory"),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
        Err(source) => return Err(Error::directory_creation(path, source)),
    }
    if !path.is_dir() {
        return Err(Error::not_a_directory(path));
    }
    Ok(())
}

/// Create `path` as a new directory; it must not exist yet.
pub fn create_new_dir(path: &Path) -> Result<()> {
    fs::create_dir(path).map_err(|source| Error::directory_creation(path, source))?;
    debug!(path = %path.display(), "created run directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_all_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a").join("b").join("c");
        ensure_dir_all(&path).unwrap();
        assert!(path.is_dir());
    }

    #[test]
    fn test_ensure_dir_all_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out");
        ensure_dir_all(&path).unwrap();
        ensure_dir_all(&path).unwrap();
        assert!(path.is_dir());
    }

    #[test]
    fn test_ensure_dir_all_rejects_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("file");
        fs::write(&path, b"x").unwrap();
        let err = ensure_dir_all(&path).unwrap_err();
        assert!(matches!(err, Error::DirectoryCreation { .. }));
    }

    #[test]
    fn test_ensure_dir_all_rejects_file_in_parent_chain() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file");
        fs::write(&file, b"x").unwrap();
        let err = ensure_dir_all(&file.join("child")).unwrap_err();
        assert!(matches!(err, Error::DirectoryCreation { .. }));
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bar");
        ensure_dir(&path).unwrap();
        ensure_dir(&path).unwrap();
        assert!(path.is_dir());
    }

    #[test]
    fn test_ensure_dir_requires_parent() {
        let tmp = TempDir::new().unwrap();
        let err = ensure_dir(&tmp.path().join("missing").join("bar")).unwrap_err();
        assert!(matches!(err, Error::DirectoryCreation { .. }));
    }

    #[test]
    fn test_ensure_dir_rejects_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bar");
        fs::write(&path, b"x").unwrap();
        match ensure_dir(&path).unwrap_err() {
            Error::DirectoryCreation { source, .. } => assert_eq!(source.kind(), io::ErrorKind::NotADirectory),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_create_new_dir_fails_if_present() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("RUN-01");
        create_new_dir(&path).unwrap();
        assert!(matches!(create_new_dir(&path), Err(Error::DirectoryCreation { .. })));
    }
}
