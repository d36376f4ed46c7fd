//! Output-directory mapper: class and method directories, and run paths inside them.
//!
//! The layout is `<root>/<class>/<method>/<prefix><NN><suffix>`. Class and method directories are get-or-create and
//! stable across runs; only the numbered run paths are new per invocation.

use std::path::{Path, PathBuf};

use testout_core::{MethodLabel, MethodName};
use tracing::debug;

use crate::allocator::RunPathGenerator;
use crate::class::TestClassHandle;
use crate::config::RunPathConfig;
use crate::dirs::{create_new_dir, ensure_dir, ensure_dir_all};
use crate::errors::Result;
use crate::root::OutputRoot;

/// Ensure the output directory of `class` exists and return it.
///
/// Parents are created as needed.
pub fn class_output_dir<R>(root: &R, class: &TestClassHandle) -> Result<PathBuf>
where
    R: OutputRoot + ?Sized,
{
    let dir = root.class_dir(class);
    ensure_dir_all(&dir)?;
    Ok(dir)
}

/// Resolve `label` to the calling method's name.
pub fn method_name(label: &MethodLabel) -> Result<MethodName> {
    Ok(label.resolve()?)
}

/// Ensure `<class_dir>/<method>` exists and return it.
///
/// ## Notes
/// - Every invocation of the same method gets the same directory, so output from a previous run is still there.
///   Use [`new_method_run_dir`] or [`new_method_run_path`] for a fresh location per run.
pub fn method_output_dir(class_dir: &Path, label: &MethodLabel) -> Result<PathBuf> {
    let method = method_name(label)?;
    let dir = class_dir.join(method.as_str());
    ensure_dir(&dir)?;
    Ok(dir)
}

/// A fresh, not yet existing run path inside the calling method's directory.
///
/// The method directory is created; the run path is not.
pub fn new_method_run_path(class_dir: &Path, label: &MethodLabel, config: &RunPathConfig) -> Result<PathBuf> {
    // Reject a bad pattern before touching the filesystem.
    let pattern = config.pattern()?;
    let dir = method_output_dir(class_dir, label)?;
    RunPathGenerator::new(dir, pattern).next_path()
}

/// A fresh run directory inside the calling method's directory, created before returning.
pub fn new_method_run_dir(class_dir: &Path, label: &MethodLabel, config: &RunPathConfig) -> Result<PathBuf> {
    let path = new_method_run_path(class_dir, label, config)?;
    create_new_dir(&path)?;
    debug!(path = %path.display(), "new method run directory");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::root::FixedRoot;
    use std::fs;
    use tempfile::TempDir;

    fn bar_label() -> MethodLabel {
        fn bar() -> MethodLabel {
            crate::method_label!()
        }
        bar()
    }

    #[test]
    fn test_class_output_dir_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let root = FixedRoot::new(tmp.path().join("out"));
        let dir = class_output_dir(&root, &TestClassHandle::new("FooTest")).unwrap();
        assert_eq!(dir, tmp.path().join("out").join("FooTest"));
        assert!(dir.is_dir());
    }

    #[test]
    fn test_method_output_dir_is_stable() {
        let tmp = TempDir::new().unwrap();
        let first = method_output_dir(tmp.path(), &bar_label()).unwrap();
        let second = method_output_dir(tmp.path(), &bar_label()).unwrap();
        assert_eq!(first, tmp.path().join("bar"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_method_output_dir_rejects_module_level_label() {
        let tmp = TempDir::new().unwrap();
        let label = MethodLabel::new("testout::mapper::tests::Here", "testout::mapper::tests");
        assert!(matches!(method_output_dir(tmp.path(), &label), Err(Error::InvalidLabel(_))));
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_new_method_run_path_does_not_create() {
        let tmp = TempDir::new().unwrap();
        let path = new_method_run_path(tmp.path(), &bar_label(), &RunPathConfig::default()).unwrap();
        assert_eq!(path, tmp.path().join("bar").join("RUN-01"));
        assert!(!path.exists());
        assert!(path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_new_method_run_dir_advances() {
        let tmp = TempDir::new().unwrap();
        let config = RunPathConfig::default();
        let first = new_method_run_dir(tmp.path(), &bar_label(), &config).unwrap();
        let second = new_method_run_dir(tmp.path(), &bar_label(), &config).unwrap();
        assert!(first.ends_with("bar/RUN-01"));
        assert!(second.ends_with("bar/RUN-02"));
        assert!(first.is_dir() && second.is_dir());
    }

    #[test]
    fn test_invalid_pattern_checked_first() {
        let tmp = TempDir::new().unwrap();
        let config = RunPathConfig::new().with_width(0);
        let err = new_method_run_path(tmp.path(), &bar_label(), &config).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
        assert!(!tmp.path().join("bar").exists());
    }
}
