//! Base-directory resolution: where a test class's output lives.
//!
//! The mapping `test class -> directory` is an explicit value passed to the mapper rather than process-wide state,
//! so a test of this crate can point everything at a `TempDir` while real suites use the cargo target directory.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::class::TestClassHandle;
use crate::config::{OUTPUT_DIR_NAME, ROOT_ENV};

/// Maps a test class to its output directory.
pub trait OutputRoot {
    /// Directory for `class`. The path need not exist yet.
    fn class_dir(&self, class: &TestClassHandle) -> PathBuf;
}

impl<R: OutputRoot + ?Sized> OutputRoot for &R {
    fn class_dir(&self, class: &TestClassHandle) -> PathBuf {
        (**self).class_dir(class)
    }
}

impl<R: OutputRoot + ?Sized> OutputRoot for Box<R> {
    fn class_dir(&self, class: &TestClassHandle) -> PathBuf {
        (**self).class_dir(class)
    }
}

/// `<base>/<class name>` under a fixed base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedRoot {
    base: PathBuf,
}

impl FixedRoot {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl OutputRoot for FixedRoot {
    fn class_dir(&self, class: &TestClassHandle) -> PathBuf {
        self.base.join(class.name())
    }
}

/// An [`OutputRoot`] backed by a closure.
#[derive(Debug, Clone)]
pub struct FnRoot<F>(F);

/// Wrap a closure as an [`OutputRoot`].
pub fn from_fn<F>(f: F) -> FnRoot<F>
where
    F: Fn(&TestClassHandle) -> PathBuf,
{
    FnRoot(f)
}

impl<F> OutputRoot for FnRoot<F>
where
    F: Fn(&TestClassHandle) -> PathBuf,
{
    fn class_dir(&self, class: &TestClassHandle) -> PathBuf {
        (self.0)(class)
    }
}

/// The default root: `test-outputs` inside the cargo target directory.
///
/// The base is resolved once, in order:
/// 1) `TESTOUT_ROOT` if set
/// 2) `$CARGO_TARGET_DIR/test-outputs`
/// 3) `<workspace root>/target/test-outputs`, walking up from `CARGO_MANIFEST_DIR` (or the current directory)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRoot {
    base: PathBuf,
}

impl TargetRoot {
    /// Resolve from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(|key| env::var_os(key), env::current_dir().ok())
    }

    /// Resolve with an explicit variable lookup and fallback directory.
    pub fn resolve<L>(lookup: L, cwd: Option<PathBuf>) -> Self
    where
        L: Fn(&str) -> Option<OsString>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        if let Some(base) = var(ROOT_ENV) {
            return Self { base };
        }

        let target = var("CARGO_TARGET_DIR").unwrap_or_else(|| {
            let start = var("CARGO_MANIFEST_DIR").or(cwd).unwrap_or_else(|| PathBuf::from("."));
            workspace_root(&start).join("target")
        });
        Self {
            base: target.join(OUTPUT_DIR_NAME),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl Default for TargetRoot {
    fn default() -> Self {
        Self::from_env()
    }
}

impl OutputRoot for TargetRoot {
    fn class_dir(&self, class: &TestClassHandle) -> PathBuf {
        self.base.join(class.name())
    }
}

/// Best effort to find the workspace root above `start`.
///
/// The nearest ancestor holding a `Cargo.lock` or `.git` wins; `start` itself is the last resort.
fn workspace_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|p| p.join("Cargo.lock").exists() || p.join(".git").exists())
        .unwrap_or(start)
        .to_path_buf()
}
