//! Run-path generator: the next free `<prefix><NN><suffix>` name in a directory.
//!
//! ## Allocation
//!
//! Candidates are probed in ascending order, starting at 1, and the first name with no filesystem entry (file,
//! directory or dangling symlink) wins. Nothing is cached between calls: the directory listing on disk is the only
//! state, so runs deleted or added in between are always taken into account.
//!
//! ## Overflow
//!
//! When every counter value up to `10^width - 1` is taken, allocation fails with
//! [`Error::ExhaustedCounter`] instead of wrapping around. With the default width of 2 that means 99 uncleaned
//! runs per test method.
//!
//! ## Races
//!
//! [`RunPathGenerator::next_path`] only names a path (check-then-act); the caller creates it. Two processes
//! allocating in the same directory can pick the same name. [`RunPathGenerator::create_next_dir`] claims the name
//! with an exclusive `mkdir` instead and moves on to the next counter when it loses.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use testout_core::RunPattern;
use tracing::{debug, warn};

use crate::config::RunPathConfig;
use crate::errors::{Error, Result};

/// An existing run found in the directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunEntry {
    pub counter: u64,
    pub path: PathBuf,
}

/// Allocates numbered run paths inside one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPathGenerator {
    dir: PathBuf,
    pattern: RunPattern,
}

impl RunPathGenerator {
    pub fn new(dir: impl Into<PathBuf>, pattern: RunPattern) -> Self {
        Self {
            dir: dir.into(),
            pattern,
        }
    }

    /// Create a generator from per-call naming settings.
    pub fn with_config(dir: impl Into<PathBuf>, config: &RunPathConfig) -> Result<Self> {
        Ok(Self::new(dir, config.pattern()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn pattern(&self) -> &RunPattern {
        &self.pattern
    }

    /// Path for a given counter value.
    pub fn path_for(&self, counter: u64) -> PathBuf {
        self.dir.join(self.pattern.file_name(counter))
    }

    /// Name the lowest-numbered run path that does not exist yet. The path is not created.
    ///
    /// ## Errors
    /// - [`Error::ExhaustedCounter`] if every counter value is taken.
    /// - [`Error::Io`] if a candidate cannot be inspected.
    #[tracing::instrument(skip_all, fields(dir = %self.dir.display(), pattern = %self.pattern))]
    pub fn next_path(&self) -> Result<PathBuf> {
        for counter in self.pattern.candidates() {
            let path = self.path_for(counter);
            if !occupied(&path)? {
                debug!(path = %path.display(), "allocated run path");
                return Ok(path);
            }
        }
        Err(self.exhausted())
    }

    /// Claim the lowest free run name by creating it as a directory.
    ///
    /// Unlike [`next_path`](Self::next_path) followed by `mkdir`, a name taken between the check and the creation is
    /// skipped rather than reported.
    #[tracing::instrument(skip_all, fields(dir = %self.dir.display(), pattern = %self.pattern))]
    pub fn create_next_dir(&self) -> Result<PathBuf> {
        for counter in self.pattern.candidates() {
            let path = self.path_for(counter);
            match fs::create_dir(&path) {
                Ok(()) => {
                    debug!(path = %path.display(), "created run directory");
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(source) => return Err(Error::directory_creation(path, source)),
            }
        }
        Err(self.exhausted())
    }

    /// Existing runs of this pattern, in counter order.
    ///
    /// A missing directory has no runs. Entries that merely resemble the pattern (other width, other suffix) are
    /// ignored.
    pub fn existing_runs(&self) -> Result<Vec<RunEntry>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(Error::io(&self.dir, source)),
        };

        let mut runs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::io(&self.dir, source))?;
            let file_name = entry.file_name();
            let Some(counter) = file_name.to_str().and_then(|name| self.pattern.parse(name)) else {
                continue;
            };
            runs.push(RunEntry {
                counter,
                path: entry.path(),
            });
        }
        runs.sort();
        Ok(runs)
    }

    /// The highest-numbered existing run, if any.
    pub fn latest_run(&self) -> Result<Option<PathBuf>> {
        Ok(self.existing_runs()?.pop().map(|run| run.path))
    }

    fn exhausted(&self) -> Error {
        let max = self.pattern.max_counter();
        warn!(
            dir = %self.dir.display(),
            pattern = %self.pattern,
            max,
            "run counter exhausted; clean the test output directory"
        );
        Error::ExhaustedCounter {
            dir: self.dir.clone(),
            pattern: self.pattern.glob(),
            max,
        }
    }
}

/// Allocate `dir/<prefix><NN><suffix>` with a `width`-digit counter. The path is not created.
///
/// ## Examples
/// ```no_run
/// let path = testout::allocate("target/test-outputs/FooTest/bar", "RUN-", 2, "").unwrap();
/// assert!(path.ends_with("RUN-01"));
/// ```
pub fn allocate(dir: impl Into<PathBuf>, prefix: &str, width: u32, suffix: &str) -> Result<PathBuf> {
    let pattern = RunPattern::new(prefix, width, suffix)?;
    RunPathGenerator::new(dir, pattern).next_path()
}

/// Whether anything (even a dangling symlink) exists at `path`.
fn occupied(path: &Path) -> Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(Error::io(path, source)),
    }
}
