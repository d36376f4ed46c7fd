//! Error type for test-output allocation.
//!
//! Every failure is surfaced to the calling test; nothing here is logged-and-swallowed. The `miette` codes let a
//! test harness that renders diagnostics point the operator at the fix (usually: clean the output tree).

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use testout_core::{LabelError, RunPatternError};
use thiserror::Error;

/// Errors raised while mapping or allocating test output paths.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The method label was not declared inside a test function body.
    #[error(transparent)]
    #[diagnostic(
        code(testout::invalid_label),
        help("create the label inside the test function itself, e.g. `let label = testout::method_label!();`")
    )]
    InvalidLabel(#[from] LabelError),

    /// A directory could not be created, or the path exists but is not a directory.
    #[error("failed to create test output directory {}", .path.display())]
    #[diagnostic(code(testout::directory_creation))]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Every counter value of the run-name pattern is already taken.
    #[error("run counter exhausted in {}: all {max} `{pattern}` names are taken", .dir.display())]
    #[diagnostic(
        code(testout::exhausted_counter),
        help("stale test runs have piled up; delete the old run outputs in this directory and re-run")
    )]
    ExhaustedCounter { dir: PathBuf, pattern: String, max: u64 },

    /// The requested prefix/width/suffix combination is not usable.
    #[error(transparent)]
    #[diagnostic(code(testout::invalid_pattern))]
    InvalidPattern(#[from] RunPatternError),

    /// The filesystem could not be inspected.
    #[error("I/O error on {}", .path.display())]
    #[diagnostic(code(testout::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for test-output operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn directory_creation(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::DirectoryCreation {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Error::directory_creation(
            path,
            io::Error::new(io::ErrorKind::NotADirectory, "path exists but is not a directory"),
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
