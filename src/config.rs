//! Configuration for test output allocation.
//!
//! Run-path naming is configured per call through [`RunPathConfig`]; the output root and optional-test selection
//! come from the environment variables named here.

use testout_core::{DEFAULT_PREFIX, DEFAULT_SUFFIX, DEFAULT_WIDTH, RunPattern, RunPatternError};

/// Overrides the base directory all test-class directories are created under.
pub const ROOT_ENV: &str = "TESTOUT_ROOT";

/// Names a test class whose optional tests should run even when their flag is unset.
pub const SELECTED_TEST_ENV: &str = "TESTOUT_TEST";

/// Directory created under the cargo target directory when no root override is set.
pub const OUTPUT_DIR_NAME: &str = "test-outputs";

/// Naming of allocated run paths: `<prefix><counter><suffix>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPathConfig {
    /// Text before the counter
    pub prefix: String,
    /// Number of counter digits; bounds uncleaned runs at `10^width - 1`
    pub width: u32,
    /// Text after the counter, e.g. a file extension
    pub suffix: String,
}

impl Default for RunPathConfig {
    fn default() -> Self {
        // Two digits: at most 99 runs before the output tree has to be cleaned.
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            width: DEFAULT_WIDTH,
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

impl RunPathConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filename prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the counter width
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the filename suffix
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Validate into a [`RunPattern`].
    pub fn pattern(&self) -> Result<RunPattern, RunPatternError> {
        RunPattern::new(self.prefix.as_str(), self.width, self.suffix.as_str())
    }
}
