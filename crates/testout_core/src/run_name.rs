//! Numbered run names: `<prefix><zero-padded counter><suffix>`.
//!
//! A [`RunPattern`] fixes the prefix, the counter width and the suffix. The counter space is `1..=10^width - 1`;
//! `0` is never allocated, so a two-digit pattern yields `RUN-01` through `RUN-99`.

use std::fmt;
use std::ops::RangeInclusive;

use crate::{DEFAULT_PREFIX, DEFAULT_SUFFIX, DEFAULT_WIDTH};

/// Widest supported counter; `10^18 - 1` still fits a `u64`.
pub const MAX_WIDTH: u32 = 18;

/// A validated run-name pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunPattern {
    prefix: String,
    width: u32,
    suffix: String,
}

/// Why a run-name pattern was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPatternError {
    /// The counter width is outside `1..=MAX_WIDTH`.
    Width(u32),
    /// The prefix or suffix would escape the run directory (path separator or NUL).
    Separator { part: &'static str, value: String },
}

impl fmt::Display for RunPatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunPatternError::Width(width) => {
                write!(f, "run counter width must be between 1 and {MAX_WIDTH}, got {width}")
            }
            RunPatternError::Separator { part, value } => {
                write!(f, "run name {part} `{value}` must not contain a path separator")
            }
        }
    }
}

impl std::error::Error for RunPatternError {}

impl RunPattern {
    /// Create a pattern, validating the width and the name parts.
    ///
    /// ## Parameters
    /// - `prefix`: text before the counter (e.g. `RUN-`).
    /// - `width`: number of counter digits, `1..=MAX_WIDTH`.
    /// - `suffix`: text after the counter (e.g. `.log`).
    ///
    /// ## Errors
    /// - [`RunPatternError::Width`] for a zero or oversized width.
    /// - [`RunPatternError::Separator`] if `prefix` or `suffix` contains `/`, `\` or NUL.
    pub fn new(prefix: impl Into<String>, width: u32, suffix: impl Into<String>) -> Result<Self, RunPatternError> {
        let prefix = prefix.into();
        let suffix = suffix.into();

        if width == 0 || width > MAX_WIDTH {
            return Err(RunPatternError::Width(width));
        }
        check_part("prefix", &prefix)?;
        check_part("suffix", &suffix)?;

        Ok(Self { prefix, width, suffix })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Largest counter this pattern can render (`10^width - 1`).
    pub fn max_counter(&self) -> u64 {
        10u64.pow(self.width) - 1
    }

    /// Counters in allocation order: `1..=max_counter()`.
    pub fn candidates(&self) -> RangeInclusive<u64> {
        1..=self.max_counter()
    }

    /// Render the file name for `counter`.
    ///
    /// ## Examples
    /// ```rust
    /// use testout_core::RunPattern;
    ///
    /// let pattern = RunPattern::new("RUN-", 2, ".log").unwrap();
    /// assert_eq!(pattern.file_name(7), "RUN-07.log");
    /// ```
    pub fn file_name(&self, counter: u64) -> String {
        debug_assert!(counter <= self.max_counter(), "counter {counter} wider than pattern {self}");
        format!(
            "{}{:0width$}{}",
            self.prefix,
            counter,
            self.suffix,
            width = self.width as usize
        )
    }

    /// Recognise a file name produced by this pattern and return its counter.
    ///
    /// ## Returns
    /// - `Some(counter)` for names of exactly `prefix + width digits + suffix` with a non-zero counter.
    /// - `None` for anything else, including names with a wider or narrower counter.
    pub fn parse(&self, file_name: &str) -> Option<u64> {
        let digits = file_name
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())?;
        if digits.len() != self.width as usize || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().filter(|&counter| counter > 0)
    }

    /// Display form with `#` per digit, e.g. `RUN-##.log`.
    pub fn glob(&self) -> String {
        format!("{}{}{}", self.prefix, "#".repeat(self.width as usize), self.suffix)
    }
}

impl Default for RunPattern {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            width: DEFAULT_WIDTH,
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

impl fmt::Display for RunPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.glob())
    }
}

fn check_part(part: &'static str, value: &str) -> Result<(), RunPatternError> {
    if value.contains(['/', '\\', '\0']) {
        return Err(RunPatternError::Separator {
            part,
            value: value.to_string(),
        });
    }
    Ok(())
}
