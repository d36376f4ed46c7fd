//! Provide the pure naming rules behind `testout`'s on-disk layout.
//!
//! Everything here is deterministic string work shared by the IO crate and its fuzz targets:
//! - recovering a function's name from the compiler-rendered path of a type declared inside it ([`label`]),
//! - rendering and recognising numbered run names such as `RUN-07` ([`run_name`]),
//! - turning type paths and module paths into directory-safe test-class names ([`class_name`]).
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state and no dependencies.
//! - The filesystem side (creating directories, probing for free run names) lives in the `testout` crate.

#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod class_name;
pub mod label;
pub mod run_name;

mod path;

pub use label::{LabelError, LabelErrorReason, MethodLabel, MethodName};
pub use run_name::{RunPattern, RunPatternError};

/// Default filename prefix for allocated run paths.
pub const DEFAULT_PREFIX: &str = "RUN-";

/// Default digit width of the run counter (`01`..`99`).
///
/// Small on purpose: after 99 uncleaned runs allocation fails instead of wrapping around.
pub const DEFAULT_WIDTH: u32 = 2;

/// Default suffix appended after the run counter.
pub const DEFAULT_SUFFIX: &str = "";
