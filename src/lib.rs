#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Collision-free output locations for test runs.
//!
//! Each test class gets a directory under an output root, each test method a subdirectory named after itself, and
//! each run of the method a fresh numbered path inside that:
//!
//! ```text
//! <root>/<TestClass>/<method>/RUN-01
//!                            /RUN-02
//! ```
//!
//! Re-running a suite without cleaning up never overwrites the previous run's output. The counter is small and
//! fixed-width on purpose: once every number is taken, allocation fails with [`Error::ExhaustedCounter`] instead of
//! wrapping around.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use testout::{FixedRoot, IoTestCase, TestClassHandle};
//!
//! fn bar() -> testout::Result<()> {
//!     let case = IoTestCase::new(&FixedRoot::new("/tmp/out"), TestClassHandle::new("FooTest"))?;
//!     let run = case.new_method_run_dir(&testout::method_label!())?;
//!     assert_eq!(run, std::path::Path::new("/tmp/out/FooTest/bar/RUN-01"));
//!     Ok(())
//! }
//! ```
//!
//! ## Panic Policy
//!
//! Library code returns [`Result`]; `unwrap()` is denied outside tests. Every error reaches the calling test.

extern crate self as testout;

pub mod allocator;
pub mod case;
pub mod class;
pub mod config;
pub mod dirs;
pub mod errors;
pub mod gate;
pub mod logging;
pub mod mapper;
pub mod root;

pub use allocator::{RunEntry, RunPathGenerator, allocate};
pub use case::IoTestCase;
pub use class::{TestClass, TestClassHandle};
pub use config::RunPathConfig;
pub use errors::{Error, Result};
pub use root::{FixedRoot, FnRoot, OutputRoot, TargetRoot, from_fn};
pub use testout_core::{LabelError, LabelErrorReason, MethodLabel, MethodName, RunPattern, RunPatternError};
pub use testout_derive::TestClass;

/// Capture the identity of the enclosing function as a [`MethodLabel`].
///
/// `method_label!()` must be used inside the function body it names. `method_label!(value)` labels with the type of a
/// value instead, which must also be declared inside the function (a local struct or a closure).
///
/// ## Examples
/// ```rust
/// fn writes_report() -> testout::MethodName {
///     testout::method_label!().resolve().unwrap()
/// }
///
/// assert_eq!(writes_report(), "writes_report");
/// ```
#[macro_export]
macro_rules! method_label {
    () => {{
        fn __testout_method_label() {}
        $crate::MethodLabel::new(
            ::std::any::type_name_of_val(&__testout_method_label),
            ::std::module_path!(),
        )
    }};
    ($value:expr) => {
        $crate::MethodLabel::of_val(&$value, ::std::module_path!())
    };
}

/// A [`TestClassHandle`] for the calling module, or for an explicit name.
///
/// `test_class!()` names the class after the module path without the crate name (`parser.tests`); inside an
/// integration test's root module it is the test binary's name.
#[macro_export]
macro_rules! test_class {
    () => {
        $crate::TestClassHandle::from_module_path(::std::module_path!())
    };
    ($name:expr) => {
        $crate::TestClassHandle::new($name)
    };
}
