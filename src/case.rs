//! `IoTestCase`: per-test-class access to output directories.
//!
//! ## Example
//!
//! ```rust,no_run
//! use testout::{IoTestCase, TestClass};
//!
//! #[derive(TestClass)]
//! struct ParserTest;
//!
//! fn dumps_tokens() -> testout::Result<()> {
//!     let case = IoTestCase::for_class::<ParserTest>()?;
//!     // target/test-outputs/ParserTest/dumps_tokens/RUN-01, RUN-02, ...
//!     let run = case.new_method_run_dir(&testout::method_label!())?;
//!     std::fs::write(run.join("tokens.txt"), "...").unwrap();
//!     Ok(())
//! }
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use testout_core::{MethodLabel, MethodName};

use crate::class::{TestClass, TestClassHandle};
use crate::config::RunPathConfig;
use crate::errors::Result;
use crate::gate::EnabledCheck;
use crate::mapper;
use crate::root::{OutputRoot, TargetRoot};

/// A test class bound to its (existing) output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoTestCase {
    class: TestClassHandle,
    output_dir: PathBuf,
}

impl IoTestCase {
    /// Bind `class` to its directory under `root`, creating the directory.
    pub fn new<R>(root: &R, class: TestClassHandle) -> Result<Self>
    where
        R: OutputRoot + ?Sized,
    {
        let output_dir = mapper::class_output_dir(root, &class)?;
        Ok(Self { class, output_dir })
    }

    /// Bind `T` to its directory under the default [`TargetRoot`].
    pub fn for_class<T: TestClass + ?Sized>() -> Result<Self> {
        Self::with_root::<T, _>(&TargetRoot::from_env())
    }

    /// Bind `T` to its directory under `root`.
    pub fn with_root<T, R>(root: &R) -> Result<Self>
    where
        T: TestClass + ?Sized,
        R: OutputRoot + ?Sized,
    {
        Self::new(root, TestClassHandle::of::<T>())
    }

    pub fn class(&self) -> &TestClassHandle {
        &self.class
    }

    /// The class output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Name of the method `label` was declared in.
    pub fn method(&self, label: &MethodLabel) -> Result<MethodName> {
        mapper::method_name(label)
    }

    /// The calling method's output directory, created if missing.
    ///
    /// ## Notes
    /// - Careful: this is the same directory on every run. Prefer [`new_method_run_dir`](Self::new_method_run_dir)
    ///   unless the test cleans up after itself.
    pub fn method_output_dir(&self, label: &MethodLabel) -> Result<PathBuf> {
        mapper::method_output_dir(&self.output_dir, label)
    }

    /// A fresh `RUN-NN` path in the calling method's directory. The path itself is not created.
    pub fn method_output_path(&self, label: &MethodLabel) -> Result<PathBuf> {
        self.method_output_path_with(label, &RunPathConfig::default())
    }

    /// Like [`method_output_path`](Self::method_output_path) with a custom prefix.
    pub fn method_output_path_with_prefix(&self, label: &MethodLabel, prefix: &str) -> Result<PathBuf> {
        self.method_output_path_with(label, &RunPathConfig::new().with_prefix(prefix))
    }

    /// A fresh path named by `config` in the calling method's directory. The path itself is not created.
    pub fn method_output_path_with(&self, label: &MethodLabel, config: &RunPathConfig) -> Result<PathBuf> {
        mapper::new_method_run_path(&self.output_dir, label, config)
    }

    /// A fresh, created `RUN-NN` directory for this invocation of the calling method.
    pub fn new_method_run_dir(&self, label: &MethodLabel) -> Result<PathBuf> {
        self.new_method_run_dir_with(label, &RunPathConfig::default())
    }

    /// A fresh, created directory named by `config`.
    pub fn new_method_run_dir_with(&self, label: &MethodLabel, config: &RunPathConfig) -> Result<PathBuf> {
        mapper::new_method_run_dir(&self.output_dir, label, config)
    }

    /// Whether the flag `var` is set to `true` in the environment.
    pub fn check_enabled(&self, var: &str) -> bool {
        EnabledCheck::from_env().is_enabled(var)
    }

    /// Like [`check_enabled`](Self::check_enabled), logging how to enable the test when it is skipped.
    pub fn check_enabled_for(&self, var: &str, label: &MethodLabel) -> Result<bool> {
        self.check_enabled_using(&EnabledCheck::from_env(), var, Some(label), false)
    }

    /// Enabled by the flag, or because `TESTOUT_TEST` names this class.
    pub fn check_enabled_or_selected(&self, var: &str, label: &MethodLabel) -> Result<bool> {
        self.check_enabled_using(&EnabledCheck::from_env(), var, Some(label), true)
    }

    /// Gate through an explicit [`EnabledCheck`].
    pub fn check_enabled_using<L>(
        &self,
        check: &EnabledCheck<L>,
        var: &str,
        label: Option<&MethodLabel>,
        include_test: bool,
    ) -> Result<bool>
    where
        L: Fn(&str) -> Option<OsString>,
    {
        check.check(var, label, include_test, &self.class)
    }
}
