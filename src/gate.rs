//! Environment-variable gating of optional (slow) tests.
//!
//! A gated test checks its flag first and returns early when the flag is off:
//!
//! ```rust,no_run
//! use testout::gate::EnabledCheck;
//!
//! fn long_running_replay() {
//!     let label = testout::method_label!();
//!     let class = testout::test_class!();
//!     if !EnabledCheck::from_env().check("REPLAY_ALL", Some(&label), true, &class).unwrap() {
//!         return;
//!     }
//!     // ...
//! }
//! ```

use std::env;
use std::ffi::OsString;

use testout_core::MethodLabel;
use tracing::info;

use crate::class::TestClassHandle;
use crate::config::SELECTED_TEST_ENV;
use crate::errors::Result;

/// Reads feature flags through a variable lookup.
#[derive(Debug, Clone)]
pub struct EnabledCheck<L> {
    lookup: L,
}

/// Lookup into the process environment.
pub type EnvLookup = fn(&str) -> Option<OsString>;

fn process_env(key: &str) -> Option<OsString> {
    env::var_os(key)
}

impl EnabledCheck<EnvLookup> {
    /// Check flags in the process environment.
    pub fn from_env() -> Self {
        Self {
            lookup: process_env as EnvLookup,
        }
    }
}

impl Default for EnabledCheck<EnvLookup> {
    fn default() -> Self {
        Self::from_env()
    }
}

impl<L> EnabledCheck<L>
where
    L: Fn(&str) -> Option<OsString>,
{
    /// Check flags through `lookup` instead of the process environment.
    pub fn with_lookup(lookup: L) -> Self {
        Self { lookup }
    }

    /// Whether `var` is set to `true` (in any case).
    pub fn is_enabled(&self, var: &str) -> bool {
        (self.lookup)(var).is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    /// Whether `TESTOUT_TEST` names `class`, i.e. the class is being run on purpose.
    pub fn is_selected(&self, class: &TestClassHandle) -> bool {
        (self.lookup)(SELECTED_TEST_ENV).is_some_and(|v| v == class.name())
    }

    /// Decide whether an optional test should run.
    ///
    /// ## Parameters
    /// - `var`: the flag that enables the test.
    /// - `label`: the test's method label; when given, a skip is reported through `tracing` at info level.
    /// - `include_test`: also run when `TESTOUT_TEST` names `class`.
    /// - `class`: the test's class.
    ///
    /// ## Errors
    /// - [`Error::InvalidLabel`](crate::Error::InvalidLabel) if the test is skipped and `label` cannot be resolved.
    pub fn check(
        &self,
        var: &str,
        label: Option<&MethodLabel>,
        include_test: bool,
        class: &TestClassHandle,
    ) -> Result<bool> {
        let enabled = self.is_enabled(var) || (include_test && self.is_selected(class));
        if enabled {
            return Ok(true);
        }
        if let Some(label) = label {
            let method = label.resolve()?;
            let message = skip_message(method.as_str(), var, include_test.then_some(class));
            info!(class = %class, method = %method, flag = var, "{message}");
        }
        Ok(false)
    }
}

/// The hint logged when an optional test is skipped.
pub fn skip_message(method: &str, var: &str, selectable: Option<&TestClassHandle>) -> String {
    let mut message = format!("Skipping {method}. To activate run with {var}=true");
    if let Some(class) = selectable {
        message.push_str(&format!(" or {SELECTED_TEST_ENV}={class}"));
    }
    message
}
