//! Test-class identity.

use std::fmt;

use testout_core::class_name::{module_class_name, sanitize_component, short_type_name};

/// A type that names a group of tests (a "test class").
///
/// Usually derived: `#[derive(testout::TestClass)]` uses the type's identifier, or the value of
/// `#[test_class(name = "...")]`.
pub trait TestClass {
    /// Directory name of this class under the output root.
    const NAME: &'static str;
}

/// Identifies a test class; the key the output root maps to a directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TestClassHandle {
    name: String,
}

impl TestClassHandle {
    /// Create a handle with an explicit name; the name is made safe for use as one path component.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: sanitize_component(name.as_ref()),
        }
    }

    /// Handle for a type implementing [`TestClass`].
    pub fn of<T: TestClass + ?Sized>() -> Self {
        Self::new(T::NAME)
    }

    /// Handle named after any type's short name (`my_crate::tests::FooTest` -> `FooTest`).
    pub fn of_type<T: ?Sized>() -> Self {
        Self::new(short_type_name(std::any::type_name::<T>()))
    }

    /// Handle named after a module path; see `testout::test_class!()`.
    pub fn from_module_path(module_path: &str) -> Self {
        Self::new(module_class_name(module_path))
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TestClassHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
