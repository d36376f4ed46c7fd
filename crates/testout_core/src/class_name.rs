//! Directory names for test classes.
//!
//! A test class is whatever groups related test functions: a struct used as a fixture, or simply the module the
//! tests live in. Both are turned into a single path component here.

use crate::path::{split_path, strip_generics};

/// Return the last segment of a rendered type path, without generic arguments.
///
/// ## Examples
/// ```rust
/// use testout_core::class_name::short_type_name;
///
/// assert_eq!(short_type_name("my_crate::tests::FooTest"), "FooTest");
/// assert_eq!(short_type_name("my_crate::Fixture<alloc::string::String>"), "Fixture");
/// ```
pub fn short_type_name(type_name: &str) -> &str {
    let segments = split_path(type_name);
    let last = segments.last().copied().unwrap_or(type_name);
    strip_generics(last)
}

/// Derive a class name from a `module_path!()`.
///
/// ## Returns
/// - The crate name for the crate root (an integration-test file is its own crate).
/// - Otherwise the module path below the crate root, joined with `.` (`my_crate::io::tests` -> `io.tests`).
pub fn module_class_name(module_path: &str) -> String {
    let segments: Vec<&str> = module_path.split("::").filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => String::new(),
        [root] => (*root).to_string(),
        [_, rest @ ..] => rest.join("."),
    }
}

/// Make `name` usable as a single path component.
///
/// Path separators, `:` and NUL become `_`; the special names `.` and `..` (and an empty name) become `_` as well.
pub fn sanitize_component(name: &str) -> String {
    if name.is_empty() || name == "." || name == ".." {
        return "_".to_string();
    }
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect()
}
