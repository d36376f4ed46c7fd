//! Recover the name of the function a label was declared in.
//!
//! A [`MethodLabel`] carries the compiler-rendered path of a type that was declared *inside* a function body, for
//! example the local `fn` item that `testout::method_label!()` expands to:
//!
//! ```text
//! my_crate::tests::FooTest::bar::__testout_method_label
//! ```
//!
//! Dropping the label's own segment (and any `{{closure}}`-style anonymous scopes) leaves the enclosing function as
//! the innermost named segment, so a test can name its output directory after itself without repeating its own name
//! as a string literal.
//!
//! ## Notes
//!
//! - The rendered path comes from [`std::any::type_name`]. Its exact format is not a stability guarantee of the
//!   standard library, which is why parsing is lenient about generics and qualified `<T as Trait>` segments.
//! - When the calling module path is known, labels whose type lives directly at module level (or in another module
//!   altogether) are rejected instead of silently naming the module.

use std::fmt;

use crate::path::{split_path, strip_generics};

/// An opaque token whose type identifies the function it was declared in.
///
/// Build one with `testout::method_label!()` (or [`MethodLabel::of_val`] for a value of a locally declared type)
/// and turn it into a name with [`MethodLabel::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodLabel {
    type_name: &'static str,
    module_path: Option<&'static str>,
}

impl MethodLabel {
    /// Create a label from a rendered type path and the module it was declared in.
    ///
    /// ## Parameters
    /// - `type_name`: the rendered path of a type declared in the calling function.
    /// - `module_path`: the `module_path!()` of the declaration site.
    pub const fn new(type_name: &'static str, module_path: &'static str) -> Self {
        Self {
            type_name,
            module_path: Some(module_path),
        }
    }

    /// Create a label from a rendered type path alone.
    ///
    /// ## Notes
    /// - Without a module path the resolver cannot tell a module-level type from a function-local one; prefer
    ///   [`MethodLabel::new`].
    pub const fn from_type_name(type_name: &'static str) -> Self {
        Self {
            type_name,
            module_path: None,
        }
    }

    /// Create a label from any value whose type was declared in the calling function.
    ///
    /// ## Examples
    /// ```rust
    /// use testout_core::MethodLabel;
    ///
    /// fn write_report() -> &'static str {
    ///     struct Here;
    ///     MethodLabel::of_val(&Here, module_path!()).resolve().unwrap().as_str()
    /// }
    ///
    /// assert_eq!(write_report(), "write_report");
    /// ```
    pub fn of_val<T: ?Sized>(value: &T, module_path: &'static str) -> Self {
        Self::new(std::any::type_name_of_val(value), module_path)
    }

    /// The rendered type path this label was built from.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The module the label was declared in, if known.
    pub fn module_path(&self) -> Option<&'static str> {
        self.module_path
    }

    /// Resolve the name of the function this label was declared in.
    ///
    /// ## Returns
    /// - (`MethodName`): the innermost named function enclosing the label's type.
    ///
    /// ## Errors
    /// - [`LabelError`] if the label's type was not declared inside a function body of the calling module.
    pub fn resolve(&self) -> Result<MethodName, LabelError> {
        resolve_method_name(self.type_name, self.module_path)
            .map(MethodName)
            .map_err(|reason| LabelError {
                type_name: self.type_name,
                reason,
            })
    }
}

/// The name of a function recovered from a [`MethodLabel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodName(&'static str);

impl MethodName {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for MethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for MethodName {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl PartialEq<str> for MethodName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MethodName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A label that does not identify an enclosing function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelError {
    pub type_name: &'static str,
    pub reason: LabelErrorReason,
}

/// Why a label could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelErrorReason {
    /// The rendered type path has no enclosing segment at all (e.g. `i32`).
    Empty,
    /// The type is declared directly in a module, not in a function body.
    ModuleLevel,
    /// The type is declared outside the module the label was created in.
    ForeignType,
    /// The enclosing segment is not a plain identifier.
    NotAnIdentifier,
}

impl LabelErrorReason {
    /// Return the user-facing description of this reason.
    pub fn message(self) -> &'static str {
        match self {
            LabelErrorReason::Empty => "type has no enclosing scope",
            LabelErrorReason::ModuleLevel => "type is declared at module level, not inside a function body",
            LabelErrorReason::ForeignType => "type is declared outside the calling module",
            LabelErrorReason::NotAnIdentifier => "enclosing scope is not a named function",
        }
    }
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "label type `{}` not defined inside a test function: {}",
            self.type_name,
            self.reason.message()
        )
    }
}

impl std::error::Error for LabelError {}

/// Resolve the enclosing function name from a rendered type path.
///
/// ## Parameters
/// - `type_name`: rendered path of the label type, e.g. `demo::tests::bar::Here`.
/// - `module_path`: the declaring module, e.g. `demo::tests`, if known.
///
/// ## Returns
/// - (`&str`): a sub-slice of `type_name` naming the innermost enclosing function.
///
/// ## Notes
/// - Anonymous scopes (`{{closure}}`, `{{constant}}`, ...) between the label and its function are skipped, so a
///   label created inside a closure or an `async fn` body still names the surrounding function.
pub fn resolve_method_name<'a>(type_name: &'a str, module_path: Option<&str>) -> Result<&'a str, LabelErrorReason> {
    let mut segments = split_path(type_name);

    // The label's own segment never names the method.
    segments.pop();
    while segments.last().is_some_and(|s| is_anonymous(s)) {
        segments.pop();
    }
    if segments.is_empty() {
        return Err(LabelErrorReason::Empty);
    }

    let owner_len = match module_path {
        Some(module_path) => owner_prefix_len(&segments, module_path)?,
        // Without a module path, at least the crate root must precede the function.
        None => 1,
    };
    if segments.len() <= owner_len {
        return Err(LabelErrorReason::ModuleLevel);
    }

    let candidate = segments[segments.len() - 1];
    if candidate.starts_with('<') {
        return Err(LabelErrorReason::NotAnIdentifier);
    }
    let name = strip_generics(candidate);
    let name = name.strip_prefix("r#").unwrap_or(name);
    if !is_identifier(name) {
        return Err(LabelErrorReason::NotAnIdentifier);
    }
    Ok(name)
}

/// Number of leading segments that name the declaring module (or the qualified `<T as Trait>` owner).
fn owner_prefix_len(segments: &[&str], module_path: &str) -> Result<usize, LabelErrorReason> {
    let first = segments[0];
    if first.starts_with('<') {
        // `<my::Type as my::Trait>::method::Label`: the impl lives in the module of the type or the trait.
        return if first.contains(module_path) {
            Ok(1)
        } else {
            Err(LabelErrorReason::ForeignType)
        };
    }

    let module: Vec<&str> = split_path(module_path);
    if segments.len() < module.len() || segments[..module.len()] != module[..] {
        return Err(LabelErrorReason::ForeignType);
    }
    Ok(module.len())
}

fn is_anonymous(segment: &str) -> bool {
    segment.starts_with('{')
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODULE: &str = "demo::tests";

    fn resolve(type_name: &str) -> Result<&str, LabelErrorReason> {
        resolve_method_name(type_name, Some(MODULE))
    }

    // ========================================
    // Successful resolution
    // ========================================

    #[test]
    fn test_free_function() {
        assert_eq!(resolve("demo::tests::bar::__testout_method_label"), Ok("bar"));
    }

    #[test]
    fn test_inherent_method() {
        assert_eq!(resolve("demo::tests::FooTest::bar::Here"), Ok("bar"));
    }

    #[test]
    fn test_generic_self_type() {
        assert_eq!(
            resolve("demo::tests::Wrapper<alloc::vec::Vec<u8>>::bar::Here"),
            Ok("bar")
        );
    }

    #[test]
    fn test_trait_method() {
        assert_eq!(
            resolve("<demo::tests::FooTest as demo::tests::Check>::bar::Here"),
            Ok("bar")
        );
    }

    #[test]
    fn test_impl_outside_self_module() {
        assert_eq!(
            resolve_method_name("demo::other::<impl demo::tests::FooTest>::bar::Here", Some("demo::other")),
            Ok("bar")
        );
    }

    #[test]
    fn test_closure_label() {
        assert_eq!(resolve("demo::tests::bar::{{closure}}"), Ok("bar"));
    }

    #[test]
    fn test_label_inside_closures() {
        assert_eq!(
            resolve("demo::tests::bar::{{closure}}::{{closure}}::__testout_method_label"),
            Ok("bar")
        );
    }

    #[test]
    fn test_nested_function_names_innermost() {
        assert_eq!(resolve("demo::tests::bar::helper::Here"), Ok("helper"));
    }

    #[test]
    fn test_raw_identifier() {
        assert_eq!(resolve("demo::tests::r#match::Here"), Ok("match"));
    }

    #[test]
    fn test_without_module_path() {
        assert_eq!(resolve_method_name("demo::bar::Here", None), Ok("bar"));
    }

    // ========================================
    // Rejected labels
    // ========================================

    #[test]
    fn test_primitive_is_empty() {
        assert_eq!(resolve("i32"), Err(LabelErrorReason::Empty));
        assert_eq!(resolve(""), Err(LabelErrorReason::Empty));
    }

    #[test]
    fn test_module_level_type() {
        assert_eq!(resolve("demo::tests::Here"), Err(LabelErrorReason::ModuleLevel));
    }

    #[test]
    fn test_module_level_constant() {
        assert_eq!(
            resolve("demo::tests::{{constant}}::Here"),
            Err(LabelErrorReason::ModuleLevel)
        );
    }

    #[test]
    fn test_foreign_type() {
        assert_eq!(resolve("alloc::string::String"), Err(LabelErrorReason::ForeignType));
    }

    #[test]
    fn test_foreign_qualified_type() {
        assert_eq!(
            resolve("<other::Foo as other::Check>::bar::Here"),
            Err(LabelErrorReason::ForeignType)
        );
    }

    #[test]
    fn test_crate_root_without_module_path() {
        assert_eq!(resolve_method_name("demo::Here", None), Err(LabelErrorReason::ModuleLevel));
    }

    #[test]
    fn test_qualified_segment_is_not_a_method() {
        assert_eq!(
            resolve_method_name("<demo::Foo as demo::Check>::Here", Some("demo")),
            Err(LabelErrorReason::ModuleLevel)
        );
    }

    // ========================================
    // MethodLabel / MethodName
    // ========================================

    #[test]
    fn test_label_resolves_to_method_name() {
        let label = MethodLabel::new("demo::tests::bar::Here", MODULE);
        let name = label.resolve().unwrap();
        assert_eq!(name, "bar");
        assert_eq!(name.to_string(), "bar");
    }

    #[test]
    fn test_label_error_message() {
        let err = MethodLabel::new("demo::tests::Here", MODULE).resolve().unwrap_err();
        assert_eq!(err.reason, LabelErrorReason::ModuleLevel);
        assert!(err.to_string().contains("demo::tests::Here"));
        assert!(err.to_string().contains("module level"));
    }

    #[test]
    fn test_of_val_with_local_type() {
        struct Here;
        let label = MethodLabel::of_val(&Here, module_path!());
        assert_eq!(label.resolve().unwrap(), "test_of_val_with_local_type");
    }

    #[test]
    fn test_of_val_with_module_level_type() {
        let label = MethodLabel::of_val(&ModuleLevel, module_path!());
        assert_eq!(label.resolve().unwrap_err().reason, LabelErrorReason::ModuleLevel);
    }

    struct ModuleLevel;
}
