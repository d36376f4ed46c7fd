//! Derive macros for `testout`.
//!
//! - `TestClass`: implements `testout::TestClass`, naming the directory a test fixture writes its output under.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, LitStr};

/// Implements `testout::TestClass` for a fixture type.
///
/// The class name defaults to the type's identifier and can be overridden with `#[test_class(name = "...")]`.
///
/// # Example
/// ```ignore
/// #[derive(TestClass)]
/// struct ArchiveTest;
///
/// #[derive(TestClass)]
/// #[test_class(name = "archive-v2")]
/// struct ArchiveV2Test;
///
/// // Generates:
/// impl testout::TestClass for ArchiveTest {
///     const NAME: &'static str = "ArchiveTest";
/// }
/// impl testout::TestClass for ArchiveV2Test {
///     const NAME: &'static str = "archive-v2";
/// }
/// ```
#[proc_macro_derive(TestClass, attributes(test_class))]
pub fn derive_test_class(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_test_class(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand_test_class(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let class_name = class_name_override(input)?.unwrap_or_else(|| LitStr::new(&name.to_string(), Span::call_site()));
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::testout::TestClass for #name #ty_generics #where_clause {
            const NAME: &'static str = #class_name;
        }
    })
}

/// Read `#[test_class(name = "...")]`, rejecting names that cannot be a single directory component.
fn class_name_override(input: &DeriveInput) -> syn::Result<Option<LitStr>> {
    let mut name = None;

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("test_class")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                let value = lit.value();
                if value.is_empty() || value == "." || value == ".." || value.contains(['/', '\\', '\0']) {
                    return Err(syn::Error::new(
                        lit.span(),
                        "test class name must be a single, non-empty path component",
                    ));
                }
                name = Some(lit);
                Ok(())
            } else {
                Err(meta.error("unsupported test_class attribute; expected `name = \"...\"`"))
            }
        })?;
    }

    Ok(name)
}
