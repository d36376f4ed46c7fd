//! Splitting of compiler-rendered type paths.

/// Split a rendered type path on `::`, ignoring separators nested inside `<..>`, `(..)` or `[..]`.
///
/// `demo::Wrapper<alloc::string::String>::run` yields `["demo", "Wrapper<alloc::string::String>", "run"]`.
/// The `>` of a `->` arrow does not close a bracket. Unbalanced input never panics; it just nests less.
pub(crate) fn split_path(path: &str) -> Vec<&str> {
    let bytes = path.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' | b'(' | b'[' => depth += 1,
            b'>' if i > 0 && bytes[i - 1] == b'-' => {}
            b'>' | b')' | b']' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&path[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    segments.push(&path[start..]);
    segments
}

/// Cut generic arguments off a single path segment (`Wrapper<T>` -> `Wrapper`).
pub(crate) fn strip_generics(segment: &str) -> &str {
    match segment.find('<') {
        Some(0) | None => segment,
        Some(idx) => &segment[..idx],
    }
}
