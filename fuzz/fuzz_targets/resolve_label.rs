#![no_main]

use libfuzzer_sys::fuzz_target;
use testout_core::label::resolve_method_name;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // First line is the module path, the rest the rendered type path
        let (module_path, type_name) = s.split_once('\n').unwrap_or(("", s));
        let _ = resolve_method_name(type_name, None);
        if let Ok(name) = resolve_method_name(type_name, Some(module_path)) {
            assert!(type_name.contains(name));
        }
    }
});
