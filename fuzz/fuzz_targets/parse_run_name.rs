#![no_main]

use libfuzzer_sys::fuzz_target;
use testout_core::RunPattern;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for width in 1..=4 {
            let Ok(pattern) = RunPattern::new("RUN-", width, ".log") else {
                continue;
            };
            // Anything that parses must render back to the same name
            if let Some(counter) = pattern.parse(s) {
                assert_eq!(pattern.file_name(counter), s);
            }
        }
    }
});
