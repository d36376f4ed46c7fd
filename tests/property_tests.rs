//! Property-based tests for run naming, allocation and label resolution.
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use std::collections::BTreeSet;
use std::fs;

use proptest::prelude::*;
use tempfile::TempDir;
use testout::{Error, RunPathGenerator, RunPattern};
use testout_core::label::resolve_method_name;

// =============================================================================
// Run-name Properties
// =============================================================================

#[cfg(test)]
mod run_name_tests {
    use super::*;

    proptest! {
        /// Property: every counter a pattern renders parses back to itself
        #[test]
        fn file_name_parses_back(
            prefix in "[A-Za-z_-]{0,8}",
            suffix in "(\\.[a-z]{1,4})?",
            width in 1u32..=6,
            seed in any::<u64>(),
        ) {
            let pattern = RunPattern::new(prefix, width, suffix).unwrap();
            let counter = 1 + seed % pattern.max_counter();
            let name = pattern.file_name(counter);
            prop_assert_eq!(pattern.parse(&name), Some(counter));
        }

        /// Property: rendered names have a fixed length, so they sort in counter order
        #[test]
        fn names_sort_like_counters(width in 1u32..=6, a in any::<u64>(), b in any::<u64>()) {
            let pattern = RunPattern::new("RUN-", width, "").unwrap();
            let (a, b) = (1 + a % pattern.max_counter(), 1 + b % pattern.max_counter());
            prop_assert_eq!(a.cmp(&b), pattern.file_name(a).cmp(&pattern.file_name(b)));
        }

        /// Property: a counter of another width is never recognised
        #[test]
        fn other_widths_do_not_parse(width in 1u32..=5, counter in 1u64..=9) {
            let narrow = RunPattern::new("RUN-", width, "").unwrap();
            let wide = RunPattern::new("RUN-", width + 1, "").unwrap();
            prop_assert_eq!(narrow.parse(&wide.file_name(counter)), None);
        }
    }
}

// =============================================================================
// Allocation Properties
// =============================================================================

#[cfg(test)]
mod allocation_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: allocation returns the smallest free counter, or fails only when none is free
        #[test]
        fn allocation_picks_smallest_free(occupied in prop::collection::btree_set(1u64..=9, 0..=9)) {
            let tmp = TempDir::new().unwrap();
            let generator = RunPathGenerator::new(tmp.path(), RunPattern::new("r", 1, "").unwrap());
            for &counter in &occupied {
                fs::create_dir(generator.path_for(counter)).unwrap();
            }

            let smallest_free = (1..=9).find(|n| !occupied.contains(n));
            match (generator.next_path(), smallest_free) {
                (Ok(path), Some(n)) => {
                    prop_assert_eq!(path, generator.path_for(n));
                }
                (Err(Error::ExhaustedCounter { max, .. }), None) => {
                    prop_assert_eq!(max, 9);
                }
                (result, expected) => {
                    prop_assert!(false, "got {:?}, expected counter {:?}", result, expected);
                }
            }
        }

        /// Property: listing finds exactly the occupied counters
        #[test]
        fn existing_runs_match_occupied(occupied in prop::collection::btree_set(1u64..=99, 0..20)) {
            let tmp = TempDir::new().unwrap();
            let generator = RunPathGenerator::new(tmp.path(), RunPattern::default());
            for &counter in &occupied {
                fs::write(generator.path_for(counter), "").unwrap();
            }

            let listed: BTreeSet<u64> = generator.existing_runs().unwrap().into_iter().map(|r| r.counter).collect();
            prop_assert_eq!(listed, occupied);
        }
    }
}

// =============================================================================
// Label Properties
// =============================================================================

#[cfg(test)]
mod label_tests {
    use super::*;

    proptest! {
        /// Property: a label nested in any named function resolves to that function
        #[test]
        fn label_in_function_resolves(
            module in prop::collection::vec("[a-z][a-z0-9_]{0,6}", 1..4),
            function in "[a-z_][a-z0-9_]{0,12}",
            closures in 0usize..3,
        ) {
            let module_path = module.join("::");
            let mut type_name = format!("{module_path}::{function}");
            for _ in 0..closures {
                type_name.push_str("::{{closure}}");
            }
            type_name.push_str("::__testout_method_label");

            prop_assert_eq!(resolve_method_name(&type_name, Some(&module_path)), Ok(function.as_str()));
        }

        /// Property: a type directly inside the calling module never resolves
        #[test]
        fn module_level_never_resolves(module in prop::collection::vec("[a-z][a-z0-9_]{0,6}", 1..4)) {
            let module_path = module.join("::");
            let type_name = format!("{module_path}::Label");
            prop_assert!(resolve_method_name(&type_name, Some(&module_path)).is_err());
        }
    }
}
