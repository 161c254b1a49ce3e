#![no_main]

use hourglass::filter::{DomainSelector, PatternSet};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsed patterns are never empty and never carry surrounding whitespace
        let set = PatternSet::parse(input);
        for pattern in set.as_slice() {
            assert!(!pattern.is_empty());
            assert_eq!(pattern.trim(), pattern);
        }
        let _: DomainSelector = input.parse().unwrap_or_default();
    }
});
