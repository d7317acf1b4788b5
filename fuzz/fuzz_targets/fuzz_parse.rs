//! Fuzz target for PAN parsing.
//!
//! Parsing must never panic, and anything that parses must round-trip.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pan_validator::{classify, classify_checked, parse_pan, Pan};

fuzz_target!(|data: &str| {
    let _ = Pan::parse_formatted(data);

    if let Ok(pan) = parse_pan(data) {
        assert_eq!(pan.canonical_string(), data);
        assert_eq!(pan.length(), data.len());
        assert!(!pan.masked().contains(data));

        let product = classify(&pan);
        match classify_checked(&pan) {
            Ok(checked) => assert_eq!(checked, product),
            Err(_) => assert!(product.is_some()),
        }
    }
});
