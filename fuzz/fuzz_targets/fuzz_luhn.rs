//! Fuzz target for the Luhn algorithm.
//!
//! Luhn functions must never panic and must agree with each other.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pan_validator::luhn;

fuzz_target!(|data: &[u8]| {
    // Clamp values to valid digit range
    let digits: Vec<u8> = data.iter().map(|&b| b % 10).collect();

    let _ = luhn::validate(&digits);

    if digits.is_empty() || digits.len() > 18 {
        return;
    }

    let check = luhn::check_digit(&digits);
    assert!(check <= 9, "check digit should be 0-9");

    let mut with_check = digits.clone();
    with_check.push(check);
    assert!(luhn::validate(&with_check), "adding the check digit should make it valid");
    assert_eq!(luhn::compute_checksum(&with_check) % 10, 0);

    let text: String = digits.iter().map(|&d| char::from(b'0' + d)).collect();
    assert_eq!(luhn::check_digit_str(&text), Some(check));
});
