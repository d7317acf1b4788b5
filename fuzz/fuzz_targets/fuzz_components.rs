//! Fuzz target for building a PAN from components.
//!
//! Component parsing must agree with parsing the concatenated string.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pan_validator::{parse_pan, parse_pan_components};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    issuer_identifier: &'a str,
    account_identifier: &'a str,
    check_digit: char,
}

fuzz_target!(|input: Input<'_>| {
    let result = parse_pan_components(
        input.issuer_identifier,
        input.account_identifier,
        input.check_digit,
    );

    if let Ok(pan) = result {
        let text = format!(
            "{}{}{}",
            input.issuer_identifier, input.account_identifier, input.check_digit
        );
        let parsed = parse_pan(&text).expect("components parsed, so the string must too");
        assert_eq!(parsed, pan);
        assert_eq!(parsed.canonical_string(), text);
    }
});
