//! Property-based tests using proptest.
//!
//! These tests verify invariants that should hold for all inputs,
//! helping discover edge cases that manual tests might miss.

use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use pan_validator::{
    classify, classify::classify_iin, generate::generate_pan_deterministic, luhn, parse_pan,
    parse_pan_components, ErrorKind, Pan, PanError, Product,
};

// =============================================================================
// STRATEGIES
// =============================================================================

/// Generates a random digit string of a given length.
fn digit_string(len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(prop::char::range('0', '9'), len)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Generates a random digit string of a length within range.
fn digit_string_range(range: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = String> {
    range.prop_flat_map(digit_string)
}

/// Generates a valid PAN of 8 to 19 digits by appending the Luhn check digit.
fn valid_pan_strategy() -> impl Strategy<Value = String> {
    digit_string_range(7..=18).prop_map(|base| {
        let check = luhn::check_digit_str(&base).unwrap();
        format!("{}{}", base, check)
    })
}

fn product_strategy() -> impl Strategy<Value = Product> {
    prop::sample::select(Product::ALL.to_vec())
}

fn hash_of(pan: &Pan) -> u64 {
    let mut hasher = DefaultHasher::new();
    pan.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// LUHN PROPERTIES
// =============================================================================

proptest! {
    /// Property: Appending the check digit always yields a Luhn-valid number.
    #[test]
    fn check_digit_makes_valid(base in digit_string_range(1..=18)) {
        let mut digits: Vec<u8> = base.bytes().map(|b| b - b'0').collect();
        digits.push(luhn::check_digit(&digits));
        prop_assert!(luhn::validate(&digits));
    }

    /// Property: Any other final digit fails Luhn.
    #[test]
    fn wrong_check_digit_fails(base in digit_string_range(1..=18), delta in 1u8..=9u8) {
        let mut digits: Vec<u8> = base.bytes().map(|b| b - b'0').collect();
        let check = luhn::check_digit(&digits);
        digits.push((check + delta) % 10);
        prop_assert!(!luhn::validate(&digits));
    }

    /// Property: All zeros passes Luhn (sum = 0).
    #[test]
    fn all_zeros_passes_luhn(len in 1usize..=19usize) {
        prop_assert!(luhn::validate(&vec![0; len]));
    }
}

// =============================================================================
// PARSING PROPERTIES
// =============================================================================

proptest! {
    /// Property: The canonical string of a parsed PAN is the input.
    #[test]
    fn canonical_string_round_trips(text in valid_pan_strategy()) {
        let pan = parse_pan(&text).unwrap();
        prop_assert_eq!(pan.canonical_string(), text.clone());
        prop_assert_eq!(pan.length(), text.len());
        prop_assert_eq!(pan.value(), text.parse::<u64>().unwrap());
    }

    /// Property: Derived fields agree with the digits they come from.
    #[test]
    fn derived_fields_match_digits(text in valid_pan_strategy()) {
        let pan = parse_pan(&text).unwrap();
        prop_assert_eq!(pan.issuer_identifier_string(), &text[..6]);
        prop_assert_eq!(u32::from(pan.major_industry_identifier()), text[..1].parse::<u32>().unwrap());
        prop_assert_eq!(pan.account_identifier_string(), &text[6..text.len() - 1]);
        prop_assert_eq!(pan.check_digit_char(), text.chars().last().unwrap());
    }

    /// Property: Changing the last digit of a valid PAN is a checksum mismatch.
    #[test]
    fn mutated_check_digit_is_rejected(text in valid_pan_strategy(), delta in 1u8..=9u8) {
        let actual = text.as_bytes()[text.len() - 1] - b'0';
        let wrong = (actual + delta) % 10;
        let mutated = format!("{}{}", &text[..text.len() - 1], wrong);

        prop_assert_eq!(
            parse_pan(&mutated),
            Err(PanError::ChecksumMismatch { expected: actual, actual: wrong })
        );
    }

    /// Property: Parsing by components agrees with parsing the whole string.
    #[test]
    fn components_agree_with_parse(text in valid_pan_strategy()) {
        let check = text.chars().last().unwrap();
        let from_components =
            parse_pan_components(&text[..6], &text[6..text.len() - 1], check).unwrap();
        let parsed = parse_pan(&text).unwrap();
        prop_assert_eq!(from_components.canonical_string(), parsed.canonical_string());
    }

    /// Property: Lengths outside 8..=19 are always rejected by length.
    #[test]
    fn out_of_range_lengths_are_rejected(
        text in prop_oneof![digit_string_range(1..=7), digit_string_range(20..=30)]
    ) {
        prop_assert_eq!(parse_pan(&text).unwrap_err().kind(), ErrorKind::InvalidLength);
    }

    /// Property: Parsing never panics on any input.
    #[test]
    fn parse_never_panics(input in ".*") {
        let _ = parse_pan(&input);
        let _ = Pan::parse_formatted(&input);
    }

    /// Property: Masked output never contains the full number.
    #[test]
    fn masked_output_hides_the_number(text in valid_pan_strategy()) {
        let pan = parse_pan(&text).unwrap();
        prop_assert!(!pan.masked().contains(&text));
        let debug = format!("{:?}", pan);
        prop_assert!(!debug.contains(&text));
    }
}

// =============================================================================
// IDENTITY PROPERTIES
// =============================================================================

proptest! {
    /// Property: Zero-padding the account identifier keeps equality and hash.
    #[test]
    fn padded_account_is_equal(
        iin in digit_string(6),
        account in digit_string_range(1..=6),
        padding in 1usize..=6usize,
    ) {
        let padded = format!("{}{}", "0".repeat(padding), account);
        let short_check = luhn::check_digit_str(&format!("{}{}", iin, account)).unwrap();
        let long_check = luhn::check_digit_str(&format!("{}{}", iin, padded)).unwrap();

        let short = parse_pan_components(&iin, &account, char::from(b'0' + short_check)).unwrap();
        let long = parse_pan_components(&iin, &padded, char::from(b'0' + long_check)).unwrap();

        prop_assert_eq!(&short, &long);
        prop_assert_eq!(hash_of(&short), hash_of(&long));
        prop_assert_eq!(short.account_identifier_width() + padding, long.account_identifier_width());
    }

    /// Property: cmp_value agrees with comparing the numeric values.
    #[test]
    fn cmp_value_matches_value_order(a in valid_pan_strategy(), b in valid_pan_strategy()) {
        let a = parse_pan(&a).unwrap();
        let b = parse_pan(&b).unwrap();
        prop_assert_eq!(a.cmp_value(&b), a.value().cmp(&b.value()));
        prop_assert_eq!(a.cmp_value(&b), b.cmp_value(&a).reverse());
    }
}

// =============================================================================
// CLASSIFICATION PROPERTIES
// =============================================================================

proptest! {
    /// Property: Classification is deterministic.
    #[test]
    fn classify_is_deterministic(text in valid_pan_strategy()) {
        let pan = parse_pan(&text).unwrap();
        prop_assert_eq!(classify(&pan), classify(&pan));
    }

    /// Property: Classification only depends on the issuer identifier.
    #[test]
    fn classify_depends_only_on_iin(text in valid_pan_strategy()) {
        let pan = parse_pan(&text).unwrap();
        prop_assert_eq!(classify(&pan), classify_iin(pan.issuer_identifier()));
    }

    /// Property: MII 4 is always Visa or UK Maestro.
    #[test]
    fn mii_four_is_visa_or_maestro(iin in 400000u32..=499999u32) {
        let product = classify_iin(iin);
        prop_assert!(matches!(product, Some(Product::Visa) | Some(Product::Maestro)));
    }

    /// Property: Deterministic generation classifies back to its product.
    #[test]
    fn generated_pans_classify_back(product in product_strategy()) {
        let text = generate_pan_deterministic(product);
        let pan = parse_pan(&text).unwrap();
        prop_assert_eq!(classify(&pan), Some(product));
        prop_assert!(product.is_valid_length(pan.length()));
    }
}
