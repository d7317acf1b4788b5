//! Luhn algorithm implementation for PAN check digits.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is the
//! checksum ISO/IEC 7812-1 prescribes for the last digit of a Primary
//! Account Number.
//!
//! All functions here take digit values (0-9), not ASCII characters. Callers
//! are responsible for rejecting non-digit input first.

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates a complete number, check digit included.
///
/// # Returns
///
/// `true` if the checksum is valid, `false` otherwise (including for empty input).
///
/// # Example
///
/// ```
/// use pan_validator::luhn::validate;
///
/// assert!(validate(&[7, 9, 9, 2, 7, 3, 9, 8, 7, 1, 3]));
/// assert!(!validate(&[7, 9, 9, 2, 7, 3, 9, 8, 7, 1, 4]));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Computes the Luhn sum for a complete number.
///
/// The rightmost digit (the check digit) is position 0 and is not doubled;
/// positions 1, 3, 5, ... are doubled.
///
/// # Returns
///
/// The Luhn sum (not modulo 10).
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 1 {
                u32::from(DOUBLE_TABLE[usize::from(digit)])
            } else {
                u32::from(digit)
            }
        })
        .sum()
}

/// Computes the check digit for a sequence of base digits.
///
/// The base digits are everything except the check digit, i.e. the issuer
/// identifier followed by the account identifier. Once the check digit is
/// appended, every base digit moves one position left, so the rightmost base
/// digit is the first one doubled.
///
/// # Example
///
/// ```
/// use pan_validator::luhn::check_digit;
///
/// assert_eq!(check_digit(&[7, 9, 9, 2, 7, 3, 9, 8, 7, 1]), 3);
/// ```
#[inline]
pub fn check_digit(base_digits: &[u8]) -> u8 {
    let sum: u32 = base_digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 0 {
                u32::from(DOUBLE_TABLE[usize::from(digit)])
            } else {
                u32::from(digit)
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}

/// Computes the check digit for base digits given as an ASCII digit string.
///
/// Returns `None` if the string contains anything other than `0`-`9`.
///
/// ```
/// use pan_validator::luhn::check_digit_str;
///
/// assert_eq!(check_digit_str("7992739871"), Some(3));
/// assert_eq!(check_digit_str("79927x9871"), None);
/// ```
pub fn check_digit_str(base_digits: &str) -> Option<u8> {
    let digits = base_digits
        .bytes()
        .map(|b| b.is_ascii_digit().then(|| b - b'0'))
        .collect::<Option<Vec<u8>>>()?;
    Some(check_digit(&digits))
}
