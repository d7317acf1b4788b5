//! PCI-DSS compliant masking of PANs.
//!
//! PCI-DSS allows displaying:
//! - First 6 digits (the IIN) and last 4 digits
//! - Only the last 4 digits (preferred for customer-facing display)
//!
//! Never display or log the full number.

use crate::Pan;

/// Masks a PAN showing only the last 4 digits.
///
/// Format: `****-****-****-0002`
///
/// # Example
///
/// ```
/// use pan_validator::parse_pan;
///
/// let pan = parse_pan("4000000000000002").unwrap();
/// assert_eq!(pan.masked(), "****-****-****-0002");
/// ```
pub fn mask_pan(pan: &Pan) -> String {
    let number = pan.canonical_string();
    let len = number.len();
    let masked_count = len.saturating_sub(4);

    let mut result = String::with_capacity(len + (len / 4));
    for i in 0..masked_count {
        if i > 0 && i % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }

    if masked_count > 0 && masked_count % 4 == 0 {
        result.push('-');
    }

    result.push_str(&number[masked_count..]);
    result
}

/// Masks a PAN showing the IIN (first 6) and last 4 digits.
///
/// Format: `400000******0002`. PANs of 10 digits or fewer would be fully
/// exposed this way, so they fall back to [`mask_pan`].
///
/// ```
/// use pan_validator::parse_pan;
///
/// let pan = parse_pan("6011000000000004").unwrap();
/// assert_eq!(pan.masked_with_iin(), "601100******0004");
/// ```
pub fn mask_with_iin(pan: &Pan) -> String {
    let number = pan.canonical_string();
    let len = number.len();

    if len <= 10 {
        return mask_pan(pan);
    }

    let mut result = String::with_capacity(len);
    result.push_str(&number[..6]);
    result.extend(std::iter::repeat('*').take(len - 10));
    result.push_str(&number[len - 4..]);
    result
}

/// Masks a raw, unvalidated number string.
///
/// Non-digit characters are dropped before masking.
pub fn mask_string(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    if len <= 4 {
        return "*".repeat(len);
    }

    let masked_count = len - 4;
    let mut result = String::with_capacity(len + (len / 4));
    for i in 0..masked_count {
        if i > 0 && i % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }
    if masked_count % 4 == 0 {
        result.push('-');
    }
    result.extend(&digits[len - 4..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_pan;

    #[test]
    fn test_mask_pan_16_digits() {
        let pan = parse_pan("4000000000000002").unwrap();
        assert_eq!(mask_pan(&pan), "****-****-****-0002");
    }

    #[test]
    fn test_mask_pan_15_digits() {
        let pan = parse_pan("378282246310005").unwrap();
        assert_eq!(mask_pan(&pan), "****-****-***0005");
    }

    #[test]
    fn test_mask_with_iin() {
        let pan = parse_pan("4000000000000002").unwrap();
        assert_eq!(mask_with_iin(&pan), "400000******0002");
    }

    #[test]
    fn test_mask_short_pan() {
        // 11 digits leaves a single digit to mask
        let pan = parse_pan("79927398713").unwrap();
        assert_eq!(mask_with_iin(&pan), "799273*8713");

        // 8 digits falls back to last-four masking
        let pan = parse_pan("40000002").unwrap();
        assert_eq!(mask_with_iin(&pan), "****-0002");
    }

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("4000000000000002"), "****-****-****-0002");
        assert_eq!(mask_string("4000 0000 0000 0002"), "****-****-****-0002");
        assert_eq!(mask_string("123"), "***");
    }
}
