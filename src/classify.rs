//! Product classification by Issuer Identification Number range.
//!
//! The range table below is scanned in order and the first range containing
//! the IIN wins. Several ranges overlap on purpose: the UK Maestro ranges sit
//! inside the Visa range, and Discover and Solo sit inside the 6xxxxx Maestro
//! catch-all. Narrow ranges must therefore come before the broad ones they
//! overlap. Do not sort this table.

use crate::error::PanError;
use crate::{Pan, Product};

/// An inclusive range of issuer identifiers assigned to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IinRange {
    /// Lowest IIN in the range.
    pub low: u32,
    /// Highest IIN in the range.
    pub high: u32,
    /// Product for IINs in the range.
    pub product: Product,
}

impl IinRange {
    const fn new(low: u32, high: u32, product: Product) -> Self {
        Self { low, high, product }
    }

    /// Returns true if `iin` lies within the range, bounds included.
    #[inline]
    pub const fn contains(&self, iin: u32) -> bool {
        self.low <= iin && iin <= self.high
    }
}

/// IIN ranges in priority order.
///
/// Sources: Barclaycard "Card Identification and Validation" (January 2006)
/// for JCB, Maestro, MasterCard and Solo; American Express POS guide; Discover
/// card-present guide.
static IIN_RANGES: [IinRange; 18] = [
    IinRange::new(352800, 358999, Product::Jcb),
    IinRange::new(370000, 379999, Product::AmericanExpress),
    // UK Maestro, inside the Visa range
    IinRange::new(490303, 490303, Product::Maestro),
    IinRange::new(493698, 493699, Product::Maestro),
    IinRange::new(400000, 499999, Product::Visa),
    IinRange::new(500000, 509999, Product::Maestro),
    IinRange::new(510000, 559999, Product::Mastercard),
    IinRange::new(560000, 589999, Product::Maestro),
    IinRange::new(601100, 601199, Product::Discover),
    IinRange::new(633450, 633460, Product::Solo),
    IinRange::new(633462, 633472, Product::Solo),
    IinRange::new(633474, 633475, Product::Solo),
    IinRange::new(633477, 633477, Product::Solo),
    IinRange::new(633479, 633480, Product::Solo),
    IinRange::new(633482, 633489, Product::Solo),
    IinRange::new(633498, 633498, Product::Solo),
    IinRange::new(676700, 676799, Product::Solo),
    // Catch-all, overlaps Discover and Solo above
    IinRange::new(600000, 699999, Product::Maestro),
];

/// Returns the IIN range table in priority order.
#[inline]
pub fn ranges() -> &'static [IinRange] {
    &IIN_RANGES
}

/// Determines the product a PAN belongs to.
///
/// # Returns
///
/// `Some(Product)` for the first range containing the PAN's issuer
/// identifier, `None` if no range does. An unknown product is not an error.
///
/// # Example
///
/// ```
/// use pan_validator::{classify, parse_pan, Product};
///
/// let pan = parse_pan("6011000000000004").unwrap();
/// assert_eq!(classify(&pan), Some(Product::Discover));
/// ```
#[inline]
pub fn classify(pan: &Pan) -> Option<Product> {
    classify_iin(pan.issuer_identifier())
}

/// Determines the product for a bare issuer identifier.
///
/// ```
/// use pan_validator::classify::classify_iin;
/// use pan_validator::Product;
///
/// assert_eq!(classify_iin(490303), Some(Product::Maestro));
/// assert_eq!(classify_iin(490304), Some(Product::Visa));
/// assert_eq!(classify_iin(100000), None);
/// ```
pub fn classify_iin(iin: u32) -> Option<Product> {
    IIN_RANGES
        .iter()
        .find(|range| range.contains(iin))
        .map(|range| range.product)
}

/// Classifies a PAN and checks its length against the product's lengths.
///
/// `Ok(None)` means the product is unknown, which is not an error.
///
/// # Errors
///
/// [`PanError::InvalidLengthForProduct`] if the product does not issue PANs
/// of this length.
///
/// ```
/// use pan_validator::classify::classify_checked;
/// use pan_validator::{parse_pan, Product};
///
/// let pan = parse_pan("4000000000000002").unwrap();
/// assert_eq!(classify_checked(&pan), Ok(Some(Product::Visa)));
///
/// // 13-digit Visa numbers are not on the list
/// let pan = parse_pan("4000000000006").unwrap();
/// assert!(classify_checked(&pan).is_err());
/// ```
pub fn classify_checked(pan: &Pan) -> Result<Option<Product>, PanError> {
    match classify(pan) {
        Some(product) if !product.is_valid_length(pan.length()) => {
            Err(PanError::InvalidLengthForProduct {
                product,
                length: pan.length(),
                valid_lengths: product.pan_lengths(),
            })
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::luhn;
    use crate::parse_pan;

    /// Builds a valid 16-digit PAN for the given IIN.
    fn pan_for_iin(iin: u32) -> Pan {
        let base = format!("{:06}000000000", iin);
        let check = luhn::check_digit_str(&base).unwrap();
        parse_pan(&format!("{}{}", base, check)).unwrap()
    }

    #[test]
    fn test_visa_classification() {
        let pan = parse_pan("4000000000000002").unwrap();
        assert_eq!(pan.issuer_identifier(), 400000);
        assert_eq!(classify(&pan), Some(Product::Visa));
        assert_eq!(classify(&pan_for_iin(499999)), Some(Product::Visa));
    }

    #[test]
    fn test_discover_wins_over_maestro_catch_all() {
        let pan = parse_pan("6011000000000004").unwrap();
        assert_eq!(classify(&pan), Some(Product::Discover));
        assert_eq!(classify(&pan_for_iin(601199)), Some(Product::Discover));
        assert_eq!(classify(&pan_for_iin(601200)), Some(Product::Maestro));
    }

    #[test]
    fn test_solo_wins_over_maestro_catch_all() {
        let pan = parse_pan("6334500000000003").unwrap();
        assert_eq!(classify(&pan), Some(Product::Solo));

        for iin in [633450, 633460, 633462, 633475, 633477, 633480, 633489, 633498, 676700] {
            assert_eq!(classify_iin(iin), Some(Product::Solo), "IIN {}", iin);
        }
        // Gaps between Solo ranges fall through to Maestro
        for iin in [633461, 633473, 633476, 633478, 633481, 633490, 633497, 676800] {
            assert_eq!(classify_iin(iin), Some(Product::Maestro), "IIN {}", iin);
        }
    }

    #[test]
    fn test_uk_maestro_inside_visa() {
        assert_eq!(classify_iin(490303), Some(Product::Maestro));
        assert_eq!(classify_iin(490302), Some(Product::Visa));
        assert_eq!(classify_iin(493698), Some(Product::Maestro));
        assert_eq!(classify_iin(493699), Some(Product::Maestro));
        assert_eq!(classify_iin(493700), Some(Product::Visa));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert_eq!(classify_iin(352800), Some(Product::Jcb));
        assert_eq!(classify_iin(358999), Some(Product::Jcb));
        assert_eq!(classify_iin(352799), None);
        assert_eq!(classify_iin(359000), None);

        assert_eq!(classify_iin(370000), Some(Product::AmericanExpress));
        assert_eq!(classify_iin(379999), Some(Product::AmericanExpress));

        assert_eq!(classify_iin(509999), Some(Product::Maestro));
        assert_eq!(classify_iin(510000), Some(Product::Mastercard));
        assert_eq!(classify_iin(559999), Some(Product::Mastercard));
        assert_eq!(classify_iin(560000), Some(Product::Maestro));
        assert_eq!(classify_iin(589999), Some(Product::Maestro));
        assert_eq!(classify_iin(590000), None);
        assert_eq!(classify_iin(699999), Some(Product::Maestro));
    }

    #[test]
    fn test_unknown_product() {
        assert_eq!(classify_iin(0), None);
        assert_eq!(classify_iin(340000), None);
        assert_eq!(classify_iin(700000), None);
        assert_eq!(classify_iin(999999), None);
    }

    #[test]
    fn test_table_order() {
        let table = ranges();
        assert_eq!(table.len(), 18);
        assert_eq!(table[0], IinRange::new(352800, 358999, Product::Jcb));
        assert_eq!(table[17], IinRange::new(600000, 699999, Product::Maestro));

        // Every range that overlaps a later one must be the narrower of the two.
        for (i, earlier) in table.iter().enumerate() {
            for later in &table[i + 1..] {
                let overlaps = earlier.low <= later.high && later.low <= earlier.high;
                if overlaps {
                    assert!(earlier.high - earlier.low < later.high - later.low);
                }
            }
        }
    }

    #[test]
    fn test_classify_checked() {
        let pan = pan_for_iin(370000);
        assert_eq!(pan.length(), 16);
        assert_eq!(
            classify_checked(&pan),
            Err(PanError::InvalidLengthForProduct {
                product: Product::AmericanExpress,
                length: 16,
                valid_lengths: &[15],
            })
        );

        let amex = parse_pan("378282246310005").unwrap();
        assert_eq!(classify_checked(&amex), Ok(Some(Product::AmericanExpress)));

        let unknown = pan_for_iin(100000);
        assert_eq!(classify_checked(&unknown), Ok(None));
    }

    #[test]
    fn test_table_is_shareable() {
        fn assert_sync<T: Sync>(_: &T) {}
        assert_sync(&IIN_RANGES);
    }
}
