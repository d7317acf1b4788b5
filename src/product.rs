//! Card products recognized by the classifier.
//!
//! Each product carries the total PAN lengths it issues. The classifier never
//! looks at these; cross-checking a PAN's length is left to the caller (or to
//! [`classify_checked`](crate::classify::classify_checked)).

use std::fmt;
use std::str::FromStr;

/// Common card products identified from the Issuer Identification Number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Product {
    /// American Express - length 15
    AmericanExpress,
    /// Discover - length 16
    Discover,
    /// JCB - length 16
    Jcb,
    /// MasterCard - length 16
    Mastercard,
    /// MasterCard Maestro debit, including 18 and 19-digit UK Maestro - lengths 16, 18, 19
    Maestro,
    /// Solo debit card of Switch - lengths 16, 18, 19
    Solo,
    /// Visa - length 16
    Visa,
}

impl Product {
    /// Every product, in declaration order.
    pub const ALL: [Product; 7] = [
        Self::AmericanExpress,
        Self::Discover,
        Self::Jcb,
        Self::Mastercard,
        Self::Maestro,
        Self::Solo,
        Self::Visa,
    ];

    /// Returns the valid PAN lengths for this product.
    #[inline]
    pub const fn pan_lengths(&self) -> &'static [u8] {
        match self {
            Self::AmericanExpress => &[15],
            Self::Discover | Self::Jcb | Self::Mastercard | Self::Visa => &[16],
            Self::Maestro | Self::Solo => &[16, 18, 19],
        }
    }

    /// Returns true if the given total PAN length is valid for this product.
    #[inline]
    pub const fn is_valid_length(&self, length: usize) -> bool {
        let valid = self.pan_lengths();
        let mut i = 0;
        while i < valid.len() {
            if valid[i] as usize == length {
                return true;
            }
            i += 1;
        }
        false
    }

    /// Returns a human-readable name for the product.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AmericanExpress => "American Express",
            Self::Discover => "Discover",
            Self::Jcb => "JCB",
            Self::Mastercard => "MasterCard",
            Self::Maestro => "Maestro",
            Self::Solo => "Solo",
            Self::Visa => "Visa",
        }
    }

    /// Returns a short lowercase identifier, suitable for CLI flags and URLs.
    #[inline]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::AmericanExpress => "amex",
            Self::Discover => "discover",
            Self::Jcb => "jcb",
            Self::Mastercard => "mastercard",
            Self::Maestro => "maestro",
            Self::Solo => "solo",
            Self::Visa => "visa",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a product name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProduct(pub String);

impl fmt::Display for UnknownProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown product '{}'", self.0)
    }
}

impl std::error::Error for UnknownProduct {}

impl FromStr for Product {
    type Err = UnknownProduct;

    /// Accepts either the slug or the display name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.slug().eq_ignore_ascii_case(wanted) || p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownProduct(s.to_string()))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Product {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Product {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_valid_lengths() {
        assert!(Product::AmericanExpress.is_valid_length(15));
        assert!(!Product::AmericanExpress.is_valid_length(16));

        for product in [Product::Discover, Product::Jcb, Product::Mastercard, Product::Visa] {
            assert!(product.is_valid_length(16));
            assert!(!product.is_valid_length(15));
            assert!(!product.is_valid_length(19));
        }

        for product in [Product::Maestro, Product::Solo] {
            assert!(product.is_valid_length(16));
            assert!(!product.is_valid_length(17));
            assert!(product.is_valid_length(18));
            assert!(product.is_valid_length(19));
        }
    }

    #[test]
    fn test_product_names() {
        assert_eq!(Product::AmericanExpress.name(), "American Express");
        assert_eq!(Product::Mastercard.to_string(), "MasterCard");
        assert_eq!(Product::Jcb.slug(), "jcb");
    }

    #[test]
    fn test_product_from_str() {
        assert_eq!("visa".parse::<Product>(), Ok(Product::Visa));
        assert_eq!("AMEX".parse::<Product>(), Ok(Product::AmericanExpress));
        assert_eq!("American Express".parse::<Product>(), Ok(Product::AmericanExpress));
        assert_eq!(
            "diners".parse::<Product>(),
            Err(UnknownProduct("diners".to_string()))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_slug() {
        assert_eq!(
            serde_json::to_string(&Product::AmericanExpress).unwrap(),
            "\"amex\""
        );
        let product: Product = serde_json::from_str("\"solo\"").unwrap();
        assert_eq!(product, Product::Solo);
    }

    #[test]
    fn test_slug_round_trip() {
        for product in Product::ALL {
            assert_eq!(product.slug().parse::<Product>(), Ok(product));
        }
    }
}
