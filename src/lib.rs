//! # pan_validator
//!
//! Primary Account Number (PAN) parsing and validation per ISO/IEC 7812-1,
//! with product classification from the Issuer Identification Number.
//!
//! ## Features
//!
//! - Strict PAN parsing into issuer identifier, account identifier and check digit
//! - Luhn check digit computation and verification
//! - Product classification from a priority-ordered IIN range table
//! - PAN masking for display
//! - Batch and streaming parsing
//! - Multiple interfaces: library, CLI, REST API
//!
//! ## Quick Start
//!
//! ```rust
//! use pan_validator::{classify, parse_pan, Product};
//!
//! let pan = parse_pan("4000000000000002").unwrap();
//! assert_eq!(pan.issuer_identifier(), 400000);
//! assert_eq!(pan.major_industry_identifier(), 4);
//! assert_eq!(pan.check_digit(), 2);
//! assert_eq!(pan.canonical_string(), "4000000000000002");
//!
//! // Safe for logging - never exposes the full number
//! println!("PAN: {}", pan); // "****-****-****-0002"
//!
//! assert_eq!(classify(&pan), Some(Product::Visa));
//! ```
//!
//! ## Components
//!
//! ```rust
//! use pan_validator::{parse_pan_components, Component, PanError};
//!
//! let pan = parse_pan_components("601100", "000000000", '4').unwrap();
//! assert_eq!(pan.canonical_string(), "6011000000000004");
//!
//! let err = parse_pan_components("6011", "000000000", '4').unwrap_err();
//! assert_eq!(err.component(), Some(Component::IssuerIdentifier));
//! ```
//!
//! ## Product Length Cross-Check
//!
//! Classification only looks at the IIN. Checking the PAN length against
//! the product is up to the caller:
//!
//! ```rust
//! use pan_validator::{classify, parse_pan};
//!
//! let pan = parse_pan("378282246310005").unwrap();
//! let product = classify(&pan).unwrap();
//! assert!(product.is_valid_length(pan.length()));
//! ```
//!
//! ## Batch Processing
//!
//! ```rust
//! use pan_validator::{BatchParser, batch};
//!
//! let batch_parser = BatchParser::new();
//! let inputs = vec!["4000000000000002", "6011000000000004", "invalid"];
//!
//! let results = batch_parser.parse_all(&inputs);
//! assert_eq!(results.len(), 3);
//!
//! let valid = batch_parser.parse_valid_only(&inputs);
//! assert_eq!(valid.len(), 2);
//!
//! let (valid_count, _) = batch::count_valid(&inputs);
//! assert_eq!(valid_count, 2);
//! ```
//!
//! ## Supported Products
//!
//! | Product | IIN ranges | Length |
//! |---------|------------|--------|
//! | JCB | 352800-358999 | 16 |
//! | American Express | 370000-379999 | 15 |
//! | Visa | 400000-499999 (except UK Maestro) | 16 |
//! | MasterCard | 510000-559999 | 16 |
//! | Discover | 601100-601199 | 16 |
//! | Solo | 633450-633498 (several ranges), 676700-676799 | 16, 18, 19 |
//! | Maestro | 490303, 493698-493699, 500000-509999, 560000-589999, 600000-699999 | 16, 18, 19 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | `Serialize`/`Deserialize` for `Pan` and `Product` |
//! | `generate` | Random test PAN generation |
//! | `parallel` | Rayon-based parallelism |
//! | `cli` | Command-line tool |
//! | `server` | REST API with Swagger UI |
//!
//! ## Security
//!
//! - `Debug` and `Display` show masked numbers only
//! - Numeric fields of a `Pan` are zeroed on drop
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod batch;
pub mod classify;
pub mod error;
pub mod generate;
pub mod luhn;
pub mod mask;
pub mod pan;
pub mod product;
pub mod stream;

// Re-export main types at crate root
pub use batch::BatchParser;
pub use classify::{classify, classify_checked};
pub use error::{Component, ErrorKind, PanError};
pub use pan::{
    parse_pan, parse_pan_components, Pan, ISSUER_IDENTIFIER_LENGTH,
    MAX_ACCOUNT_IDENTIFIER_LENGTH, MAX_PAN_LENGTH, MIN_PAN_LENGTH,
};
pub use product::Product;

#[cfg(test)]
mod tests {
    use super::*;

    const VISA: &str = "4000000000000002";
    const DISCOVER: &str = "6011000000000004";
    const SOLO: &str = "6334500000000003";
    const AMEX: &str = "378282246310005";

    #[test]
    fn test_visa() {
        let pan = parse_pan(VISA).unwrap();
        assert_eq!(pan.issuer_identifier(), 400000);
        assert_eq!(classify(&pan), Some(Product::Visa));
    }

    #[test]
    fn test_discover_before_catch_all() {
        let pan = parse_pan(DISCOVER).unwrap();
        assert_eq!(pan.issuer_identifier(), 601100);
        assert_eq!(classify(&pan), Some(Product::Discover));
    }

    #[test]
    fn test_solo_before_catch_all() {
        let pan = parse_pan(SOLO).unwrap();
        assert_eq!(pan.issuer_identifier(), 633450);
        assert_eq!(classify(&pan), Some(Product::Solo));
    }

    #[test]
    fn test_amex() {
        let pan = parse_pan(AMEX).unwrap();
        assert_eq!(classify(&pan), Some(Product::AmericanExpress));
        assert_eq!(pan.length(), 15);
    }

    #[test]
    fn test_luhn_reference_vector() {
        assert_eq!(luhn::check_digit(&[7, 9, 9, 2, 7, 3, 9, 8, 7, 1]), 3);
    }

    #[test]
    fn test_checksum_mismatch_kind() {
        let err = parse_pan("4000000000000009").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ChecksumMismatch);
    }

    #[test]
    fn test_masking() {
        let pan = parse_pan(VISA).unwrap();
        let masked = pan.masked();
        assert!(!masked.contains(VISA));
        assert!(masked.ends_with("0002"));
        assert!(masked.contains('*'));
    }

    #[test]
    fn test_thread_safety() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pan>();
        assert_send_sync::<PanError>();
        assert_send_sync::<Product>();
        assert_send_sync::<BatchParser>();
    }
}
