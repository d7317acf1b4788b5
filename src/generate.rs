//! PAN generation for testing purposes.
//!
//! Generated numbers pass the Luhn check and classify back to the product
//! they were generated for. They are not connected to real accounts and are
//! meant for tests only.
//!
//! # Example
//!
//! ```
//! use pan_validator::generate::generate_pan_deterministic;
//! use pan_validator::{classify, parse_pan, Product};
//!
//! let text = generate_pan_deterministic(Product::Solo);
//! let pan = parse_pan(&text).unwrap();
//! assert_eq!(classify(&pan), Some(Product::Solo));
//! ```

use crate::classify::{classify_iin, ranges, IinRange};
use crate::luhn;
use crate::pan::{ISSUER_IDENTIFIER_LENGTH, MAX_PAN_LENGTH};
use crate::Product;

#[cfg(feature = "generate")]
use rand::Rng;

/// Returns the lowest IIN that classifies as `product`.
///
/// ```
/// use pan_validator::generate::representative_iin;
/// use pan_validator::Product;
///
/// assert_eq!(representative_iin(Product::Maestro), 490303);
/// assert_eq!(representative_iin(Product::Discover), 601100);
/// ```
pub fn representative_iin(product: Product) -> u32 {
    owned_ranges(product)
        .find(|range| classify_iin(range.low) == Some(product))
        .map(|range| range.low)
        .unwrap_or_default()
}

/// Ranges in the table assigned to `product`.
fn owned_ranges(product: Product) -> impl Iterator<Item = &'static IinRange> {
    ranges().iter().filter(move |range| range.product == product)
}

/// The shortest length the product issues.
fn default_length(product: Product) -> usize {
    product
        .pan_lengths()
        .first()
        .map_or(16, |&len| usize::from(len))
}

/// Appends the Luhn check digit to `digits` and renders the result.
fn finish(mut digits: Vec<u8>) -> String {
    digits.push(luhn::check_digit(&digits));
    digits.iter().map(|&d| char::from(b'0' + d)).collect()
}

/// Generates a PAN deterministically (no randomness).
///
/// Uses the product's [`representative_iin`], its shortest length, and an
/// all-zero account identifier.
///
/// ```
/// use pan_validator::generate::generate_pan_deterministic;
/// use pan_validator::Product;
///
/// assert_eq!(generate_pan_deterministic(Product::Visa), "4000000000000002");
/// assert_eq!(generate_pan_deterministic(Product::AmericanExpress).len(), 15);
/// ```
pub fn generate_pan_deterministic(product: Product) -> String {
    let prefix = format!("{:06}", representative_iin(product));
    generate_deterministic_with_prefix(&prefix, default_length(product)).unwrap_or_default()
}

/// Generates a PAN deterministically with a custom prefix.
///
/// Fills the middle with zeros and appends the check digit. Returns `None`
/// if the prefix contains non-digits, is shorter than the six-digit IIN, or
/// leaves no room for an account digit and the check digit.
pub fn generate_deterministic_with_prefix(prefix: &str, length: usize) -> Option<String> {
    let mut digits = prefix_digits(prefix, length)?;
    digits.resize(length - 1, 0);
    Some(finish(digits))
}

fn prefix_digits(prefix: &str, length: usize) -> Option<Vec<u8>> {
    if prefix.len() < ISSUER_IDENTIFIER_LENGTH || prefix.len() + 2 > length || length > MAX_PAN_LENGTH
    {
        return None;
    }
    prefix
        .bytes()
        .map(|b| b.is_ascii_digit().then(|| b - b'0'))
        .collect()
}

/// Generates a random PAN for the given product.
///
/// The IIN is drawn from the product's ranges (skipping IINs a narrower
/// range assigns elsewhere) and the length from the product's lengths.
///
/// Requires the `generate` feature.
///
/// ```
/// use pan_validator::generate::generate_pan;
/// use pan_validator::{classify, parse_pan, Product};
///
/// let pan = parse_pan(&generate_pan(Product::Maestro)).unwrap();
/// assert_eq!(classify(&pan), Some(Product::Maestro));
/// ```
#[cfg(feature = "generate")]
pub fn generate_pan(product: Product) -> String {
    generate_pan_with_rng(product, &mut rand::thread_rng())
}

/// Generates a random PAN using a provided RNG.
///
/// Useful for reproducible generation with seeded RNGs.
#[cfg(feature = "generate")]
pub fn generate_pan_with_rng<R: Rng>(product: Product, rng: &mut R) -> String {
    let candidates: Vec<&IinRange> = owned_ranges(product).collect();

    let iin = loop {
        let range = candidates[rng.gen_range(0..candidates.len())];
        let iin = rng.gen_range(range.low..=range.high);
        if classify_iin(iin) == Some(product) {
            break iin;
        }
    };

    let lengths = product.pan_lengths();
    let length = usize::from(lengths[rng.gen_range(0..lengths.len())]);

    let mut digits: Vec<u8> = format!("{:06}", iin).bytes().map(|b| b - b'0').collect();
    while digits.len() < length - 1 {
        digits.push(rng.gen_range(0..10));
    }
    finish(digits)
}

/// Generates a random PAN with the given prefix and total length.
///
/// Returns `None` under the same conditions as
/// [`generate_deterministic_with_prefix`].
///
/// Requires the `generate` feature.
#[cfg(feature = "generate")]
pub fn generate_with_prefix<R: Rng>(prefix: &str, length: usize, rng: &mut R) -> Option<String> {
    let mut digits = prefix_digits(prefix, length)?;
    while digits.len() < length - 1 {
        digits.push(rng.gen_range(0..10));
    }
    Some(finish(digits))
}
