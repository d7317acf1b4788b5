//! Batch processing for high-throughput PAN parsing.
//!
//! Parse and classify many numbers in one call, with optional parallel
//! processing through rayon (`parallel` feature).

use crate::classify::classify;
use crate::error::PanError;
use crate::pan::{parse_pan, Pan};
use crate::Product;
use std::collections::HashMap;

/// Batch parser for processing many PAN strings.
///
/// By default every input must be a bare digit string. Call
/// [`allow_separators`](Self::allow_separators) to accept spaces and hyphens
/// between digit groups.
///
/// # Example
///
/// ```
/// use pan_validator::BatchParser;
///
/// let batch = BatchParser::new();
/// let pans = ["4000000000000002", "6011000000000004", "378282246310005"];
/// let results = batch.parse_all(&pans);
///
/// for (input, result) in pans.iter().zip(results.iter()) {
///     match result {
///         Ok(pan) => println!("{}: valid", pan),
///         Err(e) => println!("{}: invalid - {}", input, e),
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchParser {
    allow_separators: bool,
}

/// A parsed PAN together with its product, if one was recognized.
pub type Classified = (Pan, Option<Product>);

impl BatchParser {
    /// Creates a strict batch parser.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts spaces and hyphens between digits.
    #[inline]
    pub fn allow_separators(mut self, allow: bool) -> Self {
        self.allow_separators = allow;
        self
    }

    #[inline]
    fn parse_one(&self, input: &str) -> Result<Pan, PanError> {
        if self.allow_separators {
            Pan::parse_formatted(input)
        } else {
            parse_pan(input)
        }
    }

    /// Parses every input, returning results in input order.
    pub fn parse_all<S: AsRef<str>>(&self, inputs: &[S]) -> Vec<Result<Pan, PanError>> {
        inputs.iter().map(|s| self.parse_one(s.as_ref())).collect()
    }

    /// Parses every input and returns only the valid PANs.
    pub fn parse_valid_only<S: AsRef<str>>(&self, inputs: &[S]) -> Vec<Pan> {
        inputs
            .iter()
            .filter_map(|s| self.parse_one(s.as_ref()).ok())
            .collect()
    }

    /// Parses every input and splits the results.
    ///
    /// Returns `(valid_pans, errors)`, each error paired with its input index.
    pub fn parse_partitioned<S: AsRef<str>>(
        &self,
        inputs: &[S],
    ) -> (Vec<Pan>, Vec<(usize, PanError)>) {
        let mut valid = Vec::new();
        let mut invalid = Vec::new();

        for (i, input) in inputs.iter().enumerate() {
            match self.parse_one(input.as_ref()) {
                Ok(pan) => valid.push(pan),
                Err(e) => invalid.push((i, e)),
            }
        }

        (valid, invalid)
    }

    /// Parses and classifies every input.
    pub fn classify_all<S: AsRef<str>>(&self, inputs: &[S]) -> Vec<Result<Classified, PanError>> {
        inputs
            .iter()
            .map(|s| {
                self.parse_one(s.as_ref()).map(|pan| {
                    let product = classify(&pan);
                    (pan, product)
                })
            })
            .collect()
    }

    /// Counts valid PANs per product. Unrecognized products count under `None`.
    pub fn product_counts<S: AsRef<str>>(&self, inputs: &[S]) -> HashMap<Option<Product>, usize> {
        let mut counts = HashMap::new();
        for pan in self.parse_valid_only(inputs) {
            *counts.entry(classify(&pan)).or_insert(0) += 1;
        }
        counts
    }

    /// Parses inputs in parallel using rayon.
    ///
    /// # Feature
    ///
    /// Requires the `parallel` feature to be enabled.
    #[cfg(feature = "parallel")]
    pub fn parse_parallel<S: AsRef<str> + Sync>(
        &self,
        inputs: &[S],
    ) -> Vec<Result<Pan, PanError>> {
        use rayon::prelude::*;
        inputs.par_iter().map(|s| self.parse_one(s.as_ref())).collect()
    }

    /// Parses and classifies inputs in parallel.
    ///
    /// # Feature
    ///
    /// Requires the `parallel` feature to be enabled.
    #[cfg(feature = "parallel")]
    pub fn classify_parallel<S: AsRef<str> + Sync>(
        &self,
        inputs: &[S],
    ) -> Vec<Result<Classified, PanError>> {
        use rayon::prelude::*;
        inputs
            .par_iter()
            .map(|s| {
                self.parse_one(s.as_ref()).map(|pan| {
                    let product = classify(&pan);
                    (pan, product)
                })
            })
            .collect()
    }
}

/// Parses a slice of strict digit strings without creating a `BatchParser`.
///
/// ```
/// use pan_validator::batch::parse_batch;
///
/// let results = parse_batch(&["4000000000000002", "4000000000000003"]);
/// assert!(results[0].is_ok());
/// assert!(results[1].is_err());
/// ```
#[inline]
pub fn parse_batch<S: AsRef<str>>(inputs: &[S]) -> Vec<Result<Pan, PanError>> {
    BatchParser::new().parse_all(inputs)
}

/// Counts valid and invalid PANs without keeping the results.
///
/// # Returns
///
/// Tuple of (valid_count, invalid_count)
///
/// ```
/// use pan_validator::batch::count_valid;
///
/// let inputs = ["4000000000000002", "1234567890123456", "6011000000000004"];
/// assert_eq!(count_valid(&inputs), (2, 1));
/// ```
pub fn count_valid<S: AsRef<str>>(inputs: &[S]) -> (usize, usize) {
    let valid = inputs
        .iter()
        .filter(|s| parse_pan(s.as_ref()).is_ok())
        .count();
    (valid, inputs.len() - valid)
}

/// Counts valid and invalid PANs in parallel.
///
/// # Feature
///
/// Requires the `parallel` feature to be enabled.
#[cfg(feature = "parallel")]
pub fn count_valid_parallel<S: AsRef<str> + Sync>(inputs: &[S]) -> (usize, usize) {
    use rayon::prelude::*;

    let valid = inputs
        .par_iter()
        .filter(|s| parse_pan(s.as_ref()).is_ok())
        .count();

    (valid, inputs.len() - valid)
}
