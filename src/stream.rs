//! Streaming parsing for PANs as they arrive.
//!
//! Iterator adapters that parse lazily, useful for large files or network
//! streams that should not be loaded into memory at once.
//!
//! # Example
//!
//! ```
//! use pan_validator::stream::ParseExt;
//!
//! let inputs = vec!["4000000000000002", "6011000000000004", "invalid"];
//! let valid_count = inputs
//!     .iter()
//!     .copied()
//!     .parse_pans()
//!     .filter(|r| r.is_ok())
//!     .count();
//!
//! assert_eq!(valid_count, 2);
//! ```

use crate::classify::classify;
use crate::error::PanError;
use crate::pan::{parse_pan, Pan};
use crate::Product;

/// Yields a parse result for every input string.
///
/// Created by [`ParseExt::parse_pans`].
#[derive(Debug, Clone)]
pub struct ParseStream<I> {
    inner: I,
}

impl<I> ParseStream<I> {
    /// Creates a new `ParseStream` wrapping the given iterator.
    #[inline]
    pub fn new(inner: I) -> Self {
        Self { inner }
    }

    /// Consumes the stream and returns the inner iterator.
    #[inline]
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I, S> Iterator for ParseStream<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<Pan, PanError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|s| parse_pan(s.as_ref()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I, S> ExactSizeIterator for ParseStream<I>
where
    I: ExactSizeIterator<Item = S>,
    S: AsRef<str>,
{
}

impl<I, S> DoubleEndedIterator for ParseStream<I>
where
    I: DoubleEndedIterator<Item = S>,
    S: AsRef<str>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|s| parse_pan(s.as_ref()))
    }
}

/// Yields only the inputs that parse; invalid ones are skipped.
#[derive(Debug, Clone)]
pub struct ValidOnlyStream<I> {
    inner: I,
}

impl<I> ValidOnlyStream<I> {
    /// Creates a new `ValidOnlyStream` wrapping the given iterator.
    #[inline]
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<I, S> Iterator for ValidOnlyStream<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Pan;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find_map(|s| parse_pan(s.as_ref()).ok())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.inner.size_hint();
        (0, upper)
    }
}

/// Yields each valid PAN with the product it classifies as.
#[derive(Debug, Clone)]
pub struct ClassifyStream<I> {
    inner: I,
}

impl<I, S> Iterator for ClassifyStream<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<(Pan, Option<Product>), PanError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|s| {
            parse_pan(s.as_ref()).map(|pan| {
                let product = classify(&pan);
                (pan, product)
            })
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Extension trait adding PAN parsing to any iterator of strings.
pub trait ParseExt: Iterator + Sized {
    /// Parses each string yielded by the iterator.
    fn parse_pans(self) -> ParseStream<Self>;

    /// Parses and yields only valid PANs.
    ///
    /// ```
    /// use pan_validator::stream::ParseExt;
    ///
    /// let inputs = ["4000000000000002", "invalid", "6011000000000004"];
    /// let valid: Vec<_> = inputs.iter().copied().parse_valid_only().collect();
    /// assert_eq!(valid.len(), 2);
    /// ```
    fn parse_valid_only(self) -> ValidOnlyStream<Self>;

    /// Parses and classifies each string.
    ///
    /// ```
    /// use pan_validator::stream::ParseExt;
    /// use pan_validator::Product;
    ///
    /// let inputs = ["6011000000000004"];
    /// for result in inputs.iter().copied().classify_pans() {
    ///     let (_, product) = result.unwrap();
    ///     assert_eq!(product, Some(Product::Discover));
    /// }
    /// ```
    fn classify_pans(self) -> ClassifyStream<Self>;
}

impl<I: Iterator + Sized> ParseExt for I {
    #[inline]
    fn parse_pans(self) -> ParseStream<Self> {
        ParseStream::new(self)
    }

    #[inline]
    fn parse_valid_only(self) -> ValidOnlyStream<Self> {
        ValidOnlyStream::new(self)
    }

    #[inline]
    fn classify_pans(self) -> ClassifyStream<Self> {
        ClassifyStream { inner: self }
    }
}
