//! Rich error types for PAN validation.
//!
//! Every failure names the component it was found in, so callers can point
//! the user at the exact part of the number that needs fixing.

use crate::Product;
use std::fmt;

/// The part of a Primary Account Number an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// The PAN as a whole, before decomposition.
    Pan,
    /// The six-digit Issuer Identification Number (IIN).
    IssuerIdentifier,
    /// The individual account identification.
    AccountIdentifier,
    /// The trailing Luhn check digit.
    CheckDigit,
}

impl Component {
    /// Returns a human-readable name for the component.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pan => "primary account number",
            Self::IssuerIdentifier => "issuer identifier",
            Self::AccountIdentifier => "account identifier",
            Self::CheckDigit => "check digit",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coarse classification of a [`PanError`], without the details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`PanError::MissingInput`].
    MissingInput,
    /// See [`PanError::InvalidLength`].
    InvalidLength,
    /// See [`PanError::InvalidCharacters`].
    InvalidCharacters,
    /// See [`PanError::ChecksumMismatch`].
    ChecksumMismatch,
    /// See [`PanError::InvalidLengthForProduct`].
    InvalidLengthForProduct,
}

/// Errors that can occur while parsing a Primary Account Number.
///
/// Construction either fully succeeds or returns one of these; there is
/// never a partially built PAN to clean up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanError {
    /// The input (or one of its components) was empty.
    MissingInput {
        /// The component that was missing.
        component: Component,
    },

    /// A component has a length outside its permitted bounds.
    InvalidLength {
        /// The offending component.
        component: Component,
        /// The number of characters supplied.
        length: usize,
        /// The minimum permitted length.
        minimum: usize,
        /// The maximum permitted length.
        maximum: usize,
    },

    /// A component contains something other than decimal digits.
    InvalidCharacters {
        /// The offending component.
        component: Component,
        /// Character position within the component (0-indexed).
        position: usize,
        /// The first invalid character found.
        character: char,
    },

    /// The number is well formed but fails the Luhn check.
    ChecksumMismatch {
        /// The check digit the Luhn algorithm requires.
        expected: u8,
        /// The check digit that was supplied.
        actual: u8,
    },

    /// The PAN length is not one the classified product issues.
    ///
    /// Only produced by [`classify_checked`](crate::classify::classify_checked).
    InvalidLengthForProduct {
        /// The classified product.
        product: Product,
        /// The PAN length.
        length: usize,
        /// The lengths the product accepts.
        valid_lengths: &'static [u8],
    },
}

impl PanError {
    /// Returns the kind of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingInput { .. } => ErrorKind::MissingInput,
            Self::InvalidLength { .. } => ErrorKind::InvalidLength,
            Self::InvalidCharacters { .. } => ErrorKind::InvalidCharacters,
            Self::ChecksumMismatch { .. } => ErrorKind::ChecksumMismatch,
            Self::InvalidLengthForProduct { .. } => ErrorKind::InvalidLengthForProduct,
        }
    }

    /// Returns the component the error refers to, if any.
    pub const fn component(&self) -> Option<Component> {
        match self {
            Self::MissingInput { component }
            | Self::InvalidLength { component, .. }
            | Self::InvalidCharacters { component, .. } => Some(*component),
            Self::ChecksumMismatch { .. } => Some(Component::CheckDigit),
            Self::InvalidLengthForProduct { .. } => Some(Component::Pan),
        }
    }
}

impl fmt::Display for PanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput { component } => write!(f, "{} is missing", component),

            Self::InvalidLength {
                component,
                length,
                minimum,
                maximum,
            } => {
                if minimum == maximum {
                    write!(
                        f,
                        "{} must be {} digits, got {}",
                        component, minimum, length
                    )
                } else {
                    write!(
                        f,
                        "{} must be {} to {} digits, got {}",
                        component, minimum, maximum, length
                    )
                }
            }

            Self::InvalidCharacters {
                component,
                position,
                character,
            } => {
                write!(
                    f,
                    "invalid character '{}' at position {} of {} (only digits allowed)",
                    character.escape_default(),
                    position,
                    component
                )
            }

            Self::ChecksumMismatch { expected, actual } => {
                write!(
                    f,
                    "check digit {} does not match Luhn check digit {}",
                    actual, expected
                )
            }

            Self::InvalidLengthForProduct {
                product,
                length,
                valid_lengths,
            } => {
                let valid_str: Vec<String> =
                    valid_lengths.iter().map(|l| l.to_string()).collect();
                write!(
                    f,
                    "{} numbers must have {} digits, got {}",
                    product,
                    valid_str.join(" or "),
                    length
                )
            }
        }
    }
}

impl std::error::Error for PanError {}
