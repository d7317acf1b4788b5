//! The Primary Account Number value object.
//!
//! A PAN, as defined in ISO/IEC 7812-1, is laid out as
//!
//! ```text
//!  4 0 0 0 0 0 | 0 0 0 0 0 0 0 0 0 | 2
//!  issuer id   | account id        | check digit
//!  (6 digits)  | (1-12 digits)     | (Luhn)
//! ```
//!
//! The first digit of the issuer identifier is the Major Industry
//! Identifier (MII).

use crate::error::{Component, PanError};
use crate::luhn;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use zeroize::Zeroize;

/// Length of the Issuer Identification Number (IIN).
pub const ISSUER_IDENTIFIER_LENGTH: usize = 6;

/// Minimum length of the individual account identification.
pub const MIN_ACCOUNT_IDENTIFIER_LENGTH: usize = 1;

/// Maximum length of the individual account identification.
pub const MAX_ACCOUNT_IDENTIFIER_LENGTH: usize = 12;

/// Minimum length of a PAN: IIN, one account digit and the check digit.
pub const MIN_PAN_LENGTH: usize = ISSUER_IDENTIFIER_LENGTH + MIN_ACCOUNT_IDENTIFIER_LENGTH + 1;

/// Maximum length of a PAN.
pub const MAX_PAN_LENGTH: usize = ISSUER_IDENTIFIER_LENGTH + MAX_ACCOUNT_IDENTIFIER_LENGTH + 1;

/// Multiplier placing the IIN above any 12-digit account identifier.
const IDENTITY_SHIFT: u64 = 1_000_000_000_000;

/// A validated Primary Account Number.
///
/// Immutable once built. Every derived field (MII, numeric value, identity
/// key) is computed during construction.
///
/// # Equality and ordering
///
/// Two PANs are equal when their issuer identifier and account identifier
/// *values* match. The check digit is fully determined by the other two and
/// takes no part; neither does the account identifier's written width, so
/// account `07` and `007` under the same IIN are equal even though their
/// canonical strings differ.
///
/// Because of that, `Pan` has no `Ord` impl: ordering by
/// numeric value would disagree with equality. Use [`Pan::cmp_value`]:
///
/// ```
/// use pan_validator::parse_pan;
///
/// let mut pans = vec![
///     parse_pan("4000000000000010").unwrap(),
///     parse_pan("4000000000000002").unwrap(),
/// ];
/// pans.sort_by(|a, b| a.cmp_value(b));
/// assert_eq!(pans[0].canonical_string(), "4000000000000002");
/// ```
///
/// # Security
///
/// `Debug` and `Display` are masked. Every field is zeroed on drop.
#[derive(Clone)]
pub struct Pan {
    issuer_identifier: u32,
    major_industry_identifier: u8,
    account_identifier: u64,
    account_identifier_width: u8,
    check_digit: u8,
    /// Numeric value of the canonical string.
    value: u64,
    /// `issuer_identifier * 10^12 + account_identifier`; unique per identity.
    identity: u64,
}

/// Parses a PAN from its digit string.
///
/// The first six characters are the issuer identifier, the last character is
/// the check digit and everything in between is the account identifier.
///
/// # Errors
///
/// - [`PanError::MissingInput`] if `text` is empty
/// - [`PanError::InvalidLength`] if `text` is not 8 to 19 characters
/// - [`PanError::InvalidCharacters`] if a component contains a non-digit
/// - [`PanError::ChecksumMismatch`] if the check digit is wrong
///
/// # Example
///
/// ```
/// use pan_validator::parse_pan;
///
/// let pan = parse_pan("4000000000000002").unwrap();
/// assert_eq!(pan.issuer_identifier(), 400000);
/// assert_eq!(pan.account_identifier(), 0);
/// assert_eq!(pan.check_digit(), 2);
/// ```
pub fn parse_pan(text: &str) -> Result<Pan, PanError> {
    if text.is_empty() {
        return Err(PanError::MissingInput {
            component: Component::Pan,
        });
    }

    let length = text.chars().count();
    let length_error = PanError::InvalidLength {
        component: Component::Pan,
        length,
        minimum: MIN_PAN_LENGTH,
        maximum: MAX_PAN_LENGTH,
    };
    if !(MIN_PAN_LENGTH..=MAX_PAN_LENGTH).contains(&length) {
        return Err(length_error);
    }

    // Split on character boundaries; the input may contain multi-byte junk.
    let Some((account_start, _)) = text.char_indices().nth(ISSUER_IDENTIFIER_LENGTH) else {
        return Err(length_error);
    };
    let Some((check_start, check_digit)) = text.char_indices().next_back() else {
        return Err(length_error);
    };

    parse_pan_components(
        &text[..account_start],
        &text[account_start..check_start],
        check_digit,
    )
}

/// Parses a PAN from its three components.
///
/// # Errors
///
/// Same kinds as [`parse_pan`], scoped to the offending component. Checks
/// run in order: issuer identifier, account identifier, check digit, Luhn.
///
/// # Example
///
/// ```
/// use pan_validator::parse_pan_components;
///
/// let pan = parse_pan_components("400000", "000000000", '2').unwrap();
/// assert_eq!(pan.canonical_string(), "4000000000000002");
/// ```
pub fn parse_pan_components(
    issuer_identifier: &str,
    account_identifier: &str,
    check_digit: char,
) -> Result<Pan, PanError> {
    let mut base = [0u8; ISSUER_IDENTIFIER_LENGTH + MAX_ACCOUNT_IDENTIFIER_LENGTH];

    let iin = read_digits(
        Component::IssuerIdentifier,
        issuer_identifier,
        ISSUER_IDENTIFIER_LENGTH,
        ISSUER_IDENTIFIER_LENGTH,
        &mut base,
    )?;
    let account_width = account_identifier.len();
    let account = read_digits(
        Component::AccountIdentifier,
        account_identifier,
        MIN_ACCOUNT_IDENTIFIER_LENGTH,
        MAX_ACCOUNT_IDENTIFIER_LENGTH,
        &mut base[ISSUER_IDENTIFIER_LENGTH..],
    )?;

    let Some(actual) = check_digit.to_digit(10) else {
        return Err(PanError::InvalidCharacters {
            component: Component::CheckDigit,
            position: 0,
            character: check_digit,
        });
    };
    let actual = actual as u8;

    let expected = luhn::check_digit(&base[..ISSUER_IDENTIFIER_LENGTH + account_width]);
    if expected != actual {
        return Err(PanError::ChecksumMismatch { expected, actual });
    }

    // Both components are bounded, so none of this can overflow:
    // iin < 10^6, account < 10^12, value < 10^19 < u64::MAX.
    let iin = iin as u32;
    let value = (u64::from(iin) * 10u64.pow(account_width as u32) + account) * 10
        + u64::from(actual);

    Ok(Pan {
        issuer_identifier: iin,
        major_industry_identifier: base[0],
        account_identifier: account,
        account_identifier_width: account_width as u8,
        check_digit: actual,
        value,
        identity: u64::from(iin) * IDENTITY_SHIFT + account,
    })
}

/// Validates a digit-only component and copies its digit values into `out`.
///
/// Returns the component's numeric value.
fn read_digits(
    component: Component,
    text: &str,
    minimum: usize,
    maximum: usize,
    out: &mut [u8],
) -> Result<u64, PanError> {
    if text.is_empty() {
        return Err(PanError::MissingInput { component });
    }

    if let Some((position, character)) = text.chars().enumerate().find(|(_, c)| !c.is_ascii_digit())
    {
        return Err(PanError::InvalidCharacters {
            component,
            position,
            character,
        });
    }

    // All ASCII digits from here, so byte length is the digit count.
    let length = text.len();
    if length < minimum || length > maximum {
        return Err(PanError::InvalidLength {
            component,
            length,
            minimum,
            maximum,
        });
    }

    let mut value = 0u64;
    for (slot, b) in out.iter_mut().zip(text.bytes()) {
        *slot = b - b'0';
        value = value * 10 + u64::from(*slot);
    }
    Ok(value)
}

impl Pan {
    /// Parses a PAN from its digit string. See [`parse_pan`].
    #[inline]
    pub fn parse(text: &str) -> Result<Self, PanError> {
        parse_pan(text)
    }

    /// Builds a PAN from its three components. See [`parse_pan_components`].
    #[inline]
    pub fn from_components(
        issuer_identifier: &str,
        account_identifier: &str,
        check_digit: char,
    ) -> Result<Self, PanError> {
        parse_pan_components(issuer_identifier, account_identifier, check_digit)
    }

    /// Builds a PAN from its numeric value.
    ///
    /// Leading zeros cannot be expressed in an integer, so this is only
    /// reliable for PANs whose issuer identifier does not start with `0`.
    ///
    /// ```
    /// use pan_validator::Pan;
    ///
    /// let pan = Pan::from_value(4_000_000_000_000_002).unwrap();
    /// assert_eq!(pan.issuer_identifier(), 400000);
    /// ```
    pub fn from_value(value: u64) -> Result<Self, PanError> {
        parse_pan(&value.to_string())
    }

    /// Parses a PAN written with spaces or hyphens between digit groups.
    ///
    /// Separators are dropped before parsing, so the canonical string of the
    /// result does not contain them.
    ///
    /// ```
    /// use pan_validator::Pan;
    ///
    /// let pan = Pan::parse_formatted("4000 0000 0000 0002").unwrap();
    /// assert_eq!(pan.canonical_string(), "4000000000000002");
    /// ```
    pub fn parse_formatted(text: &str) -> Result<Self, PanError> {
        let stripped: String = text.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
        parse_pan(&stripped)
    }

    /// Returns the Issuer Identification Number (IIN).
    #[inline]
    pub const fn issuer_identifier(&self) -> u32 {
        self.issuer_identifier
    }

    /// Returns the six-digit IIN, zero-padded.
    pub fn issuer_identifier_string(&self) -> String {
        format!("{:0width$}", self.issuer_identifier, width = ISSUER_IDENTIFIER_LENGTH)
    }

    /// Returns the Major Industry Identifier (first digit of the IIN).
    #[inline]
    pub const fn major_industry_identifier(&self) -> u8 {
        self.major_industry_identifier
    }

    /// Returns the MII as a character.
    #[inline]
    pub const fn mii_char(&self) -> char {
        (b'0' + self.major_industry_identifier) as char
    }

    /// Returns the individual account identification.
    #[inline]
    pub const fn account_identifier(&self) -> u64 {
        self.account_identifier
    }

    /// Returns the number of digits the account identifier was written with.
    #[inline]
    pub const fn account_identifier_width(&self) -> usize {
        self.account_identifier_width as usize
    }

    /// Returns the account identifier, zero-padded to its original width.
    pub fn account_identifier_string(&self) -> String {
        format!(
            "{:0width$}",
            self.account_identifier,
            width = self.account_identifier_width()
        )
    }

    /// Returns the check digit value.
    #[inline]
    pub const fn check_digit(&self) -> u8 {
        self.check_digit
    }

    /// Returns the check digit as a character.
    #[inline]
    pub const fn check_digit_char(&self) -> char {
        (b'0' + self.check_digit) as char
    }

    /// Returns the numeric value of the whole PAN.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Returns the total number of digits.
    #[inline]
    pub const fn length(&self) -> usize {
        ISSUER_IDENTIFIER_LENGTH + self.account_identifier_width as usize + 1
    }

    /// Returns the full PAN: IIN, account identifier at its original width,
    /// check digit.
    ///
    /// # Security Warning
    ///
    /// This is the complete number. Never log it; use
    /// [`masked`](Self::masked) for display.
    pub fn canonical_string(&self) -> String {
        format!(
            "{:0iin$}{:0account$}{}",
            self.issuer_identifier,
            self.account_identifier,
            self.check_digit,
            iin = ISSUER_IDENTIFIER_LENGTH,
            account = self.account_identifier_width()
        )
    }

    /// Compares two PANs by their numeric value.
    ///
    /// This is the ordering of PANs. It is not exposed as `PartialOrd`/`Ord`
    /// because it does not agree with equality: account `07` and `007` under
    /// the same IIN are equal but have different values.
    ///
    /// ```
    /// use pan_validator::parse_pan;
    /// use std::cmp::Ordering;
    ///
    /// let a = parse_pan("4000000000000002").unwrap();
    /// let b = parse_pan("4000000000000010").unwrap();
    /// assert_eq!(a.cmp_value(&b), Ordering::Less);
    /// ```
    #[inline]
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }

    /// Returns the PAN masked for display: `****-****-****-0002`.
    #[inline]
    pub fn masked(&self) -> String {
        crate::mask::mask_pan(self)
    }

    /// Returns the PAN with the IIN visible: `400000******0002`.
    #[inline]
    pub fn masked_with_iin(&self) -> String {
        crate::mask::mask_with_iin(self)
    }
}

impl PartialEq for Pan {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for Pan {}

impl Hash for Pan {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.identity);
    }
}

impl FromStr for Pan {
    type Err = PanError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_pan(s)
    }
}

impl TryFrom<&str> for Pan {
    type Error = PanError;

    #[inline]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_pan(value)
    }
}

impl fmt::Debug for Pan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pan")
            .field("number", &self.masked_with_iin())
            .field("length", &self.length())
            .finish()
    }
}

impl fmt::Display for Pan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl Pan {
    fn wipe(&mut self) {
        self.issuer_identifier.zeroize();
        self.major_industry_identifier.zeroize();
        self.account_identifier.zeroize();
        self.account_identifier_width.zeroize();
        self.check_digit.zeroize();
        self.value.zeroize();
        self.identity.zeroize();
    }
}

impl Drop for Pan {
    fn drop(&mut self) {
        self.wipe();
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Pan {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Pan {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        parse_pan(&s).map_err(serde::de::Error::custom)
    }
}
