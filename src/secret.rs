//! Shared secret key material.

use std::fmt;
use std::sync::OnceLock;

use data_encoding::{Encoding, Specification};

use crate::error::SecretError;

const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// RFC 4648 Base32 without padding, accepting lowercase input and
/// ignoring the unused low bits of the final symbol.
fn base32() -> &'static Encoding {
    static ENCODING: OnceLock<Encoding> = OnceLock::new();
    ENCODING.get_or_init(|| {
        let mut spec = Specification::new();
        spec.symbols.push_str(ALPHABET);
        spec.check_trailing_bits = false;
        spec.translate.from.push_str(&ALPHABET.to_ascii_lowercase());
        spec.translate.to.push_str(ALPHABET);
        spec.encoding().expect("RFC 4648 alphabet is a valid specification")
    })
}

/// Drops a final symbol that cannot contribute a whole byte.
///
/// Unpadded Base32 text of 1, 3 or 6 symbols past a full block ends in a
/// symbol that completes no byte. The symbol must still belong to the
/// alphabet.
fn complete_symbols(text: &[u8]) -> &[u8] {
    match text.split_last() {
        Some((last, head))
            if matches!(text.len() % 8, 1 | 3 | 6)
                && ALPHABET.as_bytes().contains(&last.to_ascii_uppercase()) =>
        {
            head
        }
        _ => text,
    }
}

/// The decoded shared secret of a credential.
///
/// A secret always holds at least one byte. Its `Debug` output never
/// reveals the key material.
///
/// # Examples
///
/// ```
/// use otpauth_uri::Secret;
///
/// let secret = Secret::from_base32("JBSWY3DPEHPK3PXP").unwrap();
/// assert_eq!(secret.as_bytes(), b"Hello!\xde\xad\xbe\xef");
/// assert!(Secret::from_base32("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Secret(Vec<u8>);

impl Secret {
    /// Wraps raw key material.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::Empty` if `bytes` is empty.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, SecretError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(SecretError::Empty);
        }
        Ok(Self(bytes))
    }

    /// Decodes RFC 4648 Base32 text.
    ///
    /// Lowercase letters and trailing `=` padding are accepted, since
    /// both are common in provisioning URIs. Leftover bits that do not
    /// fill a whole byte are discarded.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::InvalidBase32` if the text uses characters
    /// outside the Base32 alphabet, and `SecretError::Empty` if it
    /// decodes to no bytes.
    pub fn from_base32(text: &str) -> Result<Self, SecretError> {
        let symbols = complete_symbols(text.trim_end_matches('=').as_bytes());
        let bytes = base32()
            .decode(symbols)
            .map_err(SecretError::InvalidBase32)?;
        Self::new(bytes)
    }

    /// Returns the key material.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the number of bytes of key material.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for parity with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret([REDACTED; {} bytes])", self.0.len())
    }
}

impl AsRef<[u8]> for Secret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<Vec<u8>> for Secret {
    type Error = SecretError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl TryFrom<&[u8]> for Secret {
    type Error = SecretError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}
