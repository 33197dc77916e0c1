//! Number of digits in generated codes.

use std::fmt;
use std::str::FromStr;

use crate::error::CodeLengthError;

/// Number of digits in a generated code.
///
/// This is a closed set rather than an arbitrary integer: codes are
/// always 6, 7 or 8 digits long.
///
/// # Examples
///
/// ```
/// use otpauth_uri::CodeLength;
///
/// let len = CodeLength::try_from(8u8).unwrap();
/// assert_eq!(len.digits(), 8);
/// assert!(CodeLength::try_from(10u8).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum CodeLength {
    /// Six digits
    #[default]
    Six,
    /// Seven digits
    Seven,
    /// Eight digits
    Eight,
}

impl CodeLength {
    /// All supported code lengths.
    pub const ALL: [Self; 3] = [Self::Six, Self::Seven, Self::Eight];

    /// Returns the number of digits.
    #[must_use]
    pub const fn digits(self) -> u8 {
        match self {
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
        }
    }

    /// Returns `10^digits`, the modulus applied to the truncated HMAC value.
    #[must_use]
    pub const fn modulus(self) -> u32 {
        match self {
            Self::Six => 1_000_000,
            Self::Seven => 10_000_000,
            Self::Eight => 100_000_000,
        }
    }

    /// Maps a digit count onto the allowed set.
    ///
    /// # Errors
    ///
    /// Returns `CodeLengthError` if `digits` is not 6, 7 or 8.
    pub const fn from_digits(digits: i64) -> Result<Self, CodeLengthError> {
        match digits {
            6 => Ok(Self::Six),
            7 => Ok(Self::Seven),
            8 => Ok(Self::Eight),
            _ => Err(CodeLengthError::Unsupported { digits }),
        }
    }
}

impl fmt::Display for CodeLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digits())
    }
}

impl TryFrom<i64> for CodeLength {
    type Error = CodeLengthError;

    fn try_from(digits: i64) -> Result<Self, Self::Error> {
        Self::from_digits(digits)
    }
}

impl TryFrom<u8> for CodeLength {
    type Error = CodeLengthError;

    fn try_from(digits: u8) -> Result<Self, Self::Error> {
        Self::from_digits(i64::from(digits))
    }
}

impl From<CodeLength> for u8 {
    fn from(len: CodeLength) -> Self {
        len.digits()
    }
}

impl FromStr for CodeLength {
    type Err = CodeLengthError;

    /// Parses a decimal digit count.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.parse::<i64>().map_err(|_| CodeLengthError::NotANumber {
            found: s.to_owned(),
        })?;
        Self::from_digits(digits)
    }
}

impl TryFrom<&str> for CodeLength {
    type Error = CodeLengthError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CodeLength {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.digits())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CodeLength {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let digits = u8::deserialize(deserializer)?;
        Self::try_from(digits).map_err(serde::de::Error::custom)
    }
}
