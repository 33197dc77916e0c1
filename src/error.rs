//! Error types for otpauth URI parsing.

use std::fmt;

/// Errors that can occur when parsing an otpauth URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The validation step that failed
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(input: &str, kind: ParseErrorKind) -> Self {
        Self {
            input: input.to_string(),
            kind,
        }
    }

    /// Returns the kind of failure.
    #[must_use]
    pub const fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

/// Specific parsing error types, one per validation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input is not a structurally valid URI
    InvalidUri,
    /// Input has no scheme
    MissingScheme,
    /// Scheme is present but is not `otpauth`
    InvalidScheme,
    /// URI has no host naming the OTP type
    MissingOtpType,
    /// Host is neither `hotp` nor `totp`
    InvalidOtpType,
    /// URI has no query component at all
    MissingQueryItems,
    /// `counter` is absent or not an unsigned 64-bit integer (strict policy)
    MissingCounter,
    /// `period` is absent or not a positive number of seconds (strict policy)
    MissingPeriod,
    /// `secret` is absent or decodes to no bytes
    MissingSecret,
    /// `secret` is not valid Base32
    InvalidSecret(data_encoding::DecodeError),
    /// `algorithm` names no known hash (strict policy)
    InvalidAlgorithm,
    /// `digits` is an integer outside the allowed code lengths
    InvalidCodeLength,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUri => write!(f, "input is not a valid URI"),
            Self::MissingScheme => write!(f, "missing scheme; URI must start with 'otpauth://'"),
            Self::InvalidScheme => write!(f, "expected scheme 'otpauth'"),
            Self::MissingOtpType => write!(f, "missing OTP type; expected 'hotp' or 'totp' host"),
            Self::InvalidOtpType => write!(f, "unknown OTP type; expected 'hotp' or 'totp'"),
            Self::MissingQueryItems => write!(f, "missing query component"),
            Self::MissingCounter => write!(f, "missing or invalid 'counter' for HOTP"),
            Self::MissingPeriod => write!(f, "missing or invalid 'period' for TOTP"),
            Self::MissingSecret => write!(f, "missing 'secret'"),
            Self::InvalidSecret(e) => write!(f, "invalid Base32 'secret': {e}"),
            Self::InvalidAlgorithm => {
                write!(f, "unknown 'algorithm'; expected SHA1, SHA256 or SHA512")
            }
            Self::InvalidCodeLength => write!(f, "unsupported 'digits'; expected 6, 7 or 8"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse otpauth URI '{}': {}", self.input, self.kind)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::InvalidSecret(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors for secret construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretError {
    /// Secret contains no bytes
    Empty,
    /// Text is not valid Base32
    InvalidBase32(data_encoding::DecodeError),
}

impl fmt::Display for SecretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "secret cannot be empty"),
            Self::InvalidBase32(e) => write!(f, "invalid Base32: {e}"),
        }
    }
}

impl std::error::Error for SecretError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Empty => None,
            Self::InvalidBase32(e) => Some(e),
        }
    }
}

/// Error for an unrecognized hash algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmError {
    /// The name that was found
    pub found: String,
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm '{}'; expected SHA1, SHA256 or SHA512",
            self.found
        )
    }
}

impl std::error::Error for AlgorithmError {}

/// Errors for code length conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeLengthError {
    /// Digit count outside the allowed set
    Unsupported {
        /// The digit count that was requested
        digits: i64,
    },
    /// Text that is not a decimal integer
    NotANumber {
        /// The text that was found
        found: String,
    },
}

impl fmt::Display for CodeLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported { digits } => write!(
                f,
                "code length {digits} is not supported; expected 6, 7 or 8"
            ),
            Self::NotANumber { found } => {
                write!(f, "code length '{found}' is not a number")
            }
        }
    }
}

impl std::error::Error for CodeLengthError {}

/// Error for an unrecognized OTP type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpTypeError {
    /// The value that was found
    pub found: String,
}

impl fmt::Display for OtpTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown OTP type '{}'; expected 'hotp' or 'totp'", self.found)
    }
}

impl std::error::Error for OtpTypeError {}

/// Errors for metadata identifier parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataIdError {
    /// Identifier does not carry the `otp` type prefix
    InvalidPrefix {
        /// The prefix that was found, if any
        found: Option<String>,
    },
    /// `TypeID` parsing failed
    TypeIdError(String),
}

impl fmt::Display for MetadataIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPrefix { found } => match found {
                Some(p) => write!(f, "expected identifier prefix 'otp', found '{p}'"),
                None => write!(f, "missing identifier prefix; expected 'otp_'"),
            },
            Self::TypeIdError(msg) => write!(f, "`TypeID` error: {msg}"),
        }
    }
}

impl std::error::Error for MetadataIdError {}
