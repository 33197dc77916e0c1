//! Strictness policy for URI parsing.

use std::fmt;

/// How the parser treats optional-looking items that downstream code
/// cannot do without.
///
/// | Item | `Strict` | `Lenient` (default) |
/// |------|----------|---------------------|
/// | `counter` (hotp) absent or not a `u64` | `MissingCounter` | counter 0 |
/// | `period` (totp) absent or not a positive integer | `MissingPeriod` | 30 seconds |
/// | `algorithm` unrecognized | `InvalidAlgorithm` | SHA1 |
///
/// `digits` is handled the same way under both policies: a non-integer
/// falls back to 6, an integer outside 6..=8 fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ParsePolicy {
    /// Fail on missing or unusable kind-specific items and unknown algorithms
    Strict,
    /// Substitute documented defaults
    #[default]
    Lenient,
}

impl ParsePolicy {
    /// Returns true for the strict policy.
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl fmt::Display for ParsePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Lenient => write!(f, "lenient"),
        }
    }
}
