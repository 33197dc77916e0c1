//! OTP type discriminator and kind-specific parameters.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{DEFAULT_COUNTER, DEFAULT_PERIOD_SECS, HOTP, TOTP};
use crate::error::OtpTypeError;

/// The OTP type named by the URI host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtpType {
    /// Counter-based one-time password (RFC 4226)
    Hotp,
    /// Time-based one-time password (RFC 6238)
    Totp,
}

impl OtpType {
    /// Returns the host value for this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hotp => HOTP,
            Self::Totp => TOTP,
        }
    }
}

impl fmt::Display for OtpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OtpType {
    type Err = OtpTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            HOTP => Ok(Self::Hotp),
            TOTP => Ok(Self::Totp),
            other => Err(OtpTypeError {
                found: other.to_string(),
            }),
        }
    }
}

impl TryFrom<&str> for OtpType {
    type Error = OtpTypeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Kind-specific input to code generation.
///
/// Exactly one of a counter or a time-step is carried. The time-step of a
/// parsed credential is always positive.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use otpauth_uri::{OtpKind, OtpType};
///
/// let kind = OtpKind::TimeBased { timestep: Duration::from_secs(30) };
/// assert_eq!(kind.otp_type(), OtpType::Totp);
/// assert_eq!(kind.counter(), None);
/// assert_eq!(OtpKind::default_for(OtpType::Hotp), OtpKind::CounterBased { counter: 0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OtpKind {
    /// HOTP: the code depends on a moving counter
    CounterBased {
        /// Current counter value
        counter: u64,
    },
    /// TOTP: the code depends on the current time divided into steps
    TimeBased {
        /// Length of each time-step
        timestep: Duration,
    },
}

impl OtpKind {
    /// Returns the kind a lenient parse substitutes when the
    /// kind-specific query item is missing or unusable.
    #[must_use]
    pub const fn default_for(otp_type: OtpType) -> Self {
        match otp_type {
            OtpType::Hotp => Self::CounterBased {
                counter: DEFAULT_COUNTER,
            },
            OtpType::Totp => Self::TimeBased {
                timestep: Duration::from_secs(DEFAULT_PERIOD_SECS),
            },
        }
    }

    /// Returns the discriminator for this kind.
    #[must_use]
    pub const fn otp_type(&self) -> OtpType {
        match self {
            Self::CounterBased { .. } => OtpType::Hotp,
            Self::TimeBased { .. } => OtpType::Totp,
        }
    }

    /// Returns the counter for HOTP credentials.
    #[must_use]
    pub const fn counter(&self) -> Option<u64> {
        match self {
            Self::CounterBased { counter } => Some(*counter),
            Self::TimeBased { .. } => None,
        }
    }

    /// Returns the time-step for TOTP credentials.
    #[must_use]
    pub const fn timestep(&self) -> Option<Duration> {
        match self {
            Self::CounterBased { .. } => None,
            Self::TimeBased { timestep } => Some(*timestep),
        }
    }
}
