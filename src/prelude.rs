//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use otpauth_uri::prelude::*;
//!
//! let metadata = Metadata::from_uri("otpauth://totp/Example:alice?secret=JBSWY3DPEHPK3PXP").unwrap();
//! assert_eq!(metadata.algorithm(), Algorithm::Sha1);
//! ```
//!
//! Builder state markers (`Empty`, `HasSecret`, `Ready`) are intentionally
//! excluded as they are implementation details.

pub use crate::{
    // Core types
    Algorithm, CodeLength, Label, Metadata, MetadataId, OtpKind, OtpType, ParsePolicy,
    QueryItems, Secret, UriFields, UriParser,
    // Identifiers
    IdGenerator, TypeIdGenerator,
    // Builder
    MetadataBuilder,
    // Errors
    AlgorithmError, CodeLengthError, MetadataIdError, OtpTypeError, ParseError, ParseErrorKind,
    SecretError,
    // Constants
    DEFAULT_COUNTER, DEFAULT_PERIOD_SECS, SCHEME,
};
