//! Parser and validator for `otpauth://` provisioning URIs.
//!
//! Authenticator apps are provisioned with URIs (usually delivered as QR
//! codes) that describe how to compute one-time codes for an account.
//! This crate turns such a URI into an immutable [`Metadata`] value, or
//! reports exactly which validation step rejected it.
//!
//! # Overview
//!
//! ```text
//! otpauth://{hotp|totp}/{issuer}:{account}?secret={base32}&issuer=..&algorithm=..&digits=..&counter=..&period=..
//! ```
//!
//! The crate only assembles the inputs to HOTP/TOTP code generation; it
//! does not compute codes and does not produce URIs.
//!
//! # Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use otpauth_uri::{Algorithm, CodeLength, Metadata};
//!
//! let metadata = Metadata::from_uri(
//!     "otpauth://totp/Example:alice@example.com?secret=JBSWY3DPEHPK3PXP&issuer=Example&period=30"
//! ).unwrap();
//!
//! assert_eq!(metadata.issuer(), Some("Example"));
//! assert_eq!(metadata.account(), Some("alice@example.com"));
//! assert_eq!(metadata.algorithm(), Algorithm::Sha1);
//! assert_eq!(metadata.code_length(), CodeLength::Six);
//! assert_eq!(metadata.timestep(), Some(Duration::from_secs(30)));
//! ```
//!
//! # Strict and Lenient Parsing
//!
//! [`UriParser`] takes a [`ParsePolicy`]. The default, lenient policy
//! substitutes a counter of 0, a 30 second period and SHA1 when those
//! items are missing or unusable; the strict policy rejects the URI.
//!
//! ```rust
//! use otpauth_uri::{ParseErrorKind, ParsePolicy, UriParser};
//!
//! let uri = "otpauth://hotp/Example:bob?secret=JBSWY3DPEHPK3PXP";
//!
//! assert_eq!(UriParser::default().parse(uri).unwrap().kind().counter(), Some(0));
//!
//! let err = UriParser::new(ParsePolicy::Strict).parse(uri).unwrap_err();
//! assert_eq!(err.kind(), ParseErrorKind::MissingCounter);
//! ```
//!
//! # Defaults
//!
//! | Item | Absent | Unusable |
//! |------|--------|----------|
//! | `algorithm` | SHA1 | SHA1 (lenient) / error (strict) |
//! | `digits` | 6 | 6 if not an integer, error if outside 6..=8 |
//! | `counter` | 0 (lenient) / error (strict) | same as absent |
//! | `period` | 30s (lenient) / error (strict) | same as absent |

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod algorithm;
mod builder;
mod code_length;
mod constants;
mod error;
mod kind;
mod label;
mod metadata;
mod parser;
mod policy;
pub mod prelude;
mod query;
mod secret;

pub use algorithm::Algorithm;
pub use builder::{Empty, HasSecret, MetadataBuilder, Ready};
pub use code_length::CodeLength;
pub use constants::{
    ALGORITHM_KEY, COUNTER_KEY, DEFAULT_COUNTER, DEFAULT_PERIOD_SECS, DIGITS_KEY, HOTP,
    ID_PREFIX, ISSUER_KEY, PERIOD_KEY, SCHEME, SECRET_KEY, TOTP,
};
pub use error::{
    AlgorithmError, CodeLengthError, MetadataIdError, OtpTypeError, ParseError, ParseErrorKind,
    SecretError,
};
pub use kind::{OtpKind, OtpType};
pub use label::Label;
pub use metadata::{IdGenerator, Metadata, MetadataId, TypeIdGenerator};
pub use parser::{UriFields, UriParser};
pub use policy::ParsePolicy;
pub use query::QueryItems;
pub use secret::Secret;
