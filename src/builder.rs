//! Typestate builder for constructing [`Metadata`] instances.
//!
//! The required components travel inside the state types, so a builder
//! can only be finished once both a secret and a kind have been given.

use crate::algorithm::Algorithm;
use crate::code_length::CodeLength;
use crate::kind::OtpKind;
use crate::metadata::{IdGenerator, Metadata, TypeIdGenerator};
use crate::parser::UriFields;
use crate::secret::Secret;

/// Marker: No required components set yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

/// State: The secret has been set.
#[derive(Debug, Clone)]
pub struct HasSecret(Secret);

/// State: Secret and kind have been set, ready to build.
#[derive(Debug, Clone)]
pub struct Ready(Secret, OtpKind);

/// A typestate builder for constructing [`Metadata`] instances.
///
/// The secret must be set first, then the kind. Issuer, account,
/// algorithm and code length are optional and can be set at any point;
/// algorithm defaults to SHA1 and code length to 6.
///
/// # Examples
///
/// ```
/// use otpauth_uri::{Algorithm, MetadataBuilder, OtpKind, Secret};
///
/// let metadata = MetadataBuilder::new()
///     .issuer("Example")
///     .secret(Secret::from_base32("JBSWY3DPEHPK3PXP").unwrap())
///     .kind(OtpKind::CounterBased { counter: 0 })
///     .algorithm(Algorithm::Sha256)
///     .build();
///
/// assert_eq!(metadata.issuer(), Some("Example"));
/// assert_eq!(metadata.algorithm(), Algorithm::Sha256);
/// assert_eq!(metadata.code_length().digits(), 6);
/// ```
///
/// # Compile-Time Safety
///
/// ```compile_fail
/// use otpauth_uri::{MetadataBuilder, OtpKind};
///
/// // Error: cannot call kind() before secret()
/// let builder = MetadataBuilder::new()
///     .kind(OtpKind::CounterBased { counter: 0 });
/// ```
///
/// ```compile_fail
/// use otpauth_uri::{MetadataBuilder, Secret};
///
/// // Error: cannot call build() without a kind
/// let metadata = MetadataBuilder::new()
///     .secret(Secret::from_base32("JBSWY3DPEHPK3PXP").unwrap())
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct MetadataBuilder<State = Empty> {
    issuer: Option<String>,
    account: Option<String>,
    algorithm: Algorithm,
    code_length: CodeLength,
    state: State,
}

impl MetadataBuilder<Empty> {
    /// Creates a new builder in the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            issuer: None,
            account: None,
            algorithm: Algorithm::default(),
            code_length: CodeLength::default(),
            state: Empty,
        }
    }

    /// Sets the secret and advances to the [`HasSecret`] state.
    #[must_use]
    pub fn secret(self, secret: Secret) -> MetadataBuilder<HasSecret> {
        self.map_state(|Empty| HasSecret(secret))
    }
}

impl Default for MetadataBuilder<Empty> {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataBuilder<HasSecret> {
    /// Sets the counter or time-step and advances to the [`Ready`] state.
    #[must_use]
    pub fn kind(self, kind: OtpKind) -> MetadataBuilder<Ready> {
        self.map_state(|HasSecret(secret)| Ready(secret, kind))
    }
}

impl MetadataBuilder<Ready> {
    /// Builds the metadata with a fresh `TypeID`.
    #[must_use]
    pub fn build(self) -> Metadata {
        self.build_with(&TypeIdGenerator)
    }

    /// Builds the metadata, drawing its id from `generator`.
    #[must_use]
    pub fn build_with(self, generator: &dyn IdGenerator) -> Metadata {
        let Ready(secret, kind) = self.state;
        Metadata::from_fields(
            UriFields {
                issuer: self.issuer,
                account: self.account,
                secret,
                code_length: self.code_length,
                algorithm: self.algorithm,
                kind,
            },
            generator,
        )
    }
}

impl<State> MetadataBuilder<State> {
    /// Sets the issuer.
    #[must_use]
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Sets the account.
    #[must_use]
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Sets the hash algorithm.
    #[must_use]
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the code length.
    #[must_use]
    pub fn code_length(mut self, code_length: CodeLength) -> Self {
        self.code_length = code_length;
        self
    }

    fn map_state<Next>(self, advance: impl FnOnce(State) -> Next) -> MetadataBuilder<Next> {
        MetadataBuilder {
            issuer: self.issuer,
            account: self.account,
            algorithm: self.algorithm,
            code_length: self.code_length,
            state: advance(self.state),
        }
    }
}
