//! The credential descriptor and its identifier.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use mti::prelude::*;

use crate::algorithm::Algorithm;
use crate::code_length::CodeLength;
use crate::constants::ID_PREFIX;
use crate::error::{MetadataIdError, ParseError};
use crate::kind::OtpKind;
use crate::parser::{UriFields, UriParser};
use crate::policy::ParsePolicy;
use crate::secret::Secret;

/// Opaque identifier of a [`Metadata`] value.
///
/// A `TypeID` with the `otp` prefix and a `UUIDv7` suffix, e.g.
/// `otp_01h455vb4pex5vsknk084sn02q`. It is never derived from, or
/// written into, a URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetadataId(MagicTypeId);

impl MetadataId {
    /// Creates a fresh identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(ID_PREFIX.create_type_id::<V7>())
    }

    /// Parses an identifier from its string form.
    ///
    /// # Errors
    ///
    /// Returns `MetadataIdError` if the prefix is not `otp` or the suffix
    /// is not a valid `TypeID` suffix.
    pub fn parse(input: &str) -> Result<Self, MetadataIdError> {
        match input.rsplit_once('_') {
            Some((ID_PREFIX, _)) => {}
            Some((prefix, _)) => {
                return Err(MetadataIdError::InvalidPrefix {
                    found: Some(prefix.to_string()),
                });
            }
            None => return Err(MetadataIdError::InvalidPrefix { found: None }),
        }

        MagicTypeId::from_str(input)
            .map(Self)
            .map_err(|e| MetadataIdError::TypeIdError(e.to_string()))
    }

    /// Returns the UUID from the suffix.
    ///
    /// # Errors
    ///
    /// Returns an error if UUID extraction fails.
    pub fn uuid(&self) -> Result<uuid::Uuid, MetadataIdError> {
        self.0
            .uuid()
            .map_err(|e| MetadataIdError::TypeIdError(e.to_string()))
    }
}

impl Default for MetadataId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MetadataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MetadataId {
    type Err = MetadataIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialOrd for MetadataId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MetadataId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_string().cmp(&other.to_string())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MetadataId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MetadataId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Source of fresh [`MetadataId`] values.
///
/// Implementations must be safe to call from many threads at once and
/// must never hand out the same identifier twice.
pub trait IdGenerator: Send + Sync {
    /// Returns a new, unique identifier.
    fn next_id(&self) -> MetadataId;
}

/// Generates `UUIDv7`-backed `TypeID`s.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeIdGenerator;

impl IdGenerator for TypeIdGenerator {
    fn next_id(&self) -> MetadataId {
        MetadataId::new()
    }
}

/// An immutable description of how to compute one-time codes for an account.
///
/// Equality compares the six content fields only; two values built from
/// the same fields are equal even though their [`id`](Self::id)s differ.
///
/// # Examples
///
/// ```
/// use otpauth_uri::{Algorithm, CodeLength, Metadata, OtpKind, Secret};
///
/// let from_uri = Metadata::from_uri("otpauth://hotp/Example:bob?secret=JBSWY3DPEHPK3PXP&counter=5").unwrap();
///
/// let direct = Metadata::new(
///     Some("Example".to_string()),
///     Some("bob".to_string()),
///     Secret::from_base32("JBSWY3DPEHPK3PXP").unwrap(),
///     CodeLength::Six,
///     Algorithm::Sha1,
///     OtpKind::CounterBased { counter: 5 },
/// );
///
/// assert_eq!(from_uri, direct);
/// assert_ne!(from_uri.id(), direct.id());
/// ```
#[derive(Debug, Clone)]
pub struct Metadata {
    id: MetadataId,
    issuer: Option<String>,
    account: Option<String>,
    secret: Secret,
    code_length: CodeLength,
    algorithm: Algorithm,
    kind: OtpKind,
}

impl Metadata {
    /// Creates metadata from already validated fields.
    #[must_use]
    pub fn new(
        issuer: Option<String>,
        account: Option<String>,
        secret: Secret,
        code_length: CodeLength,
        algorithm: Algorithm,
        kind: OtpKind,
    ) -> Self {
        Self::from_fields(
            UriFields {
                issuer,
                account,
                secret,
                code_length,
                algorithm,
                kind,
            },
            &TypeIdGenerator,
        )
    }

    /// Creates metadata from parsed fields, drawing the id from `generator`.
    #[must_use]
    pub fn from_fields(fields: UriFields, generator: &dyn IdGenerator) -> Self {
        Self {
            id: generator.next_id(),
            issuer: fields.issuer,
            account: fields.account,
            secret: fields.secret,
            code_length: fields.code_length,
            algorithm: fields.algorithm,
            kind: fields.kind,
        }
    }

    /// Parses an otpauth URI with the default (lenient) policy.
    ///
    /// # Errors
    ///
    /// Returns the parser's `ParseError` unchanged.
    pub fn from_uri(uri: &str) -> Result<Self, ParseError> {
        Self::from_uri_with(uri, ParsePolicy::default())
    }

    /// Parses an otpauth URI with the given policy.
    ///
    /// # Errors
    ///
    /// Returns the parser's `ParseError` unchanged.
    pub fn from_uri_with(uri: &str, policy: ParsePolicy) -> Result<Self, ParseError> {
        let fields = UriParser::new(policy).parse(uri)?;
        Ok(Self::from_fields(fields, &TypeIdGenerator))
    }

    /// Returns the identifier assigned at construction.
    #[must_use]
    pub const fn id(&self) -> &MetadataId {
        &self.id
    }

    /// Returns the issuer, if known.
    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// Returns the account, if known.
    #[must_use]
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    /// Returns the shared secret.
    #[must_use]
    pub const fn secret(&self) -> &Secret {
        &self.secret
    }

    /// Returns the code length.
    #[must_use]
    pub const fn code_length(&self) -> CodeLength {
        self.code_length
    }

    /// Returns the hash algorithm.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the counter or time-step.
    #[must_use]
    pub const fn kind(&self) -> OtpKind {
        self.kind
    }

    /// Returns the counter for HOTP credentials.
    #[must_use]
    pub const fn counter(&self) -> Option<u64> {
        self.kind.counter()
    }

    /// Returns the time-step for TOTP credentials.
    #[must_use]
    pub const fn timestep(&self) -> Option<Duration> {
        self.kind.timestep()
    }
}

impl PartialEq for Metadata {
    fn eq(&self, other: &Self) -> bool {
        self.issuer == other.issuer
            && self.account == other.account
            && self.secret == other.secret
            && self.code_length == other.code_length
            && self.algorithm == other.algorithm
            && self.kind == other.kind
    }
}

impl Eq for Metadata {}

impl FromStr for Metadata {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uri(s)
    }
}

impl TryFrom<&str> for Metadata {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::from_uri(s)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    use super::*;
    use crate::error::ParseErrorKind;

    fn secret() -> Secret {
        Secret::from_base32("JBSWY3DPEHPK3PXP").unwrap()
    }

    #[test]
    fn direct_and_uri_paths_agree() {
        let direct = Metadata::new(
            Some("Example".to_string()),
            Some("alice@example.com".to_string()),
            secret(),
            CodeLength::Six,
            Algorithm::Sha1,
            OtpKind::TimeBased {
                timestep: Duration::from_secs(30),
            },
        );
        let parsed = Metadata::from_uri(
            "otpauth://totp/Example:alice@example.com?secret=JBSWY3DPEHPK3PXP&issuer=Example&algorithm=SHA1&digits=6&period=30",
        )
        .unwrap();

        assert_eq!(direct, parsed);
        assert_ne!(direct.id(), parsed.id());
    }

    #[test]
    fn error_is_propagated_unchanged() {
        let uri = "otpauth://totp/Example:bob";
        let from_metadata = Metadata::from_uri(uri).unwrap_err();
        let from_parser = UriParser::default().parse(uri).unwrap_err();
        assert_eq!(from_metadata, from_parser);
        assert_eq!(from_metadata.kind(), ParseErrorKind::MissingQueryItems);
    }

    #[test]
    fn policy_is_honored() {
        let uri = "otpauth://totp/x?secret=JBSWY3DPEHPK3PXP";
        assert_eq!(
            Metadata::from_uri(uri).unwrap().timestep(),
            Some(Duration::from_secs(30))
        );
        assert_eq!(
            Metadata::from_uri_with(uri, ParsePolicy::Strict)
                .unwrap_err()
                .kind(),
            ParseErrorKind::MissingPeriod
        );
    }

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<_> = (0..1000).map(|_| MetadataId::new()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn ids_are_unique_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    (0..250)
                        .map(|_| TypeIdGenerator.next_id())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(ids.insert(id));
            }
        }
        assert_eq!(ids.len(), 2000);
    }

    #[test]
    fn id_usable_as_map_key() {
        let a = Metadata::from_uri("otpauth://totp/x?secret=JBSWY3DPEHPK3PXP").unwrap();
        let b = a.clone();
        let c = Metadata::from_uri("otpauth://totp/x?secret=JBSWY3DPEHPK3PXP").unwrap();

        let mut by_id = HashMap::new();
        by_id.insert(a.id().clone(), a);
        by_id.insert(c.id().clone(), c);
        assert_eq!(by_id.len(), 2);
        assert!(by_id.contains_key(b.id()));
    }

    #[test]
    fn injected_generator_is_used() {
        struct Counting(AtomicUsize);

        impl IdGenerator for Counting {
            fn next_id(&self) -> MetadataId {
                self.0.fetch_add(1, AtomicOrdering::SeqCst);
                MetadataId::new()
            }
        }

        let generator = Counting(AtomicUsize::new(0));
        let fields = UriParser::default()
            .parse("otpauth://hotp/x?secret=JBSWY3DPEHPK3PXP&counter=1")
            .unwrap();
        let metadata = Metadata::from_fields(fields, &generator);

        assert_eq!(generator.0.load(AtomicOrdering::SeqCst), 1);
        assert_eq!(metadata.counter(), Some(1));
    }

    #[test]
    fn id_string_roundtrip() {
        let id = MetadataId::new();
        let text = id.to_string();
        assert!(text.starts_with("otp_"));
        assert_eq!(MetadataId::parse(&text).unwrap(), id);
        assert!(id.uuid().is_ok());
    }

    #[test]
    fn id_with_foreign_prefix_fails() {
        assert!(matches!(
            MetadataId::parse("llm_01h455vb4pex5vsknk084sn02q"),
            Err(MetadataIdError::InvalidPrefix { .. })
        ));
        assert!(matches!(
            MetadataId::parse("01h455vb4pex5vsknk084sn02q"),
            Err(MetadataIdError::InvalidPrefix { found: None })
        ));
    }

    #[test]
    fn from_str_parses_uri() {
        let metadata: Metadata = "otpauth://hotp/Example:bob?secret=JBSWY3DPEHPK3PXP&counter=5"
            .parse()
            .unwrap();
        assert_eq!(metadata.issuer(), Some("Example"));
        assert_eq!(metadata.account(), Some("bob"));
        assert_eq!(metadata.counter(), Some(5));
    }
}
