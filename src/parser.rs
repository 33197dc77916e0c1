//! The otpauth URI parser.

use std::str::FromStr;
use std::time::Duration;

use url::{Host, Url};

use crate::algorithm::Algorithm;
use crate::code_length::CodeLength;
use crate::constants::SCHEME;
use crate::error::{ParseError, ParseErrorKind, SecretError};
use crate::kind::{OtpKind, OtpType};
use crate::label::Label;
use crate::policy::ParsePolicy;
use crate::query::QueryItems;
use crate::secret::Secret;

/// The descriptor fields extracted from an otpauth URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriFields {
    pub(crate) issuer: Option<String>,
    pub(crate) account: Option<String>,
    pub(crate) secret: Secret,
    pub(crate) code_length: CodeLength,
    pub(crate) algorithm: Algorithm,
    pub(crate) kind: OtpKind,
}

impl UriFields {
    /// Returns the issuer, from the label or else the `issuer` item.
    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// Returns the account named by the label.
    #[must_use]
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    /// Returns the decoded secret.
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
}

/// Parses otpauth URIs into [`UriFields`].
///
/// The parser holds only its [`ParsePolicy`]; it is `Copy` and can be
/// shared freely between threads.
///
/// # Validation Order
///
/// 1. The input must be a URI (`InvalidUri`).
/// 2. The scheme must be exactly `otpauth` (`MissingScheme`, `InvalidScheme`).
/// 3. The host must be `hotp` or `totp` (`MissingOtpType`, `InvalidOtpType`).
/// 4. A query component must be present, even if empty (`MissingQueryItems`).
/// 5. `counter` or `period`, per policy (`MissingCounter`, `MissingPeriod`).
/// 6. `secret` must be present and valid Base32 (`MissingSecret`, `InvalidSecret`).
/// 7. The label is split into issuer and account (never fails on shape).
/// 8. `algorithm`, per policy (`InvalidAlgorithm`).
/// 9. `digits` (`InvalidCodeLength`).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use otpauth_uri::{Algorithm, CodeLength, OtpKind, UriParser};
///
/// let fields = UriParser::default()
///     .parse("otpauth://totp/Example:alice@example.com?secret=JBSWY3DPEHPK3PXP&issuer=Example&period=30")
///     .unwrap();
///
/// assert_eq!(fields.issuer(), Some("Example"));
/// assert_eq!(fields.account(), Some("alice@example.com"));
/// assert_eq!(fields.algorithm(), Algorithm::Sha1);
/// assert_eq!(fields.code_length(), CodeLength::Six);
/// assert_eq!(fields.kind(), OtpKind::TimeBased { timestep: Duration::from_secs(30) });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UriParser {
    policy: ParsePolicy,
}

impl UriParser {
    /// Creates a parser with the given policy.
    #[must_use]
    pub const fn new(policy: ParsePolicy) -> Self {
        Self { policy }
    }

    /// Creates a parser that fails on missing kind-specific items and
    /// unknown algorithms.
    #[must_use]
    pub const fn strict() -> Self {
        Self::new(ParsePolicy::Strict)
    }

    /// Creates a parser that substitutes defaults.
    #[must_use]
    pub const fn lenient() -> Self {
        Self::new(ParsePolicy::Lenient)
    }

    /// Returns the policy this parser applies.
    #[must_use]
    pub const fn policy(&self) -> ParsePolicy {
        self.policy
    }

    /// Parses an otpauth URI.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` naming the first validation step that failed;
    /// see the type-level documentation for the order.
    pub fn parse(&self, input: &str) -> Result<UriFields, ParseError> {
        self.parse_inner(input).map_err(|kind| {
            tracing::trace!(%kind, policy = %self.policy, "rejected otpauth URI");
            ParseError::new(input, kind)
        })
    }

    fn parse_inner(&self, input: &str) -> Result<UriFields, ParseErrorKind> {
        let url = Url::parse(input).map_err(|e| match e {
            url::ParseError::RelativeUrlWithoutBase => ParseErrorKind::MissingScheme,
            _ => ParseErrorKind::InvalidUri,
        })?;

        Self::check_scheme(input, &url)?;

        let otp_type = Self::otp_type(&url)?;

        // An empty query is fine here; only a missing one is rejected
        let query = url
            .query()
            .map(QueryItems::parse)
            .ok_or(ParseErrorKind::MissingQueryItems)?;

        let kind = self.kind(otp_type, &query)?;

        let secret = Self::secret(&query)?;

        let (label_issuer, account) = Self::label(&url)?.into_parts();
        let issuer = label_issuer.or_else(|| query.issuer().map(str::to_string));

        let algorithm = self.algorithm(&query)?;

        let code_length = Self::code_length(&query)?;

        Ok(UriFields {
            issuer,
            account,
            secret,
            code_length,
            algorithm,
            kind,
        })
    }

    fn check_scheme(input: &str, url: &Url) -> Result<(), ParseErrorKind> {
        // `Url` lowercases the scheme, so compare against the raw text too
        let raw = input
            .trim_start_matches(|c: char| c <= ' ')
            .split(':')
            .next();

        if url.scheme() == SCHEME && raw == Some(SCHEME) {
            Ok(())
        } else {
            Err(ParseErrorKind::InvalidScheme)
        }
    }

    fn otp_type(url: &Url) -> Result<OtpType, ParseErrorKind> {
        match url.host() {
            None => Err(ParseErrorKind::MissingOtpType),
            Some(Host::Domain("")) => Err(ParseErrorKind::MissingOtpType),
            Some(Host::Domain(host)) => host
                .parse::<OtpType>()
                .map_err(|_| ParseErrorKind::InvalidOtpType),
            Some(Host::Ipv4(_) | Host::Ipv6(_)) => Err(ParseErrorKind::InvalidOtpType),
        }
    }

    fn kind(&self, otp_type: OtpType, query: &QueryItems) -> Result<OtpKind, ParseErrorKind> {
        match otp_type {
            OtpType::Hotp => match query.counter() {
                Some(counter) => Ok(OtpKind::CounterBased { counter }),
                None if self.policy.is_strict() => Err(ParseErrorKind::MissingCounter),
                None => {
                    let kind = OtpKind::default_for(otp_type);
                    tracing::debug!(?kind, "no usable counter, using default");
                    Ok(kind)
                }
            },
            OtpType::Totp => match query.period() {
                Some(secs) => Ok(OtpKind::TimeBased {
                    timestep: Duration::from_secs(secs),
                }),
                None if self.policy.is_strict() => Err(ParseErrorKind::MissingPeriod),
                None => {
                    let kind = OtpKind::default_for(otp_type);
                    tracing::debug!(?kind, "no usable period, using default");
                    Ok(kind)
                }
            },
        }
    }

    fn secret(query: &QueryItems) -> Result<Secret, ParseErrorKind> {
        let text = query.secret().ok_or(ParseErrorKind::MissingSecret)?;
        Secret::from_base32(text).map_err(|e| match e {
            SecretError::Empty => ParseErrorKind::MissingSecret,
            SecretError::InvalidBase32(e) => ParseErrorKind::InvalidSecret(e),
        })
    }

    fn label(url: &Url) -> Result<Label, ParseErrorKind> {
        let path =
            urlencoding::decode(url.path()).map_err(|_| ParseErrorKind::InvalidUri)?;
        Ok(Label::parse(&path))
    }

    fn algorithm(&self, query: &QueryItems) -> Result<Algorithm, ParseErrorKind> {
        let Some(name) = query.algorithm() else {
            return Ok(Algorithm::default());
        };

        match Algorithm::from_name(name) {
            Some(algorithm) => Ok(algorithm),
            None if self.policy.is_strict() => Err(ParseErrorKind::InvalidAlgorithm),
            None => {
                tracing::debug!(name, "unknown algorithm, using default");
                Ok(Algorithm::default())
            }
        }
    }

    fn code_length(query: &QueryItems) -> Result<CodeLength, ParseErrorKind> {
        match query.digits() {
            Some(digits) => {
                CodeLength::from_digits(digits).map_err(|_| ParseErrorKind::InvalidCodeLength)
            }
            None => Ok(CodeLength::default()),
        }
    }
}

impl FromStr for UriFields {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UriParser::default().parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JBSWY: &[u8] = b"Hello!\xde\xad\xbe\xef";

    fn lenient(input: &str) -> Result<UriFields, ParseErrorKind> {
        UriParser::lenient().parse(input).map_err(|e| e.kind)
    }

    fn strict(input: &str) -> Result<UriFields, ParseErrorKind> {
        UriParser::strict().parse(input).map_err(|e| e.kind)
    }

    #[test]
    fn parse_full_totp() {
        let fields = lenient(
            "otpauth://totp/Example:alice@example.com?secret=JBSWY3DPEHPK3PXP&issuer=Example&algorithm=SHA1&digits=6&period=30",
        )
        .unwrap();

        assert_eq!(fields.issuer(), Some("Example"));
        assert_eq!(fields.account(), Some("alice@example.com"));
        assert_eq!(fields.algorithm(), Algorithm::Sha1);
        assert_eq!(fields.code_length(), CodeLength::Six);
        assert_eq!(
            fields.kind(),
            OtpKind::TimeBased {
                timestep: Duration::from_secs(30)
            }
        );
        assert_eq!(fields.secret().as_bytes(), JBSWY);
    }

    #[test]
    fn parse_hotp_with_defaults() {
        let fields = strict("otpauth://hotp/Example:bob?secret=JBSWY3DPEHPK3PXP&counter=5").unwrap();

        assert_eq!(fields.kind(), OtpKind::CounterBased { counter: 5 });
        assert_eq!(fields.code_length(), CodeLength::Six);
        assert_eq!(fields.algorithm(), Algorithm::Sha1);
    }

    #[test]
    fn parse_max_counter() {
        let fields = strict(&format!(
            "otpauth://hotp/x?secret=JBSWY3DPEHPK3PXP&counter={}",
            u64::MAX
        ))
        .unwrap();
        assert_eq!(fields.kind().counter(), Some(u64::MAX));
    }

    #[test]
    fn parse_non_default_algorithm_and_length() {
        let fields =
            strict("otpauth://totp/x?secret=JBSWY3DPEHPK3PXP&period=60&algorithm=sha512&digits=8")
                .unwrap();
        assert_eq!(fields.algorithm(), Algorithm::Sha512);
        assert_eq!(fields.code_length(), CodeLength::Eight);
        assert_eq!(fields.kind().timestep(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn not_a_uri() {
        assert_eq!(lenient("otpauth://[::1").unwrap_err(), ParseErrorKind::InvalidUri);
    }

    #[test]
    fn missing_scheme() {
        assert_eq!(
            lenient("totp/Example?secret=JBSWY3DPEHPK3PXP").unwrap_err(),
            ParseErrorKind::MissingScheme
        );
        assert_eq!(lenient("").unwrap_err(), ParseErrorKind::MissingScheme);
    }

    #[test]
    fn wrong_scheme() {
        assert_eq!(
            lenient("http://totp/Example?secret=JBSWY3DPEHPK3PXP&period=30").unwrap_err(),
            ParseErrorKind::InvalidScheme
        );
    }

    #[test]
    fn scheme_is_case_sensitive() {
        assert_eq!(
            lenient("OTPAUTH://totp/Example?secret=JBSWY3DPEHPK3PXP").unwrap_err(),
            ParseErrorKind::InvalidScheme
        );
    }

    #[test]
    fn missing_otp_type() {
        assert_eq!(
            lenient("otpauth:totp?secret=JBSWY3DPEHPK3PXP").unwrap_err(),
            ParseErrorKind::MissingOtpType
        );
    }

    #[test]
    fn unknown_otp_type() {
        assert_eq!(
            lenient("otpauth://motp/Example?secret=JBSWY3DPEHPK3PXP").unwrap_err(),
            ParseErrorKind::InvalidOtpType
        );
        assert_eq!(
            lenient("otpauth://TOTP/Example?secret=JBSWY3DPEHPK3PXP").unwrap_err(),
            ParseErrorKind::InvalidOtpType
        );
        assert_eq!(
            lenient("otpauth://127.0.0.1/Example?secret=JBSWY3DPEHPK3PXP").unwrap_err(),
            ParseErrorKind::InvalidOtpType
        );
    }

    #[test]
    fn no_query_is_missing_query_items() {
        assert_eq!(
            lenient("otpauth://hotp/Example:bob").unwrap_err(),
            ParseErrorKind::MissingQueryItems
        );
        assert_eq!(
            strict("otpauth://totp/Example:bob").unwrap_err(),
            ParseErrorKind::MissingQueryItems
        );
    }

    #[test]
    fn empty_query_is_not_missing_query_items() {
        assert_eq!(
            lenient("otpauth://totp/Example:bob?").unwrap_err(),
            ParseErrorKind::MissingSecret
        );
    }

    #[test]
    fn strict_requires_counter() {
        assert_eq!(
            strict("otpauth://hotp/x?secret=JBSWY3DPEHPK3PXP").unwrap_err(),
            ParseErrorKind::MissingCounter
        );
        assert_eq!(
            strict("otpauth://hotp/x?secret=JBSWY3DPEHPK3PXP&counter=-3").unwrap_err(),
            ParseErrorKind::MissingCounter
        );
    }

    #[test]
    fn strict_requires_period() {
        assert_eq!(
            strict("otpauth://totp/x?secret=JBSWY3DPEHPK3PXP").unwrap_err(),
            ParseErrorKind::MissingPeriod
        );
        assert_eq!(
            strict("otpauth://totp/x?secret=JBSWY3DPEHPK3PXP&period=0").unwrap_err(),
            ParseErrorKind::MissingPeriod
        );
    }

    #[test]
    fn lenient_defaults_counter_and_period() {
        let hotp = lenient("otpauth://hotp/x?secret=JBSWY3DPEHPK3PXP&counter=abc").unwrap();
        assert_eq!(hotp.kind(), OtpKind::CounterBased { counter: 0 });

        let totp = lenient("otpauth://totp/x?secret=JBSWY3DPEHPK3PXP").unwrap();
        assert_eq!(totp.kind().timestep(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn kind_check_precedes_secret_check() {
        assert_eq!(
            strict("otpauth://totp/x?issuer=Example").unwrap_err(),
            ParseErrorKind::MissingPeriod
        );
    }

    #[test]
    fn counter_ignored_for_totp() {
        let fields = lenient("otpauth://totp/x?secret=JBSWY3DPEHPK3PXP&counter=9").unwrap();
        assert_eq!(fields.kind().counter(), None);
    }

    #[test]
    fn missing_secret() {
        assert_eq!(
            lenient("otpauth://totp/x?issuer=Example").unwrap_err(),
            ParseErrorKind::MissingSecret
        );
        assert_eq!(
            lenient("otpauth://totp/x?secret=").unwrap_err(),
            ParseErrorKind::MissingSecret
        );
    }

    #[test]
    fn invalid_secret_is_distinct() {
        assert!(matches!(
            lenient("otpauth://totp/x?secret=not*base32").unwrap_err(),
            ParseErrorKind::InvalidSecret(_)
        ));
    }

    #[test]
    fn secret_accepts_padding_and_lowercase() {
        let fields = lenient(
            "otpauth://totp/BigTech%3Aexample%40company.com?secret=gkjeixzp5xmm37meoimq====",
        )
        .unwrap();
        assert_eq!(
            fields.secret().as_bytes(),
            b"\x32\x92\x44\x5F\x2F\xED\xD8\xCD\xFD\x84\x72\x19"
        );
        assert_eq!(fields.issuer(), Some("BigTech"));
        assert_eq!(fields.account(), Some("example@company.com"));
    }

    #[test]
    fn secret_with_nonzero_trailing_bits() {
        let fields = strict("otpauth://totp/x?secret=JBSWY3DPEB&period=30").unwrap();
        assert_eq!(fields.secret().as_bytes(), b"Hello ");

        let fields =
            strict("otpauth://totp/x?secret=JBSWY3DPEHPK3PXPJBSWY3DPEH&period=30").unwrap();
        assert_eq!(fields.secret().len(), 16);
        assert_eq!(&fields.secret().as_bytes()[..10], JBSWY);
    }

    #[test]
    fn label_issuer_beats_query_issuer() {
        let fields =
            lenient("otpauth://totp/LabelCo:alice?secret=JBSWY3DPEHPK3PXP&issuer=QueryCo").unwrap();
        assert_eq!(fields.issuer(), Some("LabelCo"));
    }

    #[test]
    fn query_issuer_used_without_label_issuer() {
        let fields =
            lenient("otpauth://totp/noColon?secret=JBSWY3DPEHPK3PXP&issuer=QueryCo").unwrap();
        assert_eq!(fields.issuer(), Some("QueryCo"));
        assert_eq!(fields.account(), None);
    }

    #[test]
    fn label_without_issuer_or_query_issuer() {
        let fields = lenient("otpauth://totp/noColon?secret=JBSWY3DPEHPK3PXP").unwrap();
        assert_eq!(fields.issuer(), None);
        assert_eq!(fields.account(), None);
    }

    #[test]
    fn label_with_many_separators_is_discarded() {
        let fields =
            lenient("otpauth://totp/a:b:c?secret=JBSWY3DPEHPK3PXP&issuer=QueryCo").unwrap();
        assert_eq!(fields.issuer(), Some("QueryCo"));
        assert_eq!(fields.account(), None);
    }

    #[test]
    fn label_is_percent_decoded() {
        let fields = lenient("otpauth://totp/Big%20Tech:J%C3%BCrgen?secret=JBSWY3DPEHPK3PXP").unwrap();
        assert_eq!(fields.issuer(), Some("Big Tech"));
        assert_eq!(fields.account(), Some("Jürgen"));
    }

    #[test]
    fn label_with_invalid_utf8_is_invalid_uri() {
        assert_eq!(
            lenient("otpauth://totp/%FF:bob?secret=JBSWY3DPEHPK3PXP").unwrap_err(),
            ParseErrorKind::InvalidUri
        );
    }

    #[test]
    fn unknown_algorithm_per_policy() {
        let uri = "otpauth://totp/x?secret=JBSWY3DPEHPK3PXP&period=30&algorithm=MD5";
        assert_eq!(lenient(uri).unwrap().algorithm(), Algorithm::Sha1);
        assert_eq!(strict(uri).unwrap_err(), ParseErrorKind::InvalidAlgorithm);
    }

    #[test]
    fn unparseable_digits_default_to_six() {
        let fields = strict("otpauth://totp/x?secret=JBSWY3DPEHPK3PXP&period=30&digits=six").unwrap();
        assert_eq!(fields.code_length(), CodeLength::Six);
    }

    #[test]
    fn out_of_set_digits_fail() {
        for digits in ["5", "9", "10", "0", "-6"] {
            let uri = format!("otpauth://totp/x?secret=JBSWY3DPEHPK3PXP&digits={digits}");
            assert_eq!(lenient(&uri).unwrap_err(), ParseErrorKind::InvalidCodeLength);
        }
    }

    #[test]
    fn overflowing_digits_fail() {
        for digits in ["99999999999999999999", "-99999999999999999999"] {
            let uri =
                format!("otpauth://totp/x?secret=JBSWY3DPEHPK3PXP&period=30&digits={digits}");
            assert_eq!(strict(&uri).unwrap_err(), ParseErrorKind::InvalidCodeLength);
        }
    }

    #[test]
    fn query_names_are_case_sensitive() {
        assert_eq!(
            lenient("otpauth://totp/x?SECRET=JBSWY3DPEHPK3PXP").unwrap_err(),
            ParseErrorKind::MissingSecret
        );
    }

    #[test]
    fn error_keeps_input() {
        let err = UriParser::default().parse("http://totp/x?secret=A").unwrap_err();
        assert_eq!(err.input, "http://totp/x?secret=A");
        assert_eq!(err.kind(), ParseErrorKind::InvalidScheme);
    }

    #[test]
    fn from_str_uses_lenient_policy() {
        let fields: UriFields = "otpauth://totp/x?secret=JBSWY3DPEHPK3PXP".parse().unwrap();
        assert_eq!(fields.kind().timestep(), Some(Duration::from_secs(30)));
    }
}
