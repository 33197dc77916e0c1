//! Issuer and account extraction from the URI label.

/// The issuer and account named by an otpauth label.
///
/// A label of the form `issuer:account` yields both parts. Any other
/// shape (no separator, or more than one) yields neither.
///
/// # Examples
///
/// ```
/// use otpauth_uri::Label;
///
/// let label = Label::parse("/Example:alice@example.com");
/// assert_eq!(label.issuer(), Some("Example"));
/// assert_eq!(label.account(), Some("alice@example.com"));
///
/// assert!(Label::parse("alice").is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Label {
    issuer: Option<String>,
    account: Option<String>,
}

impl Label {
    /// Separator between issuer and account.
    pub const SEPARATOR: char = ':';

    /// Splits an already percent-decoded label.
    ///
    /// One leading `/` is stripped first so a URI path can be passed as is.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let label = input.strip_prefix('/').unwrap_or(input);
        let mut parts = label.split(Self::SEPARATOR);

        match (parts.next(), parts.next(), parts.next()) {
            (Some(issuer), Some(account), None) => Self {
                issuer: Some(issuer.to_string()),
                account: Some(account.to_string()),
            },
            _ => {
                if label.matches(Self::SEPARATOR).count() > 1 {
                    tracing::debug!(label, "discarding label with more than one separator");
                }
                Self::default()
            }
        }
    }

    /// Returns the issuer named by the label.
    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// Returns the account named by the label.
    #[must_use]
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    /// Returns true if the label named neither issuer nor account.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.issuer.is_none() && self.account.is_none()
    }

    /// Consumes the label, returning `(issuer, account)`.
    #[must_use]
    pub fn into_parts(self) -> (Option<String>, Option<String>) {
        (self.issuer, self.account)
    }
}
