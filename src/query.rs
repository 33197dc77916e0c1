//! Query items of an otpauth URI.

use std::collections::BTreeMap;
use std::num::IntErrorKind;

use url::form_urlencoded;

use crate::constants::{
    ALGORITHM_KEY, COUNTER_KEY, DIGITS_KEY, ISSUER_KEY, PERIOD_KEY, SECRET_KEY,
};

/// Decoded query items of an otpauth URI.
///
/// Names are matched case-sensitively. When a name repeats, the first
/// occurrence wins.
///
/// # Recognized Items
///
/// - `secret`: Base32 shared secret
/// - `issuer`: Service name
/// - `algorithm`: Hash algorithm name
/// - `digits`: Code length
/// - `counter`: HOTP counter
/// - `period`: TOTP time-step in seconds
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryItems {
    items: BTreeMap<String, String>,
}

impl QueryItems {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string (without leading '?').
    ///
    /// `+` and percent escapes are decoded; malformed escapes are kept
    /// literally rather than rejected.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut items = BTreeMap::new();

        for (name, value) in form_urlencoded::parse(input.as_bytes()) {
            if name.is_empty() {
                continue;
            }
            items
                .entry(name.into_owned())
                .or_insert_with(|| value.into_owned());
        }

        Self { items }
    }

    /// Returns the value for an item, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items.get(name).map(String::as_str)
    }

    /// Returns true if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the `secret` item, if present.
    #[must_use]
    pub fn secret(&self) -> Option<&str> {
        self.get(SECRET_KEY)
    }

    /// Returns the `issuer` item, if present.
    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.get(ISSUER_KEY)
    }

    /// Returns the `algorithm` item, if present.
    #[must_use]
    pub fn algorithm(&self) -> Option<&str> {
        self.get(ALGORITHM_KEY)
    }

    /// Returns the `digits` item parsed as an integer.
    ///
    /// Absent and non-integer values both yield `None`. Integers too large
    /// for `i64` saturate, so they still read as out of range.
    #[must_use]
    pub fn digits(&self) -> Option<i64> {
        match self.get(DIGITS_KEY)?.parse::<i64>() {
            Ok(digits) => Some(digits),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Some(i64::MAX),
                IntErrorKind::NegOverflow => Some(i64::MIN),
                _ => None,
            },
        }
    }

    /// Returns the `counter` item parsed as an unsigned 64-bit integer.
    #[must_use]
    pub fn counter(&self) -> Option<u64> {
        self.get(COUNTER_KEY).and_then(|s| s.parse().ok())
    }

    /// Returns the `period` item parsed as a positive number of seconds.
    #[must_use]
    pub fn period(&self) -> Option<u64> {
        self.get(PERIOD_KEY)
            .and_then(|s| s.parse().ok())
            .filter(|&secs| secs > 0)
    }
}
