//! Constants for otpauth URI parsing.

/// The URI scheme.
pub const SCHEME: &str = "otpauth";

/// Host value selecting a counter-based (HOTP) credential.
pub const HOTP: &str = "hotp";

/// Host value selecting a time-based (TOTP) credential.
pub const TOTP: &str = "totp";

/// Query item carrying the Base32-encoded shared secret.
pub const SECRET_KEY: &str = "secret";

/// Query item carrying the issuer name.
pub const ISSUER_KEY: &str = "issuer";

/// Query item carrying the hash algorithm name.
pub const ALGORITHM_KEY: &str = "algorithm";

/// Query item carrying the number of code digits.
pub const DIGITS_KEY: &str = "digits";

/// Query item carrying the HOTP counter.
pub const COUNTER_KEY: &str = "counter";

/// Query item carrying the TOTP time-step in seconds.
pub const PERIOD_KEY: &str = "period";

/// Counter used when a lenient parse finds no usable `counter` item.
pub const DEFAULT_COUNTER: u64 = 0;

/// Time-step in seconds used when a lenient parse finds no usable `period` item.
pub const DEFAULT_PERIOD_SECS: u64 = 30;

/// Type prefix of generated metadata identifiers.
pub const ID_PREFIX: &str = "otp";
