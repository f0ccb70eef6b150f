//! Error types shared by the cookie writer, host bindings, and config loader.

/// Error returned when persisting a cookie fails.
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    /// The host cookie store refused the assignment (storage disabled,
    /// sandboxed document, no document at all).
    #[error("cookie store rejected write: {0}")]
    Rejected(String),
    /// `days` from now overflows a millisecond timestamp.
    #[error("cookie expiry overflows: {days} days from now")]
    ExpiryOverflow { days: i64 },
    /// The expiry (epoch ms) is not a representable calendar date.
    #[error("cookie expiry out of range: {0} ms")]
    ExpiryOutOfRange(i64),
}

/// Error returned by a [`Document`](crate::host::Document) or
/// [`ValueControl`](crate::host::ValueControl) implementation.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// A required browser object (window, document, root element) is missing.
    #[error("host object unavailable: {0}")]
    Unavailable(&'static str),
    /// The host threw while performing the operation.
    #[error("host rejected operation: {0}")]
    Rejected(String),
}

/// Error returned by [`BinderConfig::from_json`](crate::config::BinderConfig::from_json).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid binder config: {0}")]
    Parse(#[from] serde_json::Error),
}
