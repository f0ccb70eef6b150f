//! The density preference value.
//!
//! Density is an opaque token (`"compact"`, `"1"`, `"0.75rem"`, ...) taken
//! verbatim from the selection control. No enumeration or validation is
//! applied; whatever the page offers is what gets stored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DENSITY, DENSITY_COOKIE};
use crate::cookie;
use crate::error::CookieError;
use crate::host::CookieJar;

#[cfg(test)]
#[path = "density_test.rs"]
mod density_test;

/// A user-selected density token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Density(String);

impl Density {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read the density from a `document.cookie` style header.
    ///
    /// Falls back to [`DEFAULT_DENSITY`] when the cookie is missing or empty.
    #[must_use]
    pub fn from_cookie_header(header: &str) -> Self {
        match cookie::lookup(header, DENSITY_COOKIE) {
            Some(value) if !value.is_empty() => Self::new(value),
            _ => Self::default(),
        }
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::new(DEFAULT_DENSITY)
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Density {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Density {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The density currently persisted in `jar`.
///
/// This is a query only; the binder never restores it on load.
///
/// # Errors
///
/// Returns [`CookieError::Rejected`] if the jar cannot be read.
pub fn stored_density<J: CookieJar + ?Sized>(jar: &J) -> Result<Density, CookieError> {
    let header = jar.cookie_header()?;
    Ok(Density::from_cookie_header(&header))
}
