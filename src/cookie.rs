//! Cookie serialization and the cookie writer.
//!
//! Produces exactly one assignment per write:
//!
//! ```text
//! <name>=<value>; expires=<RFC 1123 date>; path=/
//! ```
//!
//! Names and values are written verbatim. A value containing `;` or `=`
//! produces a malformed cookie; callers own that.

use std::fmt;

use chrono::{DateTime, Datelike, Utc};

use crate::consts::{COOKIE_PATH, DEFAULT_EXPIRY_DAYS, MS_PER_DAY};
use crate::error::CookieError;
use crate::host::{Clock, CookieJar};

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

// Year is written separately: chrono's `%Y` signs years above 9999.
const DAY_FORMAT: &str = "%a, %d %b";
const TIME_FORMAT: &str = "%H:%M:%S";

/// A single cookie ready to be assigned to the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub expires: DateTime<Utc>,
    pub path: String,
}

impl Cookie {
    /// Build a root-scoped cookie expiring at `expires_ms` (epoch millis).
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::ExpiryOutOfRange`] if `expires_ms` is not a
    /// representable date.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        expires_ms: i64,
    ) -> Result<Self, CookieError> {
        let expires = DateTime::<Utc>::from_timestamp_millis(expires_ms)
            .ok_or(CookieError::ExpiryOutOfRange(expires_ms))?;
        Ok(Self {
            name: name.into(),
            value: value.into(),
            expires,
            path: COOKIE_PATH.to_owned(),
        })
    }

    /// Expiry in milliseconds since the Unix epoch.
    #[must_use]
    pub fn expires_ms(&self) -> i64 {
        self.expires.timestamp_millis()
    }

    /// Expiry formatted as an HTTP date.
    #[must_use]
    pub fn expires_http_date(&self) -> String {
        http_date(&self.expires)
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; expires={}; path={}",
            self.name,
            self.value,
            self.expires_http_date(),
            self.path
        )
    }
}

/// Format a timestamp as an RFC 1123 HTTP date in GMT.
///
/// Matches `Date.prototype.toUTCString`, e.g. `Tue, 19 Oct 2027 08:00:00 GMT`:
/// the year is at least four digits, unsigned above 9999, `-` prefixed
/// before year 0.
#[must_use]
pub fn http_date(at: &DateTime<Utc>) -> String {
    let year = at.year();
    let year = if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{year:04}")
    };
    format!("{} {year} {} GMT", at.format(DAY_FORMAT), at.format(TIME_FORMAT))
}

/// Absolute expiry for a cookie written at `now_ms` that lives `days` days.
///
/// # Errors
///
/// Returns [`CookieError::ExpiryOverflow`] when `now + days` does not fit
/// in an `i64` of milliseconds.
pub fn expiry_ms(now_ms: i64, days: i64) -> Result<i64, CookieError> {
    days.checked_mul(MS_PER_DAY)
        .and_then(|span| now_ms.checked_add(span))
        .ok_or(CookieError::ExpiryOverflow { days })
}

/// Find `name` in a `document.cookie` style header (`a=1; b=2`).
///
/// Returns the first match. Entries without `=` are skipped.
#[must_use]
pub fn lookup<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Writes cookies into a [`CookieJar`] with expiry relative to a [`Clock`].
pub struct CookieWriter<J, C> {
    jar: J,
    clock: C,
}

impl<J: CookieJar, C: Clock> CookieWriter<J, C> {
    #[must_use]
    pub fn new(jar: J, clock: C) -> Self {
        Self { jar, clock }
    }

    /// The underlying jar.
    #[must_use]
    pub fn jar(&self) -> &J {
        &self.jar
    }

    /// Write a cookie with the default one-year expiry.
    ///
    /// # Errors
    ///
    /// See [`CookieWriter::write_for_days`].
    pub fn write(&self, name: &str, value: &str) -> Result<Cookie, CookieError> {
        self.write_for_days(name, value, DEFAULT_EXPIRY_DAYS)
    }

    /// Write a cookie that expires `days` days from now.
    ///
    /// Negative counts yield an already-expired cookie, which hosts treat
    /// as deletion.
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::ExpiryOverflow`] or
    /// [`CookieError::ExpiryOutOfRange`] if the expiry cannot be
    /// represented, or [`CookieError::Rejected`] if the jar refuses it.
    pub fn write_for_days(&self, name: &str, value: &str, days: i64) -> Result<Cookie, CookieError> {
        let expires = expiry_ms(now_millis(&self.clock), days)?;
        let cookie = Cookie::new(name, value, expires)?;
        self.jar.store(&cookie)?;
        log::debug!("cookie written: {cookie}");
        Ok(cookie)
    }
}

/// Clock reading truncated to whole milliseconds, as `Date.getTime` reports.
#[allow(clippy::cast_possible_truncation)]
fn now_millis<C: Clock + ?Sized>(clock: &C) -> i64 {
    clock.now_ms().trunc() as i64
}
