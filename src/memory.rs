//! In-memory host doubles for native use and tests.

use std::cell::{Cell, RefCell};

use crate::cookie::Cookie;
use crate::error::CookieError;
use crate::host::{Clock, CookieJar};

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct FixedClock {
    now_ms: Cell<f64>,
}

impl FixedClock {
    #[must_use]
    pub fn at(now_ms: f64) -> Self {
        Self { now_ms: Cell::new(now_ms) }
    }

    pub fn advance(&self, ms: f64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }
}

/// Cookie store keyed by `(name, path)`, keeping every raw assignment.
///
/// Expiry is recorded but not enforced: an expired cookie still appears in
/// [`CookieJar::cookie_header`].
#[derive(Debug, Default)]
pub struct MemoryJar {
    cookies: RefCell<Vec<Cookie>>,
    writes: RefCell<Vec<String>>,
    rejecting: Cell<bool>,
}

impl MemoryJar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every subsequent write, as a browser with cookies disabled does.
    pub fn reject_writes(&self, rejecting: bool) {
        self.rejecting.set(rejecting);
    }

    /// The live cookie named `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Cookie> {
        self.cookies.borrow().iter().find(|c| c.name == name).cloned()
    }

    /// Every assignment string accepted so far, oldest first.
    #[must_use]
    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cookies.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.borrow().is_empty()
    }
}

impl CookieJar for MemoryJar {
    fn store(&self, cookie: &Cookie) -> Result<(), CookieError> {
        if self.rejecting.get() {
            return Err(CookieError::Rejected("cookies disabled".to_owned()));
        }
        let mut cookies = self.cookies.borrow_mut();
        match cookies
            .iter_mut()
            .find(|c| c.name == cookie.name && c.path == cookie.path)
        {
            Some(existing) => *existing = cookie.clone(),
            None => cookies.push(cookie.clone()),
        }
        self.writes.borrow_mut().push(cookie.to_string());
        Ok(())
    }

    fn cookie_header(&self) -> Result<String, CookieError> {
        Ok(self
            .cookies
            .borrow()
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; "))
    }
}
