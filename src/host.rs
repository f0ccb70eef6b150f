//! Capabilities the binder needs from its host page.
//!
//! DESIGN
//! ======
//! The binder core never touches `web_sys` directly. Everything it needs
//! from the browser (clock, cookie store, element lookup, root style,
//! change subscription) goes through these traits, so the same logic runs
//! against the real DOM in [`crate::web`] and against in-memory doubles
//! in tests.

use crate::cookie::Cookie;
use crate::error::{CookieError, HostError};

/// Wall clock in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// The document's ambient cookie store.
pub trait CookieJar {
    /// Persist one cookie. Equivalent to assigning `document.cookie`.
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::Rejected`] when the store refuses the write.
    fn store(&self, cookie: &Cookie) -> Result<(), CookieError>;

    /// Current `name=value; name=value` header, as `document.cookie` reads.
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::Rejected`] when the store cannot be read.
    fn cookie_header(&self) -> Result<String, CookieError>;
}

/// Callback invoked with the control's value after each change.
pub type ChangeHandler = Box<dyn FnMut(String)>;

/// A control with a string value the binder can subscribe to.
pub trait ValueControl {
    /// Register `handler` for every future change. There is no way to
    /// unregister.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the host refuses the subscription.
    fn on_change(&self, handler: ChangeHandler) -> Result<(), HostError>;
}

/// The parsed page.
pub trait Document {
    type Control: ValueControl;

    /// Look up the element with `id`, whatever its kind.
    fn control_by_id(&self, id: &str) -> Option<Self::Control>;

    /// Set a custom property on the root element's inline style.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] when the root element is missing or the host
    /// rejects the property.
    fn set_root_property(&self, property: &str, value: &str) -> Result<(), HostError>;
}

impl<T: Clock + ?Sized> Clock for std::rc::Rc<T> {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

impl<T: CookieJar + ?Sized> CookieJar for std::rc::Rc<T> {
    fn store(&self, cookie: &Cookie) -> Result<(), CookieError> {
        (**self).store(cookie)
    }

    fn cookie_header(&self) -> Result<String, CookieError> {
        (**self).cookie_header()
    }
}
