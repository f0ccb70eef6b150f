//! Density binder: wires the selection control to the root style and cookie.
//!
//! Runs once at page-ready. If the control exists, every change event sets
//! the configured custom property on the root element and persists the
//! value to a cookie. Neither side is ever read back; the page is expected
//! to render the stored density itself.

use std::rc::Rc;

use crate::config::BinderConfig;
use crate::cookie::{Cookie, CookieWriter};
use crate::density::Density;
use crate::error::{CookieError, HostError};
use crate::host::{Clock, CookieJar, Document, ValueControl};

#[cfg(test)]
#[path = "binder_test.rs"]
mod binder_test;

/// Lifecycle of a [`DensityBinder`]. `Inert` and `Bound` are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Binding {
    /// Page-ready has not fired yet.
    #[default]
    Unbound,
    /// Page-ready fired but the control was not found (or refused the
    /// listener). Nothing further happens for the page's lifetime.
    Inert,
    /// Listener attached.
    Bound,
}

/// Result of applying one density change.
#[derive(Debug)]
pub struct ApplyOutcome {
    pub style: Result<(), HostError>,
    pub cookie: Result<Cookie, CookieError>,
}

impl ApplyOutcome {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.style.is_ok() && self.cookie.is_ok()
    }
}

/// Apply `density` to the root style, then persist it.
///
/// The cookie is written even if the style update fails.
#[must_use]
pub fn apply_density<D, J, C>(
    doc: &D,
    writer: &CookieWriter<J, C>,
    config: &BinderConfig,
    density: &Density,
) -> ApplyOutcome
where
    D: Document + ?Sized,
    J: CookieJar,
    C: Clock,
{
    let style = doc.set_root_property(&config.property, density.as_str());
    let cookie = writer.write_for_days(&config.cookie_name, density.as_str(), config.expiry_days);
    ApplyOutcome { style, cookie }
}

/// Binds one selection control for the lifetime of the page.
pub struct DensityBinder<D, J, C> {
    doc: Rc<D>,
    writer: Rc<CookieWriter<J, C>>,
    config: Rc<BinderConfig>,
    state: Binding,
}

impl<D, J, C> DensityBinder<D, J, C>
where
    D: Document + 'static,
    J: CookieJar + 'static,
    C: Clock + 'static,
{
    #[must_use]
    pub fn new(doc: Rc<D>, writer: CookieWriter<J, C>, config: BinderConfig) -> Self {
        Self {
            doc,
            writer: Rc::new(writer),
            config: Rc::new(config),
            state: Binding::Unbound,
        }
    }

    #[must_use]
    pub fn state(&self) -> Binding {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    /// Page-ready step. Idempotent: only the first call does anything.
    pub fn bind(&mut self) -> Binding {
        if self.state != Binding::Unbound {
            return self.state;
        }

        let Some(control) = self.doc.control_by_id(&self.config.selector_id) else {
            log::debug!("#{} not found; density binder inert", self.config.selector_id);
            self.state = Binding::Inert;
            return self.state;
        };

        let doc = Rc::clone(&self.doc);
        let writer = Rc::clone(&self.writer);
        let config = Rc::clone(&self.config);
        let handler = Box::new(move |value: String| {
            let density = Density::from(value);
            let outcome = apply_density(&*doc, &*writer, &*config, &density);
            if let Err(err) = outcome.style {
                log::warn!("density {density}: style not applied: {err}");
            }
            if let Err(err) = outcome.cookie {
                log::warn!("density {density}: not persisted: {err}");
            }
        });

        self.state = match control.on_change(handler) {
            Ok(()) => {
                log::debug!("density binder attached to #{}", self.config.selector_id);
                Binding::Bound
            }
            Err(err) => {
                log::warn!("density binder could not attach: {err}");
                Binding::Inert
            }
        };
        self.state
    }
}
