//! Browser bindings for the density binder.
//!
//! Implements the [`crate::host`] traits over `web_sys` and exposes the
//! WASM entry points. Requires the `web` feature and a browser environment.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Element, Event, HtmlDocument, HtmlElement};

use crate::binder::DensityBinder;
use crate::config::BinderConfig;
use crate::consts::{CHANGE_EVENT, READY_EVENT};
use crate::cookie::{Cookie, CookieWriter};
use crate::error::{CookieError, HostError};
use crate::host::{ChangeHandler, Clock, CookieJar, Document, ValueControl};

/// `Date.now()`.
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

/// `document.cookie`.
pub struct BrowserJar {
    document: HtmlDocument,
}

impl BrowserJar {
    /// # Errors
    ///
    /// Returns [`HostError::Unavailable`] if `document` is not an HTML document.
    pub fn new(document: &web_sys::Document) -> Result<Self, HostError> {
        let document = document
            .clone()
            .dyn_into::<HtmlDocument>()
            .map_err(|_| HostError::Unavailable("html document"))?;
        Ok(Self { document })
    }
}

impl CookieJar for BrowserJar {
    fn store(&self, cookie: &Cookie) -> Result<(), CookieError> {
        self.document
            .set_cookie(&cookie.to_string())
            .map_err(|err| CookieError::Rejected(describe(&err)))
    }

    fn cookie_header(&self) -> Result<String, CookieError> {
        self.document
            .cookie()
            .map_err(|err| CookieError::Rejected(describe(&err)))
    }
}

/// The live page.
pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    #[must_use]
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

impl Document for BrowserDocument {
    type Control = BrowserControl;

    fn control_by_id(&self, id: &str) -> Option<BrowserControl> {
        let element = self.document.get_element_by_id(id)?;
        Some(BrowserControl { element })
    }

    fn set_root_property(&self, property: &str, value: &str) -> Result<(), HostError> {
        let root = self
            .document
            .document_element()
            .ok_or(HostError::Unavailable("root element"))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| HostError::Unavailable("html root element"))?;
        root.style()
            .set_property(property, value)
            .map_err(|err| HostError::Rejected(describe(&err)))
    }
}

/// Any element with the configured id: `<select>`, `<input>`, `<textarea>`,
/// or a custom element exposing `value`.
pub struct BrowserControl {
    element: Element,
}

impl ValueControl for BrowserControl {
    fn on_change(&self, mut handler: ChangeHandler) -> Result<(), HostError> {
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            match target_value(&event) {
                Some(value) => handler(value),
                None => log::debug!("change target has no string value"),
            }
        });
        self.element
            .add_event_listener_with_callback(CHANGE_EVENT, closure.as_ref().unchecked_ref())
            .map_err(|err| HostError::Rejected(describe(&err)))?;
        // Listener lives as long as the page.
        closure.forget();
        Ok(())
    }
}

/// `event.target.value`, whatever kind of element the target is.
fn target_value(event: &Event) -> Option<String> {
    let target = event.target()?;
    match js_sys::Reflect::get(&target, &JsValue::from_str("value")) {
        Ok(value) => value.as_string(),
        Err(err) => {
            log::debug!("reading change target value failed: {}", describe(&err));
            None
        }
    }
}

/// Run `f` once the document has been parsed.
///
/// Fires immediately if parsing already finished before the module loaded.
fn when_ready(document: &web_sys::Document, f: impl FnOnce() + 'static) -> Result<(), HostError> {
    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }
    let closure = Closure::<dyn FnMut(Event)>::once(move |_event: Event| f());
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    document
        .add_event_listener_with_callback_and_add_event_listener_options(
            READY_EVENT,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|err| HostError::Rejected(describe(&err)))?;
    closure.forget();
    Ok(())
}

/// Build a binder over the live page and schedule it for page-ready.
///
/// # Errors
///
/// Returns [`HostError`] when there is no document or the ready listener
/// cannot be registered.
pub fn install(config: BinderConfig) -> Result<(), HostError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(HostError::Unavailable("document"))?;
    let jar = BrowserJar::new(&document)?;
    let page = Rc::new(BrowserDocument::new(document.clone()));
    let mut binder = DensityBinder::new(page, CookieWriter::new(jar, BrowserClock), config);
    when_ready(&document, move || {
        binder.bind();
    })
}

fn init_logging(config: &BinderConfig) {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(config.level()) {
        log::debug!("console logger already installed: {err}");
    }
}

/// Module start: bind `#density-selector` with the default config.
///
/// Never throws; failures are logged to the console.
#[wasm_bindgen(start)]
pub fn start() {
    let config = BinderConfig::default();
    init_logging(&config);
    if let Err(err) = install(config) {
        log::warn!("density binder not installed: {err}");
    }
}

/// Bind an additional control using a JSON config (missing fields take
/// their defaults).
///
/// # Errors
///
/// Throws on malformed config or when no document is available.
#[wasm_bindgen(js_name = bindDensityWith)]
pub fn bind_density_with(config_json: &str) -> Result<(), JsValue> {
    let config =
        BinderConfig::from_json(config_json).map_err(|err| JsValue::from_str(&err.to_string()))?;
    install(config).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
