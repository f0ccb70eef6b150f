use std::cell::RefCell;
use std::collections::HashMap;

use super::*;
use crate::host::ChangeHandler;
use crate::memory::{FixedClock, MemoryJar};

// 2023-11-14T22:13:20Z
const NOW_MS: f64 = 1_700_000_000_000.0;
const NOW: i64 = 1_700_000_000_000;
const YEAR_MS: i64 = 365 * 86_400_000;

// =============================================================
// Helpers
// =============================================================

#[derive(Clone, Default)]
struct FakeControl {
    handlers: Rc<RefCell<Vec<ChangeHandler>>>,
    refuse: bool,
}

impl FakeControl {
    fn refusing() -> Self {
        Self { refuse: true, ..Self::default() }
    }

    /// Simulate the user picking `value`.
    fn select(&self, value: &str) {
        for handler in self.handlers.borrow_mut().iter_mut() {
            handler(value.to_owned());
        }
    }

    fn listener_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl ValueControl for FakeControl {
    fn on_change(&self, handler: ChangeHandler) -> Result<(), HostError> {
        if self.refuse {
            return Err(HostError::Rejected("listeners blocked".to_owned()));
        }
        self.handlers.borrow_mut().push(handler);
        Ok(())
    }
}

#[derive(Default)]
struct FakeDocument {
    controls: HashMap<String, FakeControl>,
    root_style: RefCell<HashMap<String, String>>,
    no_root: bool,
}

impl FakeDocument {
    fn with_control(id: &str, control: &FakeControl) -> Self {
        let mut doc = Self::default();
        doc.controls.insert(id.to_owned(), control.clone());
        doc
    }

    fn style(&self, property: &str) -> Option<String> {
        self.root_style.borrow().get(property).cloned()
    }
}

impl Document for FakeDocument {
    type Control = FakeControl;

    fn control_by_id(&self, id: &str) -> Option<FakeControl> {
        self.controls.get(id).cloned()
    }

    fn set_root_property(&self, property: &str, value: &str) -> Result<(), HostError> {
        if self.no_root {
            return Err(HostError::Unavailable("root element"));
        }
        self.root_style
            .borrow_mut()
            .insert(property.to_owned(), value.to_owned());
        Ok(())
    }
}

struct Page {
    doc: Rc<FakeDocument>,
    jar: Rc<MemoryJar>,
    clock: Rc<FixedClock>,
    binder: DensityBinder<FakeDocument, Rc<MemoryJar>, Rc<FixedClock>>,
}

fn page(doc: FakeDocument, config: BinderConfig) -> Page {
    let doc = Rc::new(doc);
    let jar = Rc::new(MemoryJar::new());
    let clock = Rc::new(FixedClock::at(NOW_MS));
    let writer = CookieWriter::new(Rc::clone(&jar), Rc::clone(&clock));
    let binder = DensityBinder::new(Rc::clone(&doc), writer, config);
    Page { doc, jar, clock, binder }
}

fn bound_page() -> (Page, FakeControl) {
    let control = FakeControl::default();
    let mut p = page(
        FakeDocument::with_control("density-selector", &control),
        BinderConfig::default(),
    );
    assert_eq!(p.binder.bind(), Binding::Bound);
    (p, control)
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn starts_unbound() {
    let p = page(FakeDocument::default(), BinderConfig::default());
    assert_eq!(p.binder.state(), Binding::Unbound);
}

#[test]
fn missing_control_leaves_binder_inert() {
    let mut p = page(FakeDocument::default(), BinderConfig::default());
    assert_eq!(p.binder.bind(), Binding::Inert);
    assert!(p.jar.is_empty());
    assert!(p.doc.root_style.borrow().is_empty());
}

#[test]
fn control_with_other_id_is_ignored() {
    let control = FakeControl::default();
    let mut p = page(
        FakeDocument::with_control("theme-selector", &control),
        BinderConfig::default(),
    );
    assert_eq!(p.binder.bind(), Binding::Inert);
    assert_eq!(control.listener_count(), 0);
}

#[test]
fn present_control_gets_one_listener() {
    let (_p, control) = bound_page();
    assert_eq!(control.listener_count(), 1);
}

#[test]
fn bind_is_idempotent() {
    let (mut p, control) = bound_page();
    assert_eq!(p.binder.bind(), Binding::Bound);
    assert_eq!(control.listener_count(), 1);
}

#[test]
fn inert_is_terminal() {
    let mut p = page(FakeDocument::default(), BinderConfig::default());
    p.binder.bind();
    assert_eq!(p.binder.bind(), Binding::Inert);
}

#[test]
fn refused_listener_leaves_binder_inert() {
    let control = FakeControl::refusing();
    let mut p = page(
        FakeDocument::with_control("density-selector", &control),
        BinderConfig::default(),
    );
    assert_eq!(p.binder.bind(), Binding::Inert);
}

#[test]
fn no_changes_before_first_event() {
    let (p, _control) = bound_page();
    assert!(p.jar.is_empty());
    assert_eq!(p.doc.style("--density"), None);
}

// =============================================================
// Change handling
// =============================================================

#[test]
fn change_sets_style_and_cookie() {
    let (p, control) = bound_page();
    control.select("comfortable");

    assert_eq!(p.doc.style("--density").as_deref(), Some("comfortable"));
    let cookie = p.jar.get("density").unwrap();
    assert_eq!(cookie.value, "comfortable");
    assert_eq!(cookie.path, "/");
    assert_eq!(cookie.expires_ms(), NOW + YEAR_MS);
}

#[test]
fn last_change_wins() {
    let (p, control) = bound_page();
    control.select("compact");
    control.select("spacious");

    assert_eq!(p.doc.style("--density").as_deref(), Some("spacious"));
    assert_eq!(p.jar.get("density").unwrap().value, "spacious");
    assert_eq!(p.jar.len(), 1);
    assert_eq!(p.jar.writes().len(), 2);
}

#[test]
fn expiry_follows_the_clock_at_each_change() {
    let (p, control) = bound_page();
    control.select("compact");
    p.clock.advance(60_000.0);
    control.select("compact");
    assert_eq!(p.jar.get("density").unwrap().expires_ms(), NOW + 60_000 + YEAR_MS);
}

#[test]
fn arbitrary_values_pass_through() {
    let (p, control) = bound_page();
    control.select("0.75rem");
    assert_eq!(p.doc.style("--density").as_deref(), Some("0.75rem"));
    assert_eq!(p.jar.get("density").unwrap().value, "0.75rem");
}

#[test]
fn every_write_is_root_scoped() {
    let (p, control) = bound_page();
    control.select("compact");
    control.select("1");
    for write in p.jar.writes() {
        assert!(write.contains("path=/"), "{write}");
    }
}

#[test]
fn rejected_cookie_still_updates_style() {
    let (p, control) = bound_page();
    p.jar.reject_writes(true);
    control.select("compact");
    assert_eq!(p.doc.style("--density").as_deref(), Some("compact"));
    assert!(p.jar.get("density").is_none());
}

#[test]
fn missing_root_still_writes_cookie() {
    let control = FakeControl::default();
    let mut doc = FakeDocument::with_control("density-selector", &control);
    doc.no_root = true;
    let mut p = page(doc, BinderConfig::default());
    p.binder.bind();

    control.select("compact");
    assert_eq!(p.jar.get("density").unwrap().value, "compact");
}

#[test]
fn stored_cookie_is_not_restored_on_bind() {
    let control = FakeControl::default();
    let mut p = page(
        FakeDocument::with_control("density-selector", &control),
        BinderConfig::default(),
    );
    p.jar
        .store(&Cookie::new("density", "compact", NOW + YEAR_MS).unwrap())
        .unwrap();
    p.binder.bind();
    assert_eq!(p.doc.style("--density"), None);
}

// =============================================================
// Config
// =============================================================

#[test]
fn custom_config_is_honored() {
    let control = FakeControl::default();
    let config = BinderConfig {
        selector_id: "spacing".to_owned(),
        property: "--spacing".to_owned(),
        cookie_name: "spacing".to_owned(),
        expiry_days: 30,
        ..BinderConfig::default()
    };
    let mut p = page(FakeDocument::with_control("spacing", &control), config);
    assert_eq!(p.binder.bind(), Binding::Bound);
    assert_eq!(p.binder.config().selector_id, "spacing");

    control.select("tight");
    assert_eq!(p.doc.style("--spacing").as_deref(), Some("tight"));
    assert_eq!(p.doc.style("--density"), None);
    let cookie = p.jar.get("spacing").unwrap();
    assert_eq!(cookie.value, "tight");
    assert_eq!(cookie.expires_ms(), NOW + 30 * 86_400_000);
}

// =============================================================
// apply_density
// =============================================================

#[test]
fn apply_density_reports_success() {
    let doc = FakeDocument::default();
    let writer = CookieWriter::new(MemoryJar::new(), FixedClock::at(NOW_MS));
    let outcome = apply_density(&doc, &writer, &BinderConfig::default(), &Density::from("compact"));
    assert!(outcome.is_ok());
    assert_eq!(outcome.cookie.unwrap().value, "compact");
}

#[test]
fn apply_density_reports_each_failure() {
    let doc = FakeDocument { no_root: true, ..FakeDocument::default() };
    let writer = CookieWriter::new(MemoryJar::new(), FixedClock::at(NOW_MS));
    writer.jar().reject_writes(true);
    let outcome = apply_density(&doc, &writer, &BinderConfig::default(), &Density::from("compact"));
    assert!(!outcome.is_ok());
    assert!(matches!(outcome.style, Err(HostError::Unavailable(_))));
    assert!(matches!(outcome.cookie, Err(CookieError::Rejected(_))));
}
