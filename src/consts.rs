//! Shared constants for the density binder.

// ── DOM ─────────────────────────────────────────────────────────

/// Identifier of the control the binder attaches to.
pub const SELECTOR_ID: &str = "density-selector";

/// CSS custom property set on the root element.
pub const DENSITY_PROPERTY: &str = "--density";

/// DOM event the binder listens for on the control.
pub const CHANGE_EVENT: &str = "change";

/// Page-ready lifecycle event.
pub const READY_EVENT: &str = "DOMContentLoaded";

// ── Cookies ─────────────────────────────────────────────────────

/// Cookie name the selected density is persisted under.
pub const DENSITY_COOKIE: &str = "density";

/// Expiry used when the caller does not pass a day count.
pub const DEFAULT_EXPIRY_DAYS: i64 = 365;

/// Milliseconds in one day (24 × 60 × 60 × 1000).
pub const MS_PER_DAY: i64 = 86_400_000;

/// Path every cookie is scoped to.
pub const COOKIE_PATH: &str = "/";

/// Density reported when no cookie has been stored, or it is empty.
pub const DEFAULT_DENSITY: &str = "1";
