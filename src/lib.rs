//! Density preference binder for server-rendered pages.
//!
//! Compiled to WebAssembly and loaded by the page. On page-ready it finds
//! the `#density-selector` control and, on every change, writes the chosen
//! value to the `--density` custom property on `<html>` and to a one-year
//! `density` cookie so the server can render the same density next time.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`binder`] | Page-ready binding and the change handler |
//! | [`cookie`] | Cookie serialization, HTTP dates, the cookie writer |
//! | [`density`] | The opaque density value and stored-preference lookup |
//! | [`host`] | Traits for the clock, cookie jar, and document |
//! | [`memory`] | In-memory host doubles |
//! | [`config`] | JSON-loadable binder configuration |
//! | [`error`] | Error types |
//! | [`consts`] | Page contract: ids, property, cookie name, expiry |
//! | `web` | `web_sys` host and WASM entry points (feature `web`) |

pub mod binder;
pub mod config;
pub mod consts;
pub mod cookie;
pub mod density;
pub mod error;
pub mod host;
pub mod memory;
#[cfg(feature = "web")]
pub mod web;

pub use binder::{Binding, DensityBinder, apply_density};
pub use config::BinderConfig;
pub use cookie::{Cookie, CookieWriter};
pub use density::{Density, stored_density};
