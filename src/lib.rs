//! # Tera web helpers
//!
//! Web-framework helpers for the [Tera] template engine: route paths,
//! manifest-backed asset URLs, HTTP/2 preload headers and a few formatting
//! filters, registered through Tera's extension API.
//!
//! The crate does not implement a router, a configuration loader or an HTTP
//! server; it consumes those host services through the [`services`] seams and
//! collects its output (`Link` headers, the push de-duplication cookie) for
//! the host to merge into its response.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use serde_json::{json, Value};
//! use tera_web_helpers::{Extension, JsonConfig, Router, Services};
//!
//! struct AppRouter;
//!
//! impl Router for AppRouter {
//!     fn generate(&self, name: &str, _params: &HashMap<String, Value>) -> Option<String> {
//!         (name == "home").then(|| "/".to_string())
//!     }
//! }
//!
//! let services = Services::new(
//!     Arc::new(AppRouter),
//!     Arc::new(JsonConfig::new(json!({"templates": {"options": {}}}))),
//! );
//! let extension = Extension::new(services);
//!
//! let mut tera = tera::Tera::default();
//! extension.register(&mut tera);
//! tera.add_raw_template("nav.txt", r#"<a href="{{ path(name="home") }}">home</a>"#).unwrap();
//! let html = tera.render("nav.txt", &tera::Context::new()).unwrap();
//! assert_eq!(html, r#"<a href="/">home</a>"#);
//! ```
//!
//! [Tera]: https://keats.github.io/tera/

#![deny(missing_docs)]

pub mod config;
/// Rendering controller contract.
pub mod controller;
/// Crate error types.
pub mod errors;
pub mod extension;
/// Formatting filters.
pub mod filters;
pub mod functions;
pub mod manifest;
pub mod push;
pub mod services;
pub mod testers;

pub use crate::config::{ExtensionConfig, TemplateOptions};
pub use crate::controller::TemplateController;
pub use crate::errors::{Error, Result};
pub use crate::extension::Extension;
pub use crate::manifest::AssetManifest;
pub use crate::push::{PreloadOptions, PushCache};
pub use crate::services::{ConfigSource, JsonConfig, Router, Services};
