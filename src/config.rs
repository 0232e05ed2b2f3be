//! Default configuration shipped with the crate.
//!
//! The defaults live both as Rust `Default` impls and as the checked-in
//! `config/default.json` fixture; `tests/config.rs` asserts the two stay in
//! sync.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration key for the asset manifest file path.
pub const MANIFEST_KEY: &str = "templates.options.manifest";
/// Configuration key for the prefix prepended to resolved asset paths.
pub const ASSET_PREFIX_KEY: &str = "templates.options.asset_prefix";
/// Configuration key for the push de-duplication cookie name.
pub const PUSH_COOKIE_KEY: &str = "templates.options.push_cookie";

/// Default name of the cookie persisting pushed link hashes.
pub const DEFAULT_PUSH_COOKIE: &str = "h2pushes";

/// Settings under the `templates` configuration namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtensionConfig {
    /// Template directories handed to the engine.
    pub paths: Vec<String>,
    /// Engine and helper options.
    pub options: TemplateOptions,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        ExtensionConfig { paths: Vec::new(), options: TemplateOptions::default() }
    }
}

/// Options under `templates.options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateOptions {
    /// Enable engine debug output.
    pub debug: bool,
    /// Error on undefined variables instead of rendering nothing.
    pub strict_variables: bool,
    /// Escape HTML in rendered variables.
    pub auto_escape: bool,
    /// Path of the JSON asset manifest, unset by default.
    pub manifest: Option<String>,
    /// Prefix prepended to every resolved asset path.
    pub asset_prefix: String,
    /// Name of the push de-duplication cookie.
    pub push_cookie: String,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        TemplateOptions {
            debug: false,
            strict_variables: false,
            auto_escape: true,
            manifest: None,
            asset_prefix: String::new(),
            push_cookie: DEFAULT_PUSH_COOKIE.to_string(),
        }
    }
}

/// The full default configuration tree, namespaced the way the host loads it.
pub fn default_config() -> Value {
    serde_json::json!({ "templates": ExtensionConfig::default() })
}
