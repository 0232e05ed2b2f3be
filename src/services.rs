//! Seams to the host framework services the helpers delegate to.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

/// Route path generation, usually backed by the host framework router.
pub trait Router: Send + Sync {
    /// Returns the path for the named route with the given parameters
    /// substituted, or `None` when the name cannot be resolved.
    fn generate(&self, name: &str, params: &HashMap<String, Value>) -> Option<String>;
}

/// Read access to the host configuration tree.
pub trait ConfigSource: Send + Sync {
    /// Looks up a dotted key such as `templates.options.manifest`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Same as [`get`](Self::get) but only for string values.
    fn get_str(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A [`ConfigSource`] backed by a JSON tree, resolving dotted keys one
/// object level at a time.
#[derive(Debug, Clone)]
pub struct JsonConfig(Value);

impl JsonConfig {
    /// Wraps a JSON tree.
    pub fn new(tree: Value) -> Self {
        JsonConfig(tree)
    }
}

impl ConfigSource for JsonConfig {
    fn get(&self, key: &str) -> Option<Value> {
        let mut current = &self.0;
        for part in key.split('.') {
            current = current.as_object()?.get(part)?;
        }
        if current.is_null() {
            return None;
        }
        Some(current.clone())
    }
}

/// The host services consumed by the extension.
#[derive(Clone)]
pub struct Services {
    /// Host route generator.
    pub router: Arc<dyn Router>,
    /// Host configuration tree.
    pub config: Arc<dyn ConfigSource>,
    /// Host locale, used as the `date_format` fallback.
    pub locale: Option<String>,
}

impl Services {
    /// Services without a locale.
    pub fn new(router: Arc<dyn Router>, config: Arc<dyn ConfigSource>) -> Self {
        Services { router, config, locale: None }
    }

    /// Sets the host locale used by `date_format`.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}
