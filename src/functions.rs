//! The `path`, `asset` and `preload` template functions.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::value::{from_value, Value};
use tera::{Error, Function, Result};

use crate::manifest::AssetManifest;
use crate::push::{PreloadOptions, PushCache};
use crate::services::Router;

fn required_string(function: &str, arg: &str, args: &HashMap<String, Value>) -> Result<String> {
    match args.get(arg) {
        Some(val) => match from_value::<String>(val.clone()) {
            Ok(v) => Ok(v),
            Err(_) => Err(Error::msg(format!(
                "Function `{}` received {}={} but `{}` can only be a string",
                function, arg, val, arg
            ))),
        },
        None => {
            Err(Error::msg(format!("Function `{}` was called without a `{}` argument", function, arg)))
        }
    }
}

fn optional_string(function: &str, arg: &str, args: &HashMap<String, Value>) -> Result<Option<String>> {
    match args.get(arg) {
        Some(val) => match from_value::<String>(val.clone()) {
            Ok(v) => Ok(Some(v)),
            Err(_) => Err(Error::msg(format!(
                "Function `{}` received {}={} but `{}` can only be a string",
                function, arg, val, arg
            ))),
        },
        None => Ok(None),
    }
}

/// Resolves a named route through the host router; every argument besides
/// `name` is passed on as a route parameter.
pub struct PathFunction {
    router: Arc<dyn Router>,
}

impl PathFunction {
    /// A `path()` function backed by the given router.
    pub fn new(router: Arc<dyn Router>) -> Self {
        PathFunction { router }
    }
}

impl Function for PathFunction {
    fn call(&self, args: &HashMap<String, Value>) -> Result<Value> {
        let name = required_string("path", "name", args)?;
        let params: HashMap<String, Value> =
            args.iter().filter(|(k, _)| k.as_str() != "name").map(|(k, v)| (k.clone(), v.clone())).collect();

        match self.router.generate(&name, &params) {
            Some(path) => Ok(Value::String(path)),
            None => Err(crate::errors::Error::RouteNotFound(name).into()),
        }
    }
}

/// Resolves an asset key through the manifest, returning the prefixed path or
/// an empty string for unknown keys.
pub struct AssetFunction {
    manifest: Arc<AssetManifest>,
    prefix: String,
}

impl AssetFunction {
    /// An `asset()` function backed by the given manifest.
    pub fn new(manifest: Arc<AssetManifest>, prefix: String) -> Self {
        AssetFunction { manifest, prefix }
    }
}

impl Function for AssetFunction {
    fn call(&self, args: &HashMap<String, Value>) -> Result<Value> {
        let key = required_string("asset", "key", args)?;
        match self.manifest.resolve(&key)? {
            Some(path) => Ok(Value::String(format!("{}{}", self.prefix, path))),
            None => Ok(Value::String(String::new())),
        }
    }
}

/// Emits a `Link: rel=preload` header for the given link and returns the link
/// so it can be used inline. Optional arguments: `nopush`, `as`, `type`,
/// `crossorigin`.
pub struct PreloadFunction {
    cache: Arc<PushCache>,
}

impl PreloadFunction {
    /// A `preload()` function emitting into the given cache.
    pub fn new(cache: Arc<PushCache>) -> Self {
        PreloadFunction { cache }
    }
}

impl Function for PreloadFunction {
    fn call(&self, args: &HashMap<String, Value>) -> Result<Value> {
        let link = required_string("preload", "link", args)?;

        let nopush = match args.get("nopush") {
            Some(val) => match from_value::<bool>(val.clone()) {
                Ok(v) => v,
                Err(_) => {
                    return Err(Error::msg(format!(
                        "Function `preload` received nopush={} but `nopush` can only be a boolean",
                        val
                    )));
                }
            },
            None => false,
        };
        // `crossorigin=true` is shorthand for anonymous credentials mode
        let crossorigin = match args.get("crossorigin") {
            Some(Value::Bool(true)) => Some("anonymous".to_string()),
            Some(Value::Bool(false)) | None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(val) => {
                return Err(Error::msg(format!(
                    "Function `preload` received crossorigin={} but `crossorigin` can only be \
                     a boolean or a string",
                    val
                )));
            }
        };
        let options = PreloadOptions {
            nopush,
            resource_as: optional_string("preload", "as", args)?,
            mime_type: optional_string("preload", "type", args)?,
            crossorigin,
        };

        self.cache.preload(&link, &options)?;
        Ok(Value::String(link))
    }
}
