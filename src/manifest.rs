//! Asset manifest lookup.
//!
//! The manifest is a JSON map of logical asset names to built/versioned file
//! paths, written by the asset pipeline. It is read once per instance, on the
//! first `asset()` call, from the path named by `templates.options.manifest`.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use log::debug;

use crate::config::MANIFEST_KEY;
use crate::errors::{Error, Result};
use crate::services::ConfigSource;

/// Lazily loaded mapping of asset keys to resolved file paths.
///
/// Keys and values are normalized to forward slashes so lookups behave the
/// same regardless of the platform that produced the manifest.
pub struct AssetManifest {
    config: Arc<dyn ConfigSource>,
    entries: OnceLock<HashMap<String, String>>,
}

impl AssetManifest {
    /// A manifest that will be loaded from the configured path on first use.
    pub fn new(config: Arc<dyn ConfigSource>) -> Self {
        AssetManifest { config, entries: OnceLock::new() }
    }

    /// Looks up an asset key, returning `None` for unknown keys.
    ///
    /// The first call loads and parses the manifest file; later calls hit the
    /// cached map.
    pub fn resolve(&self, key: &str) -> Result<Option<&str>> {
        let entries = self.entries()?;
        Ok(entries.get(&normalize(key)).map(String::as_str))
    }

    fn entries(&self) -> Result<&HashMap<String, String>> {
        if let Some(entries) = self.entries.get() {
            return Ok(entries);
        }
        let entries = self.load()?;
        Ok(self.entries.get_or_init(|| entries))
    }

    fn load(&self) -> Result<HashMap<String, String>> {
        let path = PathBuf::from(
            self.config.get_str(MANIFEST_KEY).ok_or(Error::MissingConfig(MANIFEST_KEY))?,
        );

        let content = fs::read_to_string(&path)
            .map_err(|source| Error::ManifestRead { path: path.clone(), source })?;
        let raw: HashMap<String, String> = serde_json::from_str(&content)
            .map_err(|source| Error::ManifestParse { path: path.clone(), source })?;

        let entries: HashMap<String, String> =
            raw.into_iter().map(|(k, v)| (normalize(&k), normalize(&v))).collect();
        debug!("loaded asset manifest `{}` ({} entries)", path.display(), entries.len());
        Ok(entries)
    }
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}
