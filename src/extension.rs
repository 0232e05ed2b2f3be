//! Registration of the helpers into a [`tera::Tera`] instance.

use std::sync::Arc;

use tera::Tera;

use crate::config::{ASSET_PREFIX_KEY, DEFAULT_PUSH_COOKIE, PUSH_COOKIE_KEY};
use crate::filters;
use crate::functions::{AssetFunction, PathFunction, PreloadFunction};
use crate::manifest::AssetManifest;
use crate::push::PushCache;
use crate::services::Services;
use crate::testers;

/// Bundles the host services and the per-request caches, and registers the
/// filters, functions and testers into an engine.
///
/// Build one per request (the manifest cache is instance-local and the push
/// cache carries the request cookies), register it, render, then drain
/// [`push_cache`](Extension::push_cache) into the response.
pub struct Extension {
    services: Services,
    manifest: Arc<AssetManifest>,
    push: Arc<PushCache>,
}

impl Extension {
    /// An extension for a request without cookies.
    pub fn new(services: Services) -> Self {
        Extension::from_request(services, None)
    }

    /// An extension seeded with the request `Cookie` header, so pushes from
    /// earlier requests are not repeated.
    pub fn from_request(services: Services, cookie_header: Option<&str>) -> Self {
        let cookie_name = services
            .config
            .get_str(PUSH_COOKIE_KEY)
            .unwrap_or_else(|| DEFAULT_PUSH_COOKIE.to_string());
        let manifest = Arc::new(AssetManifest::new(services.config.clone()));
        let push = Arc::new(PushCache::from_request(cookie_name, cookie_header));
        Extension { services, manifest, push }
    }

    /// The push cache, holding the `Link` headers and cookie changes the
    /// host merges into its response after rendering.
    pub fn push_cache(&self) -> Arc<PushCache> {
        self.push.clone()
    }

    /// Registers every filter, function and tester.
    pub fn register(&self, tera: &mut Tera) {
        tera.register_filter(
            "date_format",
            filters::common::DateFormat::new(self.services.locale.clone()),
        );
        tera.register_filter("json_decode", filters::common::json_decode);
        tera.register_filter("truncate", filters::string::truncate);
        tera.register_filter("nl2p", filters::string::nl2p);
        tera.register_filter("spaceless", filters::string::spaceless);
        tera.register_filter("human_file_size", filters::number::human_file_size);

        let prefix = self.services.config.get_str(ASSET_PREFIX_KEY).unwrap_or_default();
        tera.register_function("path", PathFunction::new(self.services.router.clone()));
        tera.register_function("asset", AssetFunction::new(self.manifest.clone(), prefix));
        tera.register_function("preload", PreloadFunction::new(self.push.clone()));

        tera.register_tester("instance_of", testers::instance_of);
    }
}
