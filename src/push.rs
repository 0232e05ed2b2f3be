//! HTTP/2 server-push preload helpers.
//!
//! Every `preload()` call emits a `Link: <url>; rel=preload` response header.
//! Pushing the same resource on every request wastes bandwidth, so the hashes
//! of already-pushed links are kept in a cookie; links found there (or called
//! with `nopush`) still get the advisory header, with `nopush` appended so the
//! server does not push them again.

use std::collections::HashSet;
use std::sync::Mutex;

use cookie::{Cookie, CookieJar};
use http::header::{HeaderMap, HeaderValue, LINK};
use log::debug;
use serde_json::Value;

use crate::errors::{Error, Result};

/// Attributes of a `Link: rel=preload` header.
#[derive(Debug, Default, Clone)]
pub struct PreloadOptions {
    /// Emit the advisory header only, never push.
    pub nopush: bool,
    /// The `as` destination attribute (`style`, `script`, `font`, ...).
    pub resource_as: Option<String>,
    /// The `type` MIME attribute.
    pub mime_type: Option<String>,
    /// The `crossorigin` attribute (`anonymous` or `use-credentials`).
    pub crossorigin: Option<String>,
}

/// Collects `Link` headers and de-duplicates pushes across requests through a
/// cookie holding the hashes of links already pushed.
///
/// State sits behind mutexes only because Tera requires its callables to be
/// `Sync + Send`; usage is request-scoped.
pub struct PushCache {
    cookie_name: String,
    pushed: Mutex<HashSet<String>>,
    headers: Mutex<HeaderMap>,
    jar: Mutex<CookieJar>,
}

impl PushCache {
    /// An empty cache, for requests carrying no cookies.
    pub fn new(cookie_name: impl Into<String>) -> Self {
        PushCache {
            cookie_name: cookie_name.into(),
            pushed: Mutex::new(HashSet::new()),
            headers: Mutex::new(HeaderMap::new()),
            jar: Mutex::new(CookieJar::new()),
        }
    }

    /// Seeds the cache from the request `Cookie` header, if any.
    pub fn from_request(cookie_name: impl Into<String>, cookie_header: Option<&str>) -> Self {
        let cache = PushCache::new(cookie_name);
        if let Some(header) = cookie_header {
            let mut jar = cache.jar.lock().unwrap();
            let mut pushed = cache.pushed.lock().unwrap();
            for cookie in Cookie::split_parse_encoded(header.to_string()).flatten() {
                if cookie.name() == cache.cookie_name {
                    pushed.extend(parse_hashes(cookie.value()));
                }
                jar.add_original(cookie);
            }
        }
        cache
    }

    /// Emits the `Link` header for `link`, pushing it at most once per cache
    /// lifetime. Returns whether a push was requested.
    pub fn preload(&self, link: &str, options: &PreloadOptions) -> Result<bool> {
        let hash = link_hash(link);
        let mut pushed = self.pushed.lock().unwrap();
        let nopush = options.nopush || pushed.contains(&hash);

        let mut header = format!("<{}>; rel=preload", link);
        if let Some(dest) = &options.resource_as {
            header.push_str(&format!("; as={}", dest));
        }
        if let Some(mime) = &options.mime_type {
            header.push_str(&format!("; type=\"{}\"", mime));
        }
        if let Some(crossorigin) = &options.crossorigin {
            header.push_str(&format!("; crossorigin={}", crossorigin));
        }
        if nopush {
            header.push_str("; nopush");
        }

        let value = HeaderValue::from_str(&header)
            .map_err(|_| Error::InvalidLink(link.to_string()))?;
        self.headers.lock().unwrap().append(LINK, value);

        if !nopush {
            debug!("pushing `{}`", link);
            pushed.insert(hash);
            self.persist(&pushed);
        }
        Ok(!nopush)
    }

    /// The `Link` headers emitted so far, to be merged into the response.
    pub fn headers(&self) -> HeaderMap {
        self.headers.lock().unwrap().clone()
    }

    /// Cookies changed during this request, to be emitted as `Set-Cookie`.
    pub fn cookies(&self) -> Vec<Cookie<'static>> {
        self.jar.lock().unwrap().delta().cloned().collect()
    }

    fn persist(&self, pushed: &HashSet<String>) {
        let map: serde_json::Map<String, Value> =
            pushed.iter().map(|hash| (hash.clone(), Value::from(1))).collect();
        let cookie = Cookie::build((self.cookie_name.clone(), Value::Object(map).to_string()))
            .path("/")
            .build();
        self.jar.lock().unwrap().add(cookie);
    }
}

/// Hash identifying a link in the push cookie.
fn link_hash(link: &str) -> String {
    format!("{:016x}", seahash::hash(link.as_bytes()))
}

/// The cookie value is a JSON object of hash -> 1. An unreadable value means
/// an empty cache, never an error.
fn parse_hashes(value: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(value) {
        Ok(Value::Object(map)) => map.into_iter().map(|(k, _)| k).collect(),
        _ => Vec::new(),
    }
}
