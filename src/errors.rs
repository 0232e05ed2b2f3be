use std::io;
use std::path::PathBuf;

/// Crate result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised outside of template rendering: configuration lookups,
/// manifest loading and header construction. At the engine boundary they are
/// converted into `tera::Error` so filters and functions keep Tera's error
/// surface.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration key the helpers need was not set.
    #[error("missing configuration key `{0}`")]
    MissingConfig(&'static str),

    /// The asset manifest file could not be read.
    #[error("unable to read asset manifest `{path}`: {source}")]
    ManifestRead {
        /// Manifest path from the configuration.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The asset manifest file is not a JSON map of strings.
    #[error("invalid JSON in asset manifest `{path}`: {source}")]
    ManifestParse {
        /// Manifest path from the configuration.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The router could not resolve a route name.
    #[error("no route found for name `{0}`")]
    RouteNotFound(String),

    /// A preload link could not be turned into a `Link` header value.
    #[error("link `{0}` is not a valid header value")]
    InvalidLink(String),
}

impl From<Error> for tera::Error {
    fn from(err: Error) -> Self {
        // Display is self-contained so no source chain is lost here.
        tera::Error::msg(err.to_string())
    }
}
