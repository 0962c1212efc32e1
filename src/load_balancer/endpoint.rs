//! Backend endpoint representation.
//!
//! # Responsibilities
//! - Parse a configured base URL into an immutable endpoint
//! - Pre-compute the scheme/authority pieces needed for URI rewriting
//! - Reject anything that is not an absolute http(s) URL with a host

use axum::http::uri::{Authority, Scheme};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Error produced when a configured backend URL cannot become an [`Endpoint`].
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("invalid backend URL `{url}`: {source}")]
    Parse {
        url: String,
        source: url::ParseError,
    },

    #[error("backend URL `{0}` must use the http or https scheme")]
    UnsupportedScheme(String),

    #[error("backend URL `{0}` has no host")]
    MissingHost(String),

    #[error("backend URL `{0}` has an invalid authority")]
    InvalidAuthority(String),
}

/// One backend server's base URL, parsed once at startup.
///
/// The scheme, authority and base path are pre-computed so the per-request
/// rewrite never re-parses the URL. Shared read-only across requests via
/// `Arc<Endpoint>`.
#[derive(Debug, Clone)]
pub struct Endpoint {
    url: Url,
    scheme: Scheme,
    authority: Authority,
    base_path: String,
}

impl Endpoint {
    /// Parse an absolute URL into an endpoint.
    pub fn parse(raw: &str) -> Result<Self, EndpointError> {
        let url = Url::parse(raw).map_err(|source| EndpointError::Parse {
            url: raw.to_string(),
            source,
        })?;

        let scheme = match url.scheme() {
            "http" => Scheme::HTTP,
            "https" => Scheme::HTTPS,
            _ => return Err(EndpointError::UnsupportedScheme(raw.to_string())),
        };

        let host = url
            .host_str()
            .ok_or_else(|| EndpointError::MissingHost(raw.to_string()))?;

        let authority_str = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        let authority = Authority::from_str(&authority_str)
            .map_err(|_| EndpointError::InvalidAuthority(raw.to_string()))?;

        // "/" base means no prefix; "/api/" and "/api" are equivalent.
        let base_path = url.path().trim_end_matches('/').to_string();

        Ok(Self {
            url,
            scheme,
            authority,
            base_path,
        })
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Base path prefix with any trailing slash removed (may be empty).
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn is_https(&self) -> bool {
        self.scheme == Scheme::HTTPS
    }

    /// The original URL text, for logs and metrics labels.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
