//! Request rewriting and response relay.
//!
//! # Responsibilities
//! - Retarget the inbound request line at the chosen endpoint
//! - Join the endpoint's base path with the inbound path without
//!   duplicating separators
//! - Relay the backend response as a stream

use axum::body::Body;
use axum::http::{
    header, request::Parts, HeaderMap, HeaderValue, Request, Response, Uri,
};
use hyper::body::Incoming;

use crate::config::ForwardingConfig;
use crate::http::request::X_REQUEST_ID;
use crate::load_balancer::Endpoint;

/// Headers that describe a single hop and must not be forwarded.
const HOP_BY_HOP: [header::HeaderName; 8] = [
    header::CONNECTION,
    header::HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Join an endpoint base path with an inbound path.
///
/// The base has no trailing slash (endpoint construction guarantees it), so
/// stripping the inbound leading slash yields exactly one separator:
/// `/api` + `/v1` → `/api/v1`.
pub fn joined_path(base: &str, inbound: &str) -> String {
    format!("{}/{}", base, inbound.trim_start_matches('/'))
}

/// Build the outbound request targeting `endpoint`.
///
/// Copies method and headers from the inbound request, rewrites the URI to
/// the endpoint's scheme/authority with the joined path, and optionally
/// rewrites the `Host` header. The inbound body is passed through untouched
/// so uploads stream.
pub fn rewrite_request(
    parts: &Parts,
    body: Body,
    endpoint: &Endpoint,
    forwarding: &ForwardingConfig,
    request_id: &str,
) -> Result<Request<Body>, axum::http::Error> {
    let path = joined_path(endpoint.base_path(), parts.uri.path());
    let path_and_query = match parts.uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path,
    };

    let uri = Uri::builder()
        .scheme(endpoint.scheme().clone())
        .authority(endpoint.authority().clone())
        .path_and_query(path_and_query)
        .build()?;

    let mut builder = Request::builder().method(parts.method.clone()).uri(uri);

    if let Some(headers) = builder.headers_mut() {
        for (name, value) in &parts.headers {
            if HOP_BY_HOP.contains(name) {
                continue;
            }
            headers.append(name.clone(), value.clone());
        }

        if forwarding.rewrite_host_header {
            headers.insert(
                header::HOST,
                HeaderValue::from_str(endpoint.authority().as_str())?,
            );
        }

        if let Ok(value) = HeaderValue::from_str(request_id) {
            headers.insert(X_REQUEST_ID, value);
        }
    }

    builder.body(body)
}

/// Turn the backend response into the client-facing response.
///
/// The body is wrapped, not collected, so arbitrarily large payloads stream
/// straight through.
pub fn relay_response(response: Response<Incoming>, force_close: bool) -> Response<Body> {
    let (mut parts, body) = response.into_parts();

    strip_hop_by_hop(&mut parts.headers);
    if force_close {
        parts
            .headers
            .insert(header::CONNECTION, HeaderValue::from_static("close"));
    }

    Response::from_parts(parts, Body::new(body))
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in &HOP_BY_HOP {
        headers.remove(name);
    }
}
