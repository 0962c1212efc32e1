//! Shared outbound transport.
//!
//! # Responsibilities
//! - Build the one pooled client shared by all dispatches
//! - Make every transport contract explicit: connect timeout, TCP
//!   keep-alive, TLS handshake budget, idle pool cap and idle eviction
//!
//! # Design Decisions
//! - One client for all endpoints; the pool keys connections by authority
//! - Connection establishment is bounded by a deadline connector wrapper
//!   instead of relying on platform socket defaults
//! - The response-header wait is enforced at the dispatch call site, since
//!   it covers the request round-trip rather than connection setup

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use axum::body::Body;
use axum::http::Uri;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tower::Service;

use crate::config::TransportConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The concrete client type shared across all requests.
pub type ProxyClient = Client<DeadlineConnector, Body>;

/// Build the pooled client from explicit transport settings.
pub fn build_client(config: &TransportConfig) -> ProxyClient {
    let mut http = HttpConnector::new();
    http.set_connect_timeout(Some(Duration::from_secs(config.connect_secs)));
    http.set_keepalive(Some(Duration::from_secs(config.keep_alive_secs)));
    // The HTTPS connector decides the scheme; the inner connector must not.
    http.enforce_http(false);

    // Compiled-in webpki roots: no dependency on a system CA bundle.
    let https = hyper_rustls::HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_all_versions()
        .wrap_connector(http);

    let connector = DeadlineConnector::new(https, config);

    Client::builder(TokioExecutor::new())
        .pool_idle_timeout(Duration::from_secs(config.idle_secs))
        .pool_max_idle_per_host(config.max_idle_per_host)
        .build(connector)
}

/// Connector wrapper that bounds connection establishment.
///
/// Plain-http targets get the connect budget; https targets additionally get
/// the TLS handshake budget, since establishment there is TCP connect plus
/// handshake.
#[derive(Clone)]
pub struct DeadlineConnector {
    inner: HttpsConnector<HttpConnector>,
    http_budget: Duration,
    https_budget: Duration,
}

impl DeadlineConnector {
    fn new(inner: HttpsConnector<HttpConnector>, config: &TransportConfig) -> Self {
        let connect = Duration::from_secs(config.connect_secs);
        Self {
            inner,
            http_budget: connect,
            https_budget: connect + Duration::from_secs(config.tls_handshake_secs),
        }
    }
}

impl Service<Uri> for DeadlineConnector {
    type Response = <HttpsConnector<HttpConnector> as Service<Uri>>::Response;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, uri: Uri) -> Self::Future {
        let budget = if uri.scheme_str() == Some("https") {
            self.https_budget
        } else {
            self.http_budget
        };
        let connecting = self.inner.call(uri.clone());

        Box::pin(async move {
            match tokio::time::timeout(budget, connecting).await {
                Ok(result) => result,
                Err(_) => Err(Box::new(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!("connecting to {uri} timed out after {budget:?}"),
                )) as BoxError),
            }
        })
    }
}
