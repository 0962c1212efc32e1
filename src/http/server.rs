//! HTTP server setup and the per-request forwarding handler.
//!
//! # Responsibilities
//! - Build the Axum router and middleware stack
//! - Wire the backend pool and shared client into handler state
//! - Per request: select, rewrite, dispatch, relay
//! - Translate dispatch failures into a single 502 response

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::{ForwardingConfig, ProxyConfig};
use crate::http::proxy;
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::http::transport::{self, ProxyClient};
use crate::load_balancer::{BackendPool, PoolError};
use crate::observability::metrics;

/// Error produced while constructing the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pool: Arc<BackendPool>,
    client: ProxyClient,
    forwarding: ForwardingConfig,
    response_header_timeout: Duration,
}

/// HTTP server for the round-robin proxy.
pub struct HttpServer {
    router: Router,
    backend_count: usize,
}

impl HttpServer {
    /// Create a new server from validated configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let pool = Arc::new(BackendPool::new(&config.backends)?);
        let client = transport::build_client(&config.transport);

        for endpoint in pool.endpoints() {
            tracing::info!(endpoint = %endpoint, "registered backend");
        }

        let backend_count = pool.len();
        let state = AppState {
            pool,
            client,
            forwarding: config.forwarding.clone(),
            response_header_timeout: Duration::from_secs(config.transport.response_header_secs),
        };

        Ok(Self {
            router: Self::build_router(state),
            backend_count,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(forward_handler))
            .route("/", any(forward_handler))
            .with_state(state)
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backends = self.backend_count,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Per-request pipeline: select → rewrite → dispatch → relay.
///
/// Linear, no retries: a failed dispatch is a failed client request. If the
/// client disconnects mid-flight, axum drops this future, which cancels the
/// outbound dispatch and returns its connection to the pool.
async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let (parts, body) = request.into_parts();
    let method = parts.method.clone();
    let path = parts.uri.path().to_string();

    let endpoint = state.pool.select_next();
    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        endpoint = %endpoint,
        "forwarding request"
    );

    let outbound = match proxy::rewrite_request(&parts, body, &endpoint, &state.forwarding, &request_id)
    {
        Ok(req) => req,
        Err(error) => {
            tracing::error!(
                request_id = %request_id,
                method = %method,
                path = %path,
                endpoint = %endpoint,
                error = %error,
                "failed to rewrite request"
            );
            metrics::record_request(method.as_str(), 500, endpoint.as_str(), start);
            return (StatusCode::INTERNAL_SERVER_ERROR, "request rewrite failed").into_response();
        }
    };

    let dispatch = state.client.request(outbound);
    match tokio::time::timeout(state.response_header_timeout, dispatch).await {
        Ok(Ok(response)) => {
            let status = response.status();
            tracing::info!(
                request_id = %request_id,
                method = %method,
                path = %path,
                endpoint = %endpoint,
                status = %status,
                "request forwarded"
            );
            metrics::record_request(method.as_str(), status.as_u16(), endpoint.as_str(), start);
            proxy::relay_response(response, state.forwarding.force_close)
        }
        Ok(Err(error)) => {
            tracing::error!(
                request_id = %request_id,
                method = %method,
                path = %path,
                endpoint = %endpoint,
                error = %error,
                "upstream dispatch failed"
            );
            metrics::record_request(method.as_str(), 502, endpoint.as_str(), start);
            (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response()
        }
        Err(_) => {
            tracing::error!(
                request_id = %request_id,
                method = %method,
                path = %path,
                endpoint = %endpoint,
                timeout = ?state.response_header_timeout,
                "upstream did not respond within the header timeout"
            );
            metrics::record_request(method.as_str(), 502, endpoint.as_str(), start);
            (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response()
        }
    }
}
