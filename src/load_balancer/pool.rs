//! Round-robin backend pool.
//!
//! # Responsibilities
//! - Own the ordered, non-empty list of endpoints
//! - Rotate through them with an atomic cursor
//!
//! # Design Decisions
//! - Emptiness is rejected at construction so selection is infallible
//! - `fetch_add` with relaxed ordering: no two concurrent calls observe the
//!   same pre-increment value; global pick order under concurrency is not
//!   serialized and is not guaranteed
//! - `usize` wrap-around skews one pick at most once per `usize::MAX` calls

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::load_balancer::endpoint::{Endpoint, EndpointError};

/// Error produced while building a [`BackendPool`] from configuration.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("backend list is empty")]
    Empty,

    #[error(transparent)]
    Endpoint(#[from] EndpointError),
}

/// Ordered set of backends plus the rotation cursor.
#[derive(Debug)]
pub struct BackendPool {
    endpoints: Vec<Arc<Endpoint>>,
    cursor: AtomicUsize,
}

impl BackendPool {
    /// Build a pool from configured URL strings.
    ///
    /// Fails fast on an empty list or any URL that does not parse as an
    /// absolute http(s) URL with a host.
    pub fn new(urls: &[String]) -> Result<Self, PoolError> {
        if urls.is_empty() {
            return Err(PoolError::Empty);
        }

        let endpoints = urls
            .iter()
            .map(|raw| Endpoint::parse(raw).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            endpoints,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Pick the next endpoint in rotation.
    ///
    /// A single atomic fetch-and-add; never blocks, never fails.
    pub fn select_next(&self) -> Arc<Endpoint> {
        let n = self.cursor.fetch_add(1, Ordering::Relaxed);
        Arc::clone(&self.endpoints[n % self.endpoints.len()])
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn endpoints(&self) -> &[Arc<Endpoint>] {
        &self.endpoints
    }
}
