//! Bounded worker pool for outbound HTTP calls.
//!
//! Every upstream call acquires a permit from a semaphore sized to the host's
//! available parallelism, so a burst of requests queues here instead of
//! opening unbounded connections. Each call runs in its own task: a caller
//! that goes away does not abort a call already in flight.

use reqwest::{Client, RequestBuilder};
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

use super::RawResponse;
use crate::error::{FablegateError, Result};

/// Shared HTTP client plus a concurrency limit.
#[derive(Clone)]
pub struct OutboundPool {
    client: Client,
    permits: Arc<Semaphore>,
    size: usize,
}

impl std::fmt::Debug for OutboundPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutboundPool")
            .field("size", &self.size)
            .field("available", &self.permits.available_permits())
            .finish()
    }
}

impl OutboundPool {
    /// Build a pool allowing `max_concurrency` calls at once (`0` = auto).
    pub fn new(max_concurrency: usize) -> Result<Self> {
        let size = if max_concurrency == 0 {
            Self::default_size()
        } else {
            max_concurrency
        };
        // Upstream statuses, redirects included, are handed back untouched.
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| FablegateError::Config(format!("HTTP client error: {}", e)))?;
        Ok(Self {
            client,
            permits: Arc::new(Semaphore::new(size)),
            size,
        })
    }

    /// Host parallelism, or 1 when it cannot be determined.
    pub fn default_size() -> usize {
        std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Send a request through the pool and collect status and body.
    pub async fn execute(&self, request: RequestBuilder) -> Result<RawResponse> {
        let request = request
            .build()
            .map_err(|e| FablegateError::Transport(format!("invalid request: {}", e)))?;
        let client = self.client.clone();
        debug!(method = %request.method(), url = %request.url(), "Outbound request");

        self.run(async move {
            let response = client
                .execute(request)
                .await
                .map_err(|e| FablegateError::Transport(format!("HTTP request failed: {}", e)))?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| {
                FablegateError::Transport(format!("failed to read response body: {}", e))
            })?;
            Ok(RawResponse { status, body })
        })
        .await
    }

    /// Run `job` in its own task once a permit is free.
    pub async fn run<F, T>(&self, job: F) -> Result<T>
    where
        F: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        let task = tokio::spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| FablegateError::Transport(format!("outbound pool closed: {}", e)))?;
            job.await
        });
        task.await.map_err(|e| {
            FablegateError::Transport(format!("outbound call did not complete: {}", e))
        })?
    }
}
