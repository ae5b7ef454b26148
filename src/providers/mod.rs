//! Upstream HTTP providers.
//!
//! `SpeciesFetcher` and `TranslationFetcher` abstract the two outbound calls
//! for testability. `SpeciesClient` and `TranslationClient` are the real
//! implementations; both run through a shared [`OutboundPool`].

use async_trait::async_trait;

use crate::cache::Cacheable;
use crate::error::Result;
use crate::profile::TranslationStyle;

pub mod pool;
pub mod species;
pub mod translation;

#[cfg(test)]
pub mod mock;

pub use pool::OutboundPool;
pub use species::SpeciesClient;
pub use translation::TranslationClient;

/// Status and body of an upstream response, untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl Cacheable for RawResponse {
    fn is_cacheable(&self) -> bool {
        self.is_success()
    }
}

/// Reads a species record by subject name.
#[async_trait]
pub trait SpeciesFetcher: Send + Sync {
    /// Issue one read for `name`. Non-success statuses are `Ok`.
    async fn fetch_species(&self, name: &str) -> Result<RawResponse>;
}

/// Submits text to the translation service for one style.
#[async_trait]
pub trait TranslationFetcher: Send + Sync {
    /// Issue one translation request. Non-success statuses are `Ok`.
    async fn translate(&self, style: TranslationStyle, text: &str) -> Result<RawResponse>;
}

/// Bind an axum router on an ephemeral local port and return its base URL.
#[cfg(test)]
pub(crate) async fn spawn_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(RawResponse::new(200, "").is_success());
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(199, "").is_success());
        assert!(!RawResponse::new(301, "").is_success());
        assert!(!RawResponse::new(404, "").is_success());
        assert!(!RawResponse::new(429, "").is_success());
    }

    #[test]
    fn test_only_success_is_cacheable() {
        assert!(RawResponse::new(200, "ok").is_cacheable());
        assert!(!RawResponse::new(500, "oops").is_cacheable());
    }
}
