//! Explicit read-through caching around an upstream fetch.

use std::future::Future;
use std::hash::Hash;

use tracing::debug;

use super::ResponseCache;

/// Values that know whether they may be stored.
pub trait Cacheable {
    fn is_cacheable(&self) -> bool;
}

/// Serve `key` from `cache`, or run `fetch` and store its result.
///
/// Only values that report [`Cacheable::is_cacheable`] are stored. Fetch
/// errors are propagated untouched and never cached.
pub async fn cached_fetch<K, V, E, F, Fut>(
    cache: &ResponseCache<K, V>,
    key: K,
    fetch: F,
) -> std::result::Result<V, E>
where
    K: Eq + Hash + Clone,
    V: Clone + Cacheable,
    F: FnOnce() -> Fut,
    Fut: Future<Output = std::result::Result<V, E>>,
{
    if let Some(hit) = cache.get(&key) {
        debug!(cache = cache.name(), "Cache hit");
        return Ok(hit);
    }

    let value = fetch().await?;
    if value.is_cacheable() {
        cache.put(key, value.clone());
    } else {
        debug!(cache = cache.name(), "Response not cacheable, skipping store");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::RawResponse;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cache() -> ResponseCache<String, RawResponse> {
        ResponseCache::new("test", 3600, 10)
    }

    #[tokio::test]
    async fn test_success_is_cached() {
        let cache = cache();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let resp: Result<RawResponse, String> = cached_fetch(&cache, "k".into(), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(RawResponse::new(200, "body"))
            })
            .await;
            assert_eq!(resp.unwrap().body, "body");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_non_success_is_returned_but_not_cached() {
        let cache = cache();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let resp: Result<RawResponse, String> = cached_fetch(&cache, "k".into(), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(RawResponse::new(404, "Not Found"))
            })
            .await;
            assert_eq!(resp.unwrap().status, 404);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_error_is_propagated_and_not_cached() {
        let cache = cache();
        let resp: Result<RawResponse, String> =
            cached_fetch(&cache, "k".into(), || async { Err("boom".to_string()) }).await;
        assert_eq!(resp.unwrap_err(), "boom");
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_distinct_keys_fetch_independently() {
        let cache = cache();
        let a: Result<RawResponse, String> =
            cached_fetch(&cache, "a".into(), || async { Ok(RawResponse::new(200, "A")) }).await;
        let b: Result<RawResponse, String> =
            cached_fetch(&cache, "b".into(), || async { Ok(RawResponse::new(200, "B")) }).await;
        assert_eq!(a.unwrap().body, "A");
        assert_eq!(b.unwrap().body, "B");
        assert_eq!(cache.len(), 2);
    }
}
