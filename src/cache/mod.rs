//! Upstream result caching with TTL, LRU eviction, and a read-through decorator.

pub mod cached_fetch;
pub mod response_cache;

pub use cached_fetch::{cached_fetch, Cacheable};
pub use response_cache::{CacheStats, ResponseCache};
