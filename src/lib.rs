//! fablegate: species lookup gateway.
//!
//! Fetches species records from an upstream service, optionally translates the
//! description through a style-selected translation endpoint, and keeps both
//! upstreams behind bounded TTL caches.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod profile;
pub mod providers;
pub mod service;

pub use error::{FablegateError, Result};
