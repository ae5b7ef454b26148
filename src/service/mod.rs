//! Request pipelines built on top of the providers and caches.

pub mod species;
pub mod translation;

pub use species::{CachesStats, SpeciesService};
pub use translation::{unwrap_or_original, TranslationFailure, TranslationKey, TranslationService};
