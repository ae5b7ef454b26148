//! Species lookup pipeline.
//!
//! fetch (cached) → extract → optional translation → [`SpeciesProfile`].
//! Each call is an independent pass with no retries; the two caches are the
//! only state shared between requests.

use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use super::translation::{TranslationKey, TranslationService};
use crate::cache::{cached_fetch, CacheStats, ResponseCache};
use crate::config::Config;
use crate::error::{FablegateError, Result};
use crate::profile::{SpeciesFields, SpeciesProfile};
use crate::providers::{
    OutboundPool, RawResponse, SpeciesClient, SpeciesFetcher, TranslationClient,
};

/// Stats for both caches, as reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CachesStats {
    pub species: CacheStats,
    pub translation: CacheStats,
}

/// Builds species profiles from the species and translation upstreams.
pub struct SpeciesService {
    fetcher: Arc<dyn SpeciesFetcher>,
    cache: ResponseCache<String, RawResponse>,
    translation: TranslationService,
}

impl SpeciesService {
    pub fn new(
        fetcher: Arc<dyn SpeciesFetcher>,
        cache: ResponseCache<String, RawResponse>,
        translation: TranslationService,
    ) -> Self {
        Self {
            fetcher,
            cache,
            translation,
        }
    }

    /// Wire real HTTP clients, one shared outbound pool and both caches.
    pub fn from_config(config: &Config) -> Result<Self> {
        let pool = Arc::new(OutboundPool::new(config.outbound.max_concurrency)?);
        info!(pool_size = pool.size(), "Outbound pool ready");

        let species = SpeciesClient::new(Arc::clone(&pool), &config.species);
        let translator = TranslationClient::new(pool, &config.translation);
        let translation = TranslationService::new(
            Arc::new(translator),
            ResponseCache::<TranslationKey, RawResponse>::from_config(
                "translation",
                &config.caches.translation,
            ),
        );
        Ok(Self::new(
            Arc::new(species),
            ResponseCache::from_config("species", &config.caches.species),
            translation,
        ))
    }

    /// Look up `name`, optionally translating its description.
    ///
    /// Fails only when the species fetch fails; translation problems fall
    /// back to the original description.
    pub async fn get_species(&self, name: &str, translated: bool) -> Result<SpeciesProfile> {
        info!(name, translated, "Received species request");

        let response = cached_fetch(&self.cache, name.to_string(), || {
            self.fetcher.fetch_species(name)
        })
        .await?;
        if !response.is_success() {
            error!(
                name,
                status = response.status,
                body = %response.body,
                "Species service responded with failure"
            );
            return Err(FablegateError::UpstreamSpecies {
                status: response.status,
                body: response.body,
            });
        }

        let fields = SpeciesFields::from_json(&response.body);
        let description = fields.first_description().map(str::to_string);
        let description = if translated {
            self.translation
                .translate_description(
                    description,
                    fields.habitat.as_deref(),
                    fields.is_legendary.unwrap_or(false),
                )
                .await
        } else {
            description
        };

        let profile = SpeciesProfile {
            name: fields.name.unwrap_or_else(|| name.to_string()),
            description,
            habitat: fields.habitat,
            is_legendary: fields.is_legendary,
        };
        info!(
            name = %profile.name,
            habitat = ?profile.habitat,
            is_legendary = ?profile.is_legendary,
            description = ?profile.description,
            "Built species profile"
        );
        Ok(profile)
    }

    /// Drop every cached upstream response.
    pub fn clear_caches(&self) {
        self.cache.clear();
        self.translation.cache().clear();
        info!("Cleared species and translation caches");
    }

    pub fn cache_stats(&self) -> CachesStats {
        CachesStats {
            species: self.cache.stats(),
            translation: self.translation.cache().stats(),
        }
    }
}
