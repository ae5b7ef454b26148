//! Description translation with a cached upstream and silent fallback.
//!
//! Every way a translation can fail collapses into one
//! `Result<String, TranslationFailure>`, and [`unwrap_or_original`] is the only
//! place that decides to fall back to the untranslated text.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::{cached_fetch, ResponseCache};
use crate::profile::{select_style, TranslationFields, TranslationStyle};
use crate::providers::{RawResponse, TranslationFetcher};

/// Cache key: identical text under different styles is cached separately.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationKey {
    pub style: TranslationStyle,
    pub text: String,
}

/// Why a translation was not used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationFailure {
    /// The request never produced a response.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("translation service returned status {0}")]
    Status(u16),
    /// Success status, but no usable `contents.translated`.
    #[error("translation response had no translated text")]
    MissingText,
}

/// Use the translation when there is one, otherwise the original text.
pub fn unwrap_or_original(result: Result<String, TranslationFailure>, original: String) -> String {
    match result {
        Ok(translated) => translated,
        Err(reason @ TranslationFailure::Transport(_)) => {
            warn!(%reason, "Failed to translate text, keeping original");
            original
        }
        Err(reason) => {
            debug!(%reason, "Translation unavailable, keeping original");
            original
        }
    }
}

/// Translates species descriptions through the translation cache.
pub struct TranslationService {
    fetcher: Arc<dyn TranslationFetcher>,
    cache: ResponseCache<TranslationKey, RawResponse>,
}

impl TranslationService {
    pub fn new(
        fetcher: Arc<dyn TranslationFetcher>,
        cache: ResponseCache<TranslationKey, RawResponse>,
    ) -> Self {
        Self { fetcher, cache }
    }

    pub fn cache(&self) -> &ResponseCache<TranslationKey, RawResponse> {
        &self.cache
    }

    /// Translate a species description, never failing.
    ///
    /// Absent or empty descriptions are returned as-is without a request.
    pub async fn translate_description(
        &self,
        description: Option<String>,
        habitat: Option<&str>,
        is_legendary: bool,
    ) -> Option<String> {
        let text = match description {
            Some(text) if !text.is_empty() => text,
            other => return other,
        };
        let style = select_style(habitat, is_legendary);
        info!(?habitat, is_legendary, %style, "Translating description");

        let result = self.fetch_translation(style, &text).await;
        Some(unwrap_or_original(result, text))
    }

    /// Fetch the translated text for `text` in `style`.
    pub async fn fetch_translation(
        &self,
        style: TranslationStyle,
        text: &str,
    ) -> Result<String, TranslationFailure> {
        let key = TranslationKey {
            style,
            text: text.to_string(),
        };
        let response = cached_fetch(&self.cache, key, || self.fetcher.translate(style, text))
            .await
            .map_err(|e| TranslationFailure::Transport(e.to_string()))?;

        if !response.is_success() {
            return Err(TranslationFailure::Status(response.status));
        }
        TranslationFields::from_json(&response.body)
            .translated
            .filter(|t| !t.is_empty())
            .ok_or(TranslationFailure::MissingText)
    }
}
