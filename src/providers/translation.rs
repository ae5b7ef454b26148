//! Translation service client.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use super::{OutboundPool, RawResponse, TranslationFetcher};
use crate::config::TranslationApiConfig;
use crate::error::{FablegateError, Result};
use crate::profile::TranslationStyle;

/// Submits `text=<urlencoded>` form posts to the per-style endpoint.
#[derive(Debug, Clone)]
pub struct TranslationClient {
    pool: Arc<OutboundPool>,
    config: TranslationApiConfig,
}

impl TranslationClient {
    pub fn new(pool: Arc<OutboundPool>, config: &TranslationApiConfig) -> Self {
        Self {
            pool,
            config: config.clone(),
        }
    }

    /// Endpoint URL for `style`.
    pub fn endpoint(&self, style: TranslationStyle) -> Result<Url> {
        let path = match style {
            TranslationStyle::Standard => &self.config.standard_path,
            TranslationStyle::Mystic => &self.config.mystic_path,
        };
        let raw = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| {
            FablegateError::Transport(format!("invalid translation URL '{raw}': {e}"))
        })
    }
}

#[async_trait]
impl TranslationFetcher for TranslationClient {
    async fn translate(&self, style: TranslationStyle, text: &str) -> Result<RawResponse> {
        let url = self.endpoint(style)?;
        debug!(%url, %style, "Requesting translation");
        let request = self.pool.client().post(url).form(&[("text", text)]);
        self.pool.execute(request).await
    }
}
