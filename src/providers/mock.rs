//! Call-counting fetchers for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{RawResponse, SpeciesFetcher, TranslationFetcher};
use crate::error::{FablegateError, Result};
use crate::profile::TranslationStyle;

/// Serves canned species responses; unknown names get `404 Not Found`.
#[derive(Default)]
pub struct MockSpeciesFetcher {
    responses: Mutex<HashMap<String, RawResponse>>,
    calls: Mutex<Vec<String>>,
    transport_error: Option<String>,
}

impl MockSpeciesFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, name: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(name.to_string(), RawResponse::new(status, body));
        self
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            transport_error: Some(msg.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeciesFetcher for MockSpeciesFetcher {
    async fn fetch_species(&self, name: &str) -> Result<RawResponse> {
        self.calls.lock().unwrap().push(name.to_string());
        if let Some(msg) = &self.transport_error {
            return Err(FablegateError::Transport(msg.clone()));
        }
        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_else(|| RawResponse::new(404, "Not Found")))
    }
}

/// Answers every translation with one fixed outcome.
pub struct MockTranslationFetcher {
    outcome: std::result::Result<RawResponse, String>,
    calls: Mutex<Vec<(TranslationStyle, String)>>,
}

impl MockTranslationFetcher {
    pub fn responding(status: u16, body: &str) -> Self {
        Self {
            outcome: Ok(RawResponse::new(status, body)),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Shorthand for a 200 carrying `contents.translated`.
    pub fn translated(text: &str) -> Self {
        let body = serde_json::json!({ "contents": { "translated": text } }).to_string();
        Self::responding(200, &body)
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            outcome: Err(msg.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(TranslationStyle, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationFetcher for MockTranslationFetcher {
    async fn translate(&self, style: TranslationStyle, text: &str) -> Result<RawResponse> {
        self.calls.lock().unwrap().push((style, text.to_string()));
        self.outcome
            .clone()
            .map_err(FablegateError::Transport)
    }
}
