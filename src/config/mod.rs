//! Configuration loading for fablegate.
//!
//! Sources, lowest precedence first: compiled defaults, a JSON config file
//! (`--config` or `~/.fablegate/config.json`), then `FABLEGATE_*` environment
//! variables (a `.env` file is loaded by the binary before this runs).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::api::config::ServerConfig;
use crate::error::{FablegateError, Result};

/// Default species service base URL.
pub const DEFAULT_SPECIES_BASE_URL: &str = "https://pokeapi.co";
/// Default species resource path, the subject name is appended as a segment.
pub const DEFAULT_SPECIES_PATH: &str = "/api/v2/pokemon-species";
/// Default translation service base URL.
pub const DEFAULT_TRANSLATION_BASE_URL: &str = "https://api.funtranslations.com";
const DEFAULT_STANDARD_PATH: &str = "/translate/shakespeare";
const DEFAULT_MYSTIC_PATH: &str = "/translate/yoda";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub species: SpeciesApiConfig,
    pub translation: TranslationApiConfig,
    pub caches: CachesConfig,
    pub outbound: OutboundConfig,
}

/// Species service location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesApiConfig {
    pub base_url: String,
    pub path: String,
}

impl Default for SpeciesApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SPECIES_BASE_URL.to_string(),
            path: DEFAULT_SPECIES_PATH.to_string(),
        }
    }
}

/// Translation service location and per-style endpoint paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationApiConfig {
    pub base_url: String,
    /// Endpoint used for the standard style.
    pub standard_path: String,
    /// Endpoint used for the mystic style (legendary or cave dwellers).
    pub mystic_path: String,
}

impl Default for TranslationApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TRANSLATION_BASE_URL.to_string(),
            standard_path: DEFAULT_STANDARD_PATH.to_string(),
            mystic_path: DEFAULT_MYSTIC_PATH.to_string(),
        }
    }
}

/// Settings for one result cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            max_entries: 500,
        }
    }
}

/// The two independently sized result caches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CachesConfig {
    pub species: CacheConfig,
    pub translation: CacheConfig,
}

/// Outbound worker pool settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutboundConfig {
    /// Maximum concurrent outbound calls. `0` means host parallelism.
    pub max_concurrency: usize,
}

impl Config {
    /// Default config file location (`~/.fablegate/config.json`).
    pub fn path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fablegate")
            .join("config.json")
    }

    /// Load configuration from file (if any) and the process environment.
    ///
    /// An explicit path must exist; the default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    debug!("No config file at {}, using defaults", path.display());
                    Self::default()
                }
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            FablegateError::Config(format!("invalid config file {}: {}", path.display(), e))
        })
    }

    /// Apply `FABLEGATE_*` overrides resolved through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("FABLEGATE_BIND") {
            self.server.bind = v;
        }
        if let Some(v) = parse_var(&lookup, "FABLEGATE_PORT") {
            self.server.port = v;
        }
        if let Some(v) = lookup("FABLEGATE_SPECIES_BASE_URL") {
            self.species.base_url = v;
        }
        if let Some(v) = lookup("FABLEGATE_SPECIES_PATH") {
            self.species.path = v;
        }
        if let Some(v) = lookup("FABLEGATE_TRANSLATION_BASE_URL") {
            self.translation.base_url = v;
        }
        if let Some(v) = parse_var(&lookup, "FABLEGATE_SPECIES_CACHE_TTL_SECS") {
            self.caches.species.ttl_secs = v;
        }
        if let Some(v) = parse_var(&lookup, "FABLEGATE_SPECIES_CACHE_MAX_ENTRIES") {
            self.caches.species.max_entries = v;
        }
        if let Some(v) = parse_var(&lookup, "FABLEGATE_TRANSLATION_CACHE_TTL_SECS") {
            self.caches.translation.ttl_secs = v;
        }
        if let Some(v) = parse_var(&lookup, "FABLEGATE_TRANSLATION_CACHE_MAX_ENTRIES") {
            self.caches.translation.max_entries = v;
        }
        if let Some(v) = parse_var(&lookup, "FABLEGATE_OUTBOUND_MAX_CONCURRENCY") {
            self.outbound.max_concurrency = v;
        }
    }

    /// Reject base URLs that cannot be parsed.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("species.base_url", &self.species.base_url),
            ("translation.base_url", &self.translation.base_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| FablegateError::Config(format!("{field} '{value}': {e}")))?;
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring {key}={raw}: not a valid number");
            None
        }
    }
}
