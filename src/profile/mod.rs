//! Normalized species record and the pure steps that build it.

pub mod extract;
pub mod style;

use serde::{Deserialize, Serialize};

pub use extract::{SpeciesFields, TranslationFields, ENGLISH_LANGUAGE};
pub use style::{select_style, TranslationStyle, CAVE_HABITAT};

/// The record returned to callers, built once per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habitat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_legendary: Option<bool>,
}
