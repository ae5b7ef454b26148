//! Best-effort field extraction from upstream JSON payloads.
//!
//! Every field is optional and decoded leniently: a missing path, a value of
//! the wrong type, or a body that is not JSON at all resolves to `None`
//! instead of an error. Extraction never fails a request.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Language code whose flavor texts are used as descriptions.
pub const ENGLISH_LANGUAGE: &str = "en";

/// Decode a field as `T`, or `None` if it does not fit.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[derive(Debug, Default, Deserialize)]
struct NamedResource {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FlavorTextEntry {
    #[serde(default, deserialize_with = "lenient")]
    flavor_text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    language: Option<NamedResource>,
}

#[derive(Debug, Default, Deserialize)]
struct SpeciesDocument {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    habitat: Option<NamedResource>,
    #[serde(default, deserialize_with = "lenient")]
    is_legendary: Option<bool>,
    // Kept as raw values so one malformed entry does not drop its siblings.
    #[serde(default, deserialize_with = "lenient")]
    flavor_text_entries: Option<Vec<Value>>,
}

/// Fields of a species record the service uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesFields {
    /// Top-level `name`.
    pub name: Option<String>,
    /// `habitat.name`.
    pub habitat: Option<String>,
    /// `is_legendary`.
    pub is_legendary: Option<bool>,
    /// English `flavor_text_entries[*].flavor_text`, in document order.
    pub descriptions: Vec<String>,
}

impl SpeciesFields {
    /// Extract fields from a raw species body.
    pub fn from_json(body: &str) -> Self {
        let doc: SpeciesDocument = match serde_json::from_str(body) {
            Ok(doc) => doc,
            Err(e) => {
                debug!("Species body is not a JSON object, all fields absent: {}", e);
                SpeciesDocument::default()
            }
        };

        let descriptions = doc
            .flavor_text_entries
            .unwrap_or_default()
            .into_iter()
            .filter_map(|raw| serde_json::from_value::<FlavorTextEntry>(raw).ok())
            .filter(|entry| {
                entry
                    .language
                    .as_ref()
                    .and_then(|lang| lang.name.as_deref())
                    == Some(ENGLISH_LANGUAGE)
            })
            .filter_map(|entry| entry.flavor_text)
            .collect();

        Self {
            name: doc.name,
            habitat: doc.habitat.and_then(|h| h.name),
            is_legendary: doc.is_legendary,
            descriptions,
        }
    }

    /// The first English description in document order.
    pub fn first_description(&self) -> Option<&str> {
        self.descriptions.first().map(String::as_str)
    }
}

#[derive(Debug, Default, Deserialize)]
struct TranslationContents {
    #[serde(default, deserialize_with = "lenient")]
    translated: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TranslationDocument {
    #[serde(default, deserialize_with = "lenient")]
    contents: Option<TranslationContents>,
}

/// Fields of a translation response the service uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationFields {
    /// `contents.translated`.
    pub translated: Option<String>,
}

impl TranslationFields {
    /// Extract fields from a raw translation body.
    pub fn from_json(body: &str) -> Self {
        let doc: TranslationDocument = serde_json::from_str(body).unwrap_or_default();
        Self {
            translated: doc.contents.and_then(|c| c.translated),
        }
    }
}
