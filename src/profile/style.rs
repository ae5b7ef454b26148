//! Translation style selection.

use serde::Serialize;

/// Habitat name that routes descriptions to the mystic style.
pub const CAVE_HABITAT: &str = "cave";

/// Which translation endpoint a description is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStyle {
    /// Used for ordinary species.
    Standard,
    /// Used for legendary species and cave dwellers.
    Mystic,
}

impl std::fmt::Display for TranslationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => f.write_str("standard"),
            Self::Mystic => f.write_str("mystic"),
        }
    }
}

/// Pick the style for a species.
///
/// Legendary species, or a present, non-empty habitat equal to `"cave"`
/// (case-sensitive), get [`TranslationStyle::Mystic`]; everything else,
/// including an absent habitat, gets [`TranslationStyle::Standard`].
pub fn select_style(habitat: Option<&str>, is_legendary: bool) -> TranslationStyle {
    let cave = matches!(habitat, Some(h) if !h.is_empty() && h == CAVE_HABITAT);
    if is_legendary || cave {
        TranslationStyle::Mystic
    } else {
        TranslationStyle::Standard
    }
}
