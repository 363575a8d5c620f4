//! Read-only table of languages, voices and speaking styles.
//!
//! The catalog is loaded once from a JSON resource shaped as
//!
//! ```text
//! { "<code>": { "voices": { "<display name>": { "id", "gender", "styles": [..] } } } }
//! ```
//!
//! and never mutated afterwards. Lookups for codes or voices that are not in
//! the table are not errors: they yield an empty voice list or the
//! `["default"]` style list.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::StudioError;
use crate::labels::write_atomic;

/// Style every voice supports; plain synthesis without an expressive style.
pub const DEFAULT_STYLE: &str = "default";

/// A single provider voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceDescriptor {
    /// Provider voice identifier (e.g. `"en-GB-RyanNeural"`).
    pub id: String,
    pub gender: String,
    /// Supported styles in catalog order. Never empty, always contains `"default"`.
    pub styles: Vec<String>,
}

/// All voices available for one provider language code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageEntry {
    #[serde(skip)]
    pub code: String,
    /// Voices keyed by display name, in catalog order.
    pub voices: IndexMap<String, VoiceDescriptor>,
}

/// Voice catalog keyed by provider language code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    languages: IndexMap<String, LanguageEntry>,
}

/// A voice as reported by a provider's voice-list endpoint.
///
/// Used to rebuild the catalog resource from the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderVoice {
    pub locale: String,
    pub display_name: String,
    pub id: String,
    pub gender: String,
    pub styles: Vec<String>,
}

#[derive(Deserialize)]
struct RawLanguage {
    #[serde(default)]
    voices: IndexMap<String, RawVoice>,
}

#[derive(Deserialize)]
struct RawVoice {
    id: String,
    #[serde(default)]
    gender: String,
    styles: Option<Vec<String>>,
}

impl Catalog {
    /// Load and validate the catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, StudioError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StudioError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let catalog = Self::from_json_str(&content)?;
        log::info!(
            "Loaded voice catalog with {} languages from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse and validate the catalog from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, StudioError> {
        let raw: IndexMap<String, RawLanguage> = serde_json::from_str(content)
            .map_err(|e| StudioError::Config(format!("Failed to parse JSON: {e}")))?;

        let mut languages = IndexMap::with_capacity(raw.len());
        for (code, language) in raw {
            if language.voices.is_empty() {
                return Err(StudioError::Config(format!(
                    "Language '{code}' has no voices"
                )));
            }

            let mut voices = IndexMap::with_capacity(language.voices.len());
            for (name, voice) in language.voices {
                if voice.id.trim().is_empty() {
                    return Err(StudioError::Config(format!(
                        "Voice '{name}' in '{code}' has an empty id"
                    )));
                }
                let styles = match voice.styles {
                    None => vec![DEFAULT_STYLE.to_string()],
                    Some(styles) if styles.is_empty() => {
                        return Err(StudioError::Config(format!(
                            "Voice '{name}' in '{code}' has an empty style list"
                        )));
                    }
                    Some(styles) => with_default_style(styles),
                };
                voices.insert(
                    name,
                    VoiceDescriptor {
                        id: voice.id,
                        gender: voice.gender,
                        styles,
                    },
                );
            }

            languages.insert(code.clone(), LanguageEntry { code, voices });
        }

        Ok(Self { languages })
    }

    /// Build a catalog from a provider's flat voice list.
    ///
    /// Voices are grouped by locale and keyed by display name; a later voice
    /// with the same display name replaces the earlier one.
    pub fn from_provider_voices<I>(voices: I) -> Self
    where
        I: IntoIterator<Item = ProviderVoice>,
    {
        let mut languages: IndexMap<String, LanguageEntry> = IndexMap::new();
        for voice in voices {
            let entry = languages
                .entry(voice.locale.clone())
                .or_insert_with(|| LanguageEntry {
                    code: voice.locale.clone(),
                    voices: IndexMap::new(),
                });
            let styles = if voice.styles.is_empty() {
                vec![DEFAULT_STYLE.to_string()]
            } else {
                with_default_style(voice.styles)
            };
            entry.voices.insert(
                voice.display_name,
                VoiceDescriptor {
                    id: voice.id,
                    gender: voice.gender,
                    styles,
                },
            );
        }
        Self { languages }
    }

    /// Write the catalog back to disk as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), StudioError> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, json.as_bytes())?;
        log::info!(
            "Saved voice catalog with {} languages to {}",
            self.len(),
            path.display()
        );
        Ok(())
    }

    /// Language codes in catalog order.
    pub fn codes(&self) -> Vec<String> {
        self.languages.keys().cloned().collect()
    }

    pub fn language(&self, code: &str) -> Option<&LanguageEntry> {
        self.languages.get(code)
    }

    pub fn voice(&self, code: &str, voice_name: &str) -> Option<&VoiceDescriptor> {
        self.languages.get(code)?.voices.get(voice_name)
    }

    /// Voice display names for `code`, or an empty list if the code is unknown.
    pub fn voices_for(&self, code: &str) -> Vec<String> {
        self.languages
            .get(code)
            .map(|entry| entry.voices.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Styles for a voice, or `["default"]` if the code or voice is unknown.
    pub fn styles_for(&self, code: &str, voice_name: &str) -> Vec<String> {
        self.voice(code, voice_name)
            .map(|voice| voice.styles.clone())
            .unwrap_or_else(|| vec![DEFAULT_STYLE.to_string()])
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

fn with_default_style(mut styles: Vec<String>) -> Vec<String> {
    if !styles.iter().any(|s| s == DEFAULT_STYLE) {
        styles.insert(0, DEFAULT_STYLE.to_string());
    }
    styles
}
