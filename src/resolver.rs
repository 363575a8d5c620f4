//! Translation between what the UI shows and what the catalog is keyed by.
//!
//! The language dropdown shows display labels as soon as at least one label has
//! been saved, and raw catalog codes otherwise. There is no per-entry mix: a
//! code without a label simply does not appear while labels exist.
//!
//! Any string that is not a known label is assumed to already be a code.

use crate::catalog::{Catalog, DEFAULT_STYLE};
use crate::labels::LabelStore;
use crate::request::{Selection, NEUTRAL_PERCENT};

/// Voice and style options to redraw after the language changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceChoices {
    pub voices: Vec<String>,
    pub default_voice: Option<String>,
    pub styles: Vec<String>,
    pub default_style: Option<String>,
}

/// Read-only view combining the label store with the catalog.
#[derive(Clone, Copy)]
pub struct LanguageResolver<'a> {
    catalog: &'a Catalog,
    labels: &'a LabelStore,
}

impl<'a> LanguageResolver<'a> {
    pub fn new(catalog: &'a Catalog, labels: &'a LabelStore) -> Self {
        Self { catalog, labels }
    }

    /// Entries for the language dropdown: labels if any exist, else catalog codes.
    pub fn display_list(&self) -> Vec<String> {
        let labels = self.labels.labels();
        if labels.is_empty() {
            self.catalog.codes()
        } else {
            labels
        }
    }

    /// Provider code for a label, or `display_or_code` unchanged.
    pub fn resolve_code(&self, display_or_code: &str) -> String {
        let code = self.labels.resolve_code(display_or_code);
        if code != display_or_code {
            log::debug!("Resolved '{display_or_code}' to {code}");
        }
        code
    }

    pub fn voices_for_display(&self, display: &str) -> Vec<String> {
        self.catalog.voices_for(&self.resolve_code(display))
    }

    pub fn styles_for_display(&self, display: &str, voice: &str) -> Vec<String> {
        self.catalog.styles_for(&self.resolve_code(display), voice)
    }

    /// Voices for a language, preselecting the first voice and its first style.
    pub fn voice_choices(&self, display: &str) -> VoiceChoices {
        let code = self.resolve_code(display);
        let voices = self.catalog.voices_for(&code);
        let Some(default_voice) = voices.first().cloned() else {
            return VoiceChoices::default();
        };

        let styles = self.catalog.styles_for(&code, &default_voice);
        let default_style = styles.first().cloned();
        VoiceChoices {
            voices,
            default_voice: Some(default_voice),
            styles,
            default_style,
        }
    }

    /// Initial UI state: first language, its first voice and style, neutral prosody.
    pub fn default_selection(&self) -> Option<Selection> {
        let language = self.display_list().into_iter().next()?;
        let choices = self.voice_choices(&language);
        let voice = choices.default_voice?;
        Some(Selection {
            language_display: language,
            voice_display: voice,
            style: choices
                .default_style
                .unwrap_or_else(|| DEFAULT_STYLE.to_string()),
            rate: NEUTRAL_PERCENT.to_string(),
            pitch: NEUTRAL_PERCENT.to_string(),
        })
    }
}
