use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::config::StudioConfig;
use crate::error::StudioError;
use crate::labels::LabelStore;
use crate::providers;
use crate::request::{RequestBuilder, Selection, TextInput};
use crate::resolver::{LanguageResolver, VoiceChoices};
use crate::SpeechProvider;

/// State of the label editor after a change: table rows and dropdown entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelView {
    /// `(code, label)` rows in store order.
    pub rows: Vec<(String, String)>,
    /// Entries for every language dropdown.
    pub languages: Vec<String>,
}

/// Everything a UI needs: catalog, shared label store and the configured provider.
///
/// `Studio` is `Send + Sync`; share one instance between sessions with an `Arc`.
pub struct Studio {
    catalog: Catalog,
    labels: LabelStore,
    provider: Box<dyn SpeechProvider>,
}

impl Studio {
    pub fn new(catalog: Catalog, labels: LabelStore, provider: Box<dyn SpeechProvider>) -> Self {
        Self {
            catalog,
            labels,
            provider,
        }
    }

    /// Load the catalog and labels and build the configured provider.
    ///
    /// Fails if the catalog is missing or invalid; a missing label file is fine.
    pub fn open(config: &StudioConfig) -> Result<Self, StudioError> {
        let provider = providers::from_settings(&config.provider, &config.output_dir)?;
        Self::open_with_provider(config, provider)
    }

    /// Like [`Studio::open`], with a caller-supplied provider.
    ///
    /// Nothing is created on disk until the catalog has loaded.
    pub fn open_with_provider(
        config: &StudioConfig,
        provider: Box<dyn SpeechProvider>,
    ) -> Result<Self, StudioError> {
        let catalog = Catalog::load(&config.catalog_path)?;
        let labels = LabelStore::open(&config.labels_path);
        std::fs::create_dir_all(&config.output_dir).map_err(|source| {
            StudioError::Persistence {
                path: config.output_dir.clone(),
                source,
            }
        })?;
        log::info!(
            "Studio ready: {} languages, {} labels, provider {}",
            catalog.len(),
            labels.len(),
            provider.id()
        );
        Ok(Self::new(catalog, labels, provider))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn labels(&self) -> &LabelStore {
        &self.labels
    }

    pub fn provider_id(&self) -> &'static str {
        self.provider.id()
    }

    fn resolver(&self) -> LanguageResolver<'_> {
        LanguageResolver::new(&self.catalog, &self.labels)
    }

    pub fn languages(&self) -> Vec<String> {
        self.resolver().display_list()
    }

    pub fn voice_choices(&self, language_display: &str) -> VoiceChoices {
        self.resolver().voice_choices(language_display)
    }

    pub fn styles(&self, language_display: &str, voice: &str) -> Vec<String> {
        self.resolver().styles_for_display(language_display, voice)
    }

    pub fn default_selection(&self) -> Option<Selection> {
        self.resolver().default_selection()
    }

    /// Validate the selection and synthesize it.
    ///
    /// Returns the audio file path, or an `"Error: ..."` message for the UI.
    pub fn generate_audio(&self, selection: &Selection, input: &TextInput) -> Result<PathBuf, String> {
        let call = RequestBuilder::new(&self.catalog, &self.labels).build(selection, input)?;
        self.provider.synthesize(&call).map_err(|e| {
            log::error!("{} synthesis failed: {e}", self.provider.id());
            StudioError::from(e).user_message()
        })
    }

    pub fn save_label(&self, code: &str, label: &str) -> Result<LabelView, StudioError> {
        self.labels.upsert(code, label)?;
        Ok(self.label_view())
    }

    pub fn delete_label(&self, label: &str) -> Result<LabelView, StudioError> {
        self.labels.delete(label)?;
        Ok(self.label_view())
    }

    pub fn reload_labels(&self) -> LabelView {
        self.labels.reload();
        self.label_view()
    }

    pub fn label_view(&self) -> LabelView {
        LabelView {
            rows: self.labels.snapshot(),
            languages: self.languages(),
        }
    }
}
