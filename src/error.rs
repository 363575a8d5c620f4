use std::path::PathBuf;

/// Errors raised by the catalog, label store and request builder.
#[derive(thiserror::Error, Debug)]
pub enum StudioError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Failed to write {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize JSON: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Please provide text input or upload a file.")]
    EmptyInput,
    #[error("{0}")]
    Validation(String),
    #[error("Language '{0}' is not in the voice catalog")]
    UnknownLanguage(String),
    #[error("Voice '{voice}' is not available for language '{code}'")]
    UnknownVoice { code: String, voice: String },
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl StudioError {
    /// The message shown to the user in the UI's status area.
    pub fn user_message(&self) -> String {
        format!("Error: {self}")
    }

    /// True when the error was caused by a stale language or voice choice.
    ///
    /// The UI should redraw its dropdowns when this is set.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            StudioError::UnknownLanguage(_) | StudioError::UnknownVoice { .. }
        )
    }
}

/// Errors raised by a speech provider while producing audio.
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[cfg(any(feature = "azure", feature = "google"))]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Speech synthesis failed ({status}): {body}")]
    Status { status: u16, body: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Provider returned invalid audio: {0}")]
    Audio(#[from] hound::Error),
    #[error("Failed to decode audio payload: {0}")]
    Decode(String),
    #[error("Invalid synthesis request: {0}")]
    Request(String),
}
