//! # tts-studio
//!
//! The configuration core of a cloud text-to-speech front-end: which
//! languages, voices and speaking styles exist, what each language is called
//! in the UI, and how a user's selection turns into a provider call.
//!
//! ## Features
//!
//! - **Voice catalog**: load-once table of language → voice → styles
//! - **Language labels**: persisted, thread-safe code → display name mapping
//! - **Resolution**: display label ↔ provider code with identity fallback
//! - **Request validation**: selection + text → exact provider arguments
//! - **Providers**: Azure (`azure` feature) and Google (`google` feature)
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! tts-studio = { version = "2026.10", features = ["azure"] }
//! ```
//!
//! ```ignore
//! use tts_studio::{Selection, Studio, StudioConfig, TextInput};
//!
//! let studio = Studio::open(&StudioConfig::from_env()?)?;
//! studio.save_label("en-GB", "English (UK)")?;
//!
//! let selection = Selection::builder()
//!     .language_display("English (UK)")
//!     .voice_display("Ryan")
//!     .style("chat")
//!     .build()?;
//! match studio.generate_audio(&selection, &TextInput::typed("Hello, world!")) {
//!     Ok(path) => println!("Saved to {}", path.display()),
//!     Err(message) => eprintln!("{message}"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod labels;
pub mod providers;
pub mod request;
pub mod resolver;
pub mod studio;

use std::path::PathBuf;

pub use catalog::{Catalog, LanguageEntry, ProviderVoice, VoiceDescriptor, DEFAULT_STYLE};
pub use config::{ProviderSettings, StudioConfig};
pub use error::{ProviderError, StudioError};
pub use labels::LabelStore;
pub use request::{
    Percent, RequestBuilder, Selection, SelectionBuilder, SynthesisCall, TextInput,
    PITCH_CHOICES, RATE_CHOICES,
};
pub use resolver::{LanguageResolver, VoiceChoices};
pub use studio::{LabelView, Studio};

/// A cloud speech service that turns validated call arguments into an audio file.
///
/// Implementations are interchangeable; which one runs is decided by
/// [`ProviderSettings`], not by the caller.
pub trait SpeechProvider: Send + Sync {
    /// Short identifier used in logs (e.g. `"azure"`).
    fn id(&self) -> &'static str;

    /// Synthesize `call` and return the path of the written audio file.
    ///
    /// Failures are not retried.
    fn synthesize(&self, call: &SynthesisCall) -> Result<PathBuf, ProviderError>;
}
