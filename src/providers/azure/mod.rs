//! Azure Cognitive Services Speech provider.
//!
//! Requests are sent as SSML to the regional REST endpoint and returned as
//! 24 kHz 16-bit mono WAV. Speaking styles other than `default` are wrapped
//! in `mstts:express-as`; rate and pitch always go through `prosody`.
//!
//! # Example
//!
//! ```rust,no_run
//! use tts_studio::providers::azure::AzureProvider;
//! use tts_studio::{SpeechProvider, SynthesisCall};
//!
//! let provider = AzureProvider::new("<key>", "uksouth", "audio_outputs")?;
//! let call = SynthesisCall {
//!     text: "Hello".into(),
//!     voice_id: "en-GB-RyanNeural".into(),
//!     style: "chat".into(),
//!     rate: "0%".into(),
//!     pitch: "0%".into(),
//! };
//! let path = provider.synthesize(&call)?;
//! println!("Saved to {}", path.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The same credentials can refresh the voice catalog:
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tts_studio::providers::azure::AzureProvider;
//! use tts_studio::Catalog;
//!
//! let provider = AzureProvider::new("<key>", "uksouth", "audio_outputs")?;
//! let catalog = Catalog::from_provider_voices(provider.fetch_voices()?);
//! catalog.save(Path::new("voices.json"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod provider;
pub mod ssml;

pub use provider::AzureProvider;
pub use ssml::build_ssml;
