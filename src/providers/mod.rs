//! Cloud speech providers.
//!
//! Each provider implements [`SpeechProvider`] and is compiled in through a
//! Cargo feature:
//! - `azure` - Azure Cognitive Services Speech (SSML over REST)
//! - `google` - Google Cloud Text-to-Speech (JSON over REST)
//!
//! The provider is chosen at runtime from [`ProviderSettings`].

#[cfg(feature = "azure")]
pub mod azure;
#[cfg(feature = "google")]
pub mod google;

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use crate::config::ProviderSettings;
use crate::error::{ProviderError, StudioError};
use crate::SpeechProvider;

/// Build the provider selected in `settings`, writing audio into `output_dir`.
#[cfg_attr(
    not(any(feature = "azure", feature = "google")),
    allow(unused_variables)
)]
pub fn from_settings(
    settings: &ProviderSettings,
    output_dir: &Path,
) -> Result<Box<dyn SpeechProvider>, StudioError> {
    match settings {
        #[cfg(feature = "azure")]
        ProviderSettings::Azure { key, region } => Ok(Box::new(azure::AzureProvider::new(
            key, region, output_dir,
        )?)),
        #[cfg(feature = "google")]
        ProviderSettings::Google { api_key } => {
            Ok(Box::new(google::GoogleProvider::new(api_key, output_dir)?))
        }
        #[allow(unreachable_patterns)]
        other => Err(StudioError::Config(format!(
            "Provider '{name}' is not compiled in; enable the '{name}' feature",
            name = other.name()
        ))),
    }
}

/// Locale prefix of a provider voice id: `"en-GB-RyanNeural"` → `"en-GB"`.
pub fn locale_of(voice_id: &str) -> &str {
    match voice_id.match_indices('-').nth(1) {
        Some((idx, _)) => &voice_id[..idx],
        None => voice_id,
    }
}

/// Check that `audio` is a WAV file and store it under a fresh name in `output_dir`.
#[cfg_attr(
    not(any(feature = "azure", feature = "google")),
    allow(dead_code)
)]
pub(crate) fn write_audio(output_dir: &Path, audio: &[u8]) -> Result<PathBuf, ProviderError> {
    let reader = hound::WavReader::new(Cursor::new(audio))?;
    let spec = reader.spec();
    let duration_secs = f64::from(reader.duration()) / f64::from(spec.sample_rate.max(1));

    std::fs::create_dir_all(output_dir)?;
    let mut file = tempfile::Builder::new()
        .prefix("tts-")
        .suffix(".wav")
        .tempfile_in(output_dir)?;
    file.write_all(audio)?;
    let (_, path) = file.keep().map_err(|e| ProviderError::Io(e.error))?;

    log::info!(
        "Saved {duration_secs:.2}s of {}Hz audio to {}",
        spec.sample_rate,
        path.display()
    );
    Ok(path)
}

/// Turn a non-success HTTP response into [`ProviderError::Status`].
#[cfg(any(feature = "azure", feature = "google"))]
pub(crate) fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ProviderError::Status {
        status: status.as_u16(),
        body,
    })
}
