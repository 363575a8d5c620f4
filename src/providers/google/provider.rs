use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::Engine;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_STYLE;
use crate::error::ProviderError;
use crate::providers::{check_status, locale_of, write_audio};
use crate::request::{Percent, SynthesisCall};
use crate::SpeechProvider;

const ENDPOINT: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: TextInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct TextInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    speaking_rate: f64,
    /// Semitones, -20.0..=20.0
    pitch: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

/// Speech provider backed by Google Cloud Text-to-Speech.
pub struct GoogleProvider {
    client: Client,
    api_key: String,
    output_dir: PathBuf,
}

impl GoogleProvider {
    pub fn new(api_key: &str, output_dir: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(concat!("tts-studio/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            output_dir: output_dir.as_ref().to_path_buf(),
        })
    }
}

fn request_body(call: &SynthesisCall) -> Result<SynthesizeRequest<'_>, ProviderError> {
    let rate = Percent::parse(&call.rate).map_err(|e| ProviderError::Request(e.to_string()))?;
    let pitch = Percent::parse(&call.pitch).map_err(|e| ProviderError::Request(e.to_string()))?;

    Ok(SynthesizeRequest {
        input: TextInput { text: &call.text },
        voice: VoiceSelection {
            language_code: locale_of(&call.voice_id),
            name: &call.voice_id,
        },
        audio_config: AudioConfig {
            audio_encoding: "LINEAR16",
            speaking_rate: rate.as_factor(),
            pitch: 12.0 * pitch.as_factor().log2(),
        },
    })
}

impl SpeechProvider for GoogleProvider {
    fn id(&self) -> &'static str {
        "google"
    }

    fn synthesize(&self, call: &SynthesisCall) -> Result<PathBuf, ProviderError> {
        if call.style != DEFAULT_STYLE {
            log::debug!("Google voices have no styles, ignoring '{}'", call.style);
        }
        log::info!(
            "Synthesizing {} chars with {}",
            call.text.chars().count(),
            call.voice_id
        );

        let response = self
            .client
            .post(ENDPOINT)
            .header("X-Goog-Api-Key", &self.api_key)
            .json(&request_body(call)?)
            .send()?;
        let body: SynthesizeResponse = check_status(response)?.json()?;
        let audio = base64::engine::general_purpose::STANDARD
            .decode(body.audio_content.as_bytes())
            .map_err(|e| ProviderError::Decode(e.to_string()))?;
        write_audio(&self.output_dir, &audio)
    }
}
