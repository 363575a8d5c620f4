use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use super::ssml::build_ssml;
use crate::catalog::ProviderVoice;
use crate::error::ProviderError;
use crate::providers::{check_status, write_audio};
use crate::request::SynthesisCall;
use crate::SpeechProvider;

/// Audio format requested from the service.
pub const OUTPUT_FORMAT: &str = "riff-24khz-16bit-mono-pcm";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Entry of the regional `voices/list` endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AzureVoice {
    /// Voice id, e.g. "en-GB-RyanNeural"
    short_name: String,
    /// Name in the voice's own language, e.g. "Ryan"
    local_name: String,
    gender: String,
    locale: String,
    #[serde(default)]
    style_list: Option<Vec<String>>,
}

/// Speech provider backed by the Azure Speech REST API.
pub struct AzureProvider {
    client: Client,
    key: String,
    region: String,
    output_dir: PathBuf,
}

impl AzureProvider {
    pub fn new(
        key: &str,
        region: &str,
        output_dir: impl AsRef<Path>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(concat!("tts-studio/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            key: key.to_string(),
            region: region.to_string(),
            output_dir: output_dir.as_ref().to_path_buf(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "https://{}.tts.speech.microsoft.com/cognitiveservices/{path}",
            self.region
        )
    }

    /// Fetch every voice the region offers.
    pub fn fetch_voices(&self) -> Result<Vec<ProviderVoice>, ProviderError> {
        log::info!("Fetching voices from Azure region {}", self.region);
        let response = self
            .client
            .get(self.endpoint("voices/list"))
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .send()?;
        let voices: Vec<AzureVoice> = check_status(response)?.json()?;
        log::info!("Azure returned {} voices", voices.len());

        Ok(voices
            .into_iter()
            .map(|voice| ProviderVoice {
                locale: voice.locale,
                display_name: voice.local_name,
                id: voice.short_name,
                gender: voice.gender,
                styles: voice.style_list.unwrap_or_default(),
            })
            .collect())
    }
}

impl SpeechProvider for AzureProvider {
    fn id(&self) -> &'static str {
        "azure"
    }

    fn synthesize(&self, call: &SynthesisCall) -> Result<PathBuf, ProviderError> {
        log::info!(
            "Synthesizing {} chars with {} (style {})",
            call.text.chars().count(),
            call.voice_id,
            call.style
        );
        let response = self
            .client
            .post(self.endpoint("v1"))
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .body(build_ssml(call))
            .send()?;
        let audio = check_status(response)?.bytes()?;
        write_audio(&self.output_dir, &audio)
    }
}
