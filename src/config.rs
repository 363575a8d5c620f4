use std::path::PathBuf;

use crate::error::StudioError;

/// Which cloud provider synthesizes audio, with its credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderSettings {
    Azure { key: String, region: String },
    Google { api_key: String },
}

impl ProviderSettings {
    pub fn name(&self) -> &'static str {
        match self {
            ProviderSettings::Azure { .. } => "azure",
            ProviderSettings::Google { .. } => "google",
        }
    }
}

/// Paths and provider used by a [`Studio`](crate::Studio).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioConfig {
    /// Voice catalog JSON. Required at startup.
    pub catalog_path: PathBuf,
    /// Language label JSON. Created on first save.
    pub labels_path: PathBuf,
    /// Directory for synthesized audio files.
    pub output_dir: PathBuf,
    pub provider: ProviderSettings,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("voices.json"),
            labels_path: PathBuf::from("language_labels.json"),
            output_dir: PathBuf::from("audio_outputs"),
            provider: ProviderSettings::Azure {
                key: String::new(),
                region: String::new(),
            },
        }
    }
}

impl StudioConfig {
    /// Read configuration from the environment, after loading `.env` if present.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `TTS_CATALOG_PATH` | `voices.json` |
    /// | `TTS_LABELS_PATH` | `language_labels.json` |
    /// | `TTS_OUTPUT_DIR` | `audio_outputs` |
    /// | `TTS_PROVIDER` | `azure` (or `google`) |
    /// | `AZURE_KEY`, `AZURE_REGION` | required for `azure` |
    /// | `GOOGLE_API_KEY` | required for `google` |
    pub fn from_env() -> Result<Self, StudioError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                log::warn!("Ignoring unreadable .env file: {e}");
            }
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StudioError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let provider = match var("TTS_PROVIDER")
            .map(|p| p.trim().to_lowercase())
            .as_deref()
        {
            None | Some("azure") => match (var("AZURE_KEY"), var("AZURE_REGION")) {
                (Some(key), Some(region)) => ProviderSettings::Azure { key, region },
                _ => {
                    return Err(StudioError::Config(
                        "Azure credentials are missing: set AZURE_KEY and AZURE_REGION".to_string(),
                    ))
                }
            },
            Some("google") => match var("GOOGLE_API_KEY") {
                Some(api_key) => ProviderSettings::Google { api_key },
                None => {
                    return Err(StudioError::Config(
                        "Google credentials are missing: set GOOGLE_API_KEY".to_string(),
                    ))
                }
            },
            Some(other) => {
                return Err(StudioError::Config(format!(
                    "Unknown TTS_PROVIDER '{other}', expected 'azure' or 'google'"
                )))
            }
        };

        Ok(Self {
            catalog_path: var("TTS_CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            labels_path: var("TTS_LABELS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.labels_path),
            output_dir: var("TTS_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            provider,
        })
    }
}
