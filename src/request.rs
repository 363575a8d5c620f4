//! Validation of a user's selection into provider call arguments.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use derive_builder::Builder;

use crate::catalog::{Catalog, DEFAULT_STYLE};
use crate::error::StudioError;
use crate::labels::LabelStore;
use crate::resolver::LanguageResolver;

/// Neutral rate and pitch.
pub const NEUTRAL_PERCENT: &str = "0%";

/// Speech rates offered by the UI.
pub const RATE_CHOICES: [&str; 5] = ["-20%", "-10%", "0%", "+10%", "+20%"];

/// Pitch offsets offered by the UI.
pub const PITCH_CHOICES: [&str; 5] = ["-20%", "-10%", "0%", "+10%", "+20%"];

/// What the user picked in the UI before pressing "generate".
///
/// ```
/// use tts_studio::Selection;
///
/// let selection = Selection::builder()
///     .language_display("English (UK)")
///     .voice_display("Ryan")
///     .style("chat")
///     .build()?;
/// assert_eq!(selection.rate, "0%");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into))]
pub struct Selection {
    /// A display label, or a raw language code when no labels exist.
    pub language_display: String,
    pub voice_display: String,
    #[builder(default = "DEFAULT_STYLE.to_string()")]
    pub style: String,
    #[builder(default = "NEUTRAL_PERCENT.to_string()")]
    pub rate: String,
    #[builder(default = "NEUTRAL_PERCENT.to_string()")]
    pub pitch: String,
}

impl Selection {
    pub fn builder() -> SelectionBuilder {
        SelectionBuilder::default()
    }
}

/// Signed percentage offset in `-20%..=+20%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Percent(i32);

impl Percent {
    pub const MIN: i32 = -20;
    pub const MAX: i32 = 20;

    /// Parse `"+10%"`, `"-20%"`, `"0%"` and friends.
    ///
    /// Surrounding whitespace is rejected; accepted strings are forwarded verbatim.
    pub fn parse(value: &str) -> Result<Self, StudioError> {
        let malformed =
            || StudioError::Validation(format!("'{value}' is not a percentage like +10%"));

        let number = value.strip_suffix('%').ok_or_else(malformed)?;
        let (negative, digits) = match number.as_bytes().first() {
            Some(b'+') => (false, &number[1..]),
            Some(b'-') => (true, &number[1..]),
            _ => (false, number),
        };
        if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        let magnitude: i32 = digits.parse().map_err(|_| malformed())?;
        let percent = if negative { -magnitude } else { magnitude };
        if !(Self::MIN..=Self::MAX).contains(&percent) {
            return Err(StudioError::Validation(format!(
                "'{value}' is outside {}%..+{}%",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(percent))
    }

    pub fn value(self) -> i32 {
        self.0
    }

    /// Multiplier relative to normal, e.g. `+10%` → `1.1`.
    pub fn as_factor(self) -> f64 {
        1.0 + f64::from(self.0) / 100.0
    }
}

impl FromStr for Percent {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}%", self.0)
        } else {
            write!(f, "{}%", self.0)
        }
    }
}

/// Text typed into the UI, plus an optional uploaded file that takes precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub typed: String,
    pub file: Option<PathBuf>,
}

impl TextInput {
    pub fn typed(text: impl Into<String>) -> Self {
        Self {
            typed: text.into(),
            file: None,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            typed: String::new(),
            file: Some(path.into()),
        }
    }

    /// The text to synthesize. Uploaded file content wins over typed text.
    pub fn resolve(&self) -> Result<String, StudioError> {
        let text = match &self.file {
            Some(path) => std::fs::read_to_string(path).map_err(|e| {
                StudioError::Validation(format!("Failed to read {}: {e}", path.display()))
            })?,
            None => self.typed.clone(),
        };
        if text.trim().is_empty() {
            return Err(StudioError::EmptyInput);
        }
        Ok(text)
    }
}

/// Exact arguments for [`SpeechProvider::synthesize`](crate::SpeechProvider::synthesize).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisCall {
    pub text: String,
    /// Provider voice identifier, e.g. `"en-GB-RyanNeural"`.
    pub voice_id: String,
    pub style: String,
    pub rate: String,
    pub pitch: String,
}

impl SynthesisCall {
    /// `(text, voice_id, style, rate, pitch)`
    pub fn as_tuple(&self) -> (&str, &str, &str, &str, &str) {
        (
            &self.text,
            &self.voice_id,
            &self.style,
            &self.rate,
            &self.pitch,
        )
    }
}

/// Turns a [`Selection`] and [`TextInput`] into a [`SynthesisCall`].
pub struct RequestBuilder<'a> {
    catalog: &'a Catalog,
    labels: &'a LabelStore,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(catalog: &'a Catalog, labels: &'a LabelStore) -> Self {
        Self { catalog, labels }
    }

    /// Validate the selection, returning a user-facing `"Error: ..."` string on failure.
    pub fn build(&self, selection: &Selection, input: &TextInput) -> Result<SynthesisCall, String> {
        self.try_build(selection, input).map_err(|e| {
            log::debug!("Rejected synthesis request: {e}");
            e.user_message()
        })
    }

    pub fn try_build(
        &self,
        selection: &Selection,
        input: &TextInput,
    ) -> Result<SynthesisCall, StudioError> {
        let text = input.resolve()?;

        let code = LanguageResolver::new(self.catalog, self.labels)
            .resolve_code(&selection.language_display);
        let language = self
            .catalog
            .language(&code)
            .ok_or_else(|| StudioError::UnknownLanguage(code.clone()))?;
        let voice = language
            .voices
            .get(&selection.voice_display)
            .ok_or_else(|| StudioError::UnknownVoice {
                code: code.clone(),
                voice: selection.voice_display.clone(),
            })?;

        Percent::parse(&selection.rate)?;
        Percent::parse(&selection.pitch)?;

        Ok(SynthesisCall {
            text,
            voice_id: voice.id.clone(),
            style: selection.style.clone(),
            rate: selection.rate.clone(),
            pitch: selection.pitch.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "en-GB": { "voices": {
            "Ryan": { "id": "en-GB-RyanNeural", "gender": "Male", "styles": ["default", "chat"] }
        } },
        "de-DE": { "voices": {
            "Katja": { "id": "de-DE-KatjaNeural", "gender": "Female" }
        } }
    }"#;

    fn fixture() -> (Catalog, LabelStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let labels = LabelStore::open(dir.path().join("language_labels.json"));
        (Catalog::from_json_str(CATALOG).unwrap(), labels, dir)
    }

    fn ryan() -> Selection {
        Selection::builder()
            .language_display("en-GB")
            .voice_display("Ryan")
            .build()
            .unwrap()
    }

    #[test]
    fn percent_accepts_the_ui_choices() {
        for choice in RATE_CHOICES.iter().chain(PITCH_CHOICES.iter()) {
            let percent = Percent::parse(choice).unwrap();
            assert_eq!(percent.to_string(), *choice);
        }
        assert_eq!(Percent::parse("7%").unwrap().value(), 7);
        assert!((Percent::parse("+10%").unwrap().as_factor() - 1.1).abs() < 1e-9);
    }

    #[test]
    fn percent_rejects_malformed_and_out_of_range() {
        for bad in [
            "", "%", "10", "+%", "ten%", "1.5%", "--5%", "+-5%", "25%", "-21%", "9999%", " +10%",
            "+10% ", "+ 10%",
        ] {
            assert!(
                matches!(Percent::parse(bad), Err(StudioError::Validation(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn builder_defaults_style_rate_and_pitch() {
        let selection = ryan();
        assert_eq!(selection.style, "default");
        assert_eq!(selection.rate, "0%");
        assert_eq!(selection.pitch, "0%");
        assert!(Selection::builder().voice_display("Ryan").build().is_err());
    }

    #[test]
    fn file_content_wins_over_typed_text() {
        let (catalog, labels, dir) = fixture();
        let file = dir.path().join("speech.txt");
        std::fs::write(&file, "From the file").unwrap();

        let input = TextInput {
            typed: "Typed".to_string(),
            file: Some(file),
        };
        let call = RequestBuilder::new(&catalog, &labels)
            .build(&ryan(), &input)
            .unwrap();
        assert_eq!(call.text, "From the file");
    }

    #[test]
    fn whitespace_only_text_is_rejected() {
        let (catalog, labels, _dir) = fixture();
        let result = RequestBuilder::new(&catalog, &labels).build(&ryan(), &TextInput::typed(" \n\t "));
        assert_eq!(
            result,
            Err("Error: Please provide text input or upload a file.".to_string())
        );
    }

    #[test]
    fn unreadable_file_is_reported_not_raised() {
        let (catalog, labels, dir) = fixture();
        let input = TextInput::file(dir.path().join("missing.txt"));
        let err = RequestBuilder::new(&catalog, &labels)
            .build(&ryan(), &input)
            .unwrap_err();
        assert!(err.starts_with("Error: Failed to read"), "{err}");
    }

    #[test]
    fn unknown_language_or_voice_is_a_lookup_error() {
        let (catalog, labels, _dir) = fixture();
        let builder = RequestBuilder::new(&catalog, &labels);
        let input = TextInput::typed("Hello");

        let mut selection = ryan();
        selection.language_display = "xx-XX".to_string();
        let err = builder.try_build(&selection, &input).unwrap_err();
        assert!(err.is_lookup());

        let mut selection = ryan();
        selection.voice_display = "Katja".to_string();
        let err = builder.try_build(&selection, &input).unwrap_err();
        assert!(err.is_lookup());
        assert_eq!(
            err.user_message(),
            "Error: Voice 'Katja' is not available for language 'en-GB'"
        );
    }

    #[test]
    fn label_is_resolved_before_voice_lookup() {
        let (catalog, labels, _dir) = fixture();
        labels.upsert("de-DE", "German").unwrap();

        let selection = Selection::builder()
            .language_display("German")
            .voice_display("Katja")
            .rate("+10%")
            .pitch("-20%")
            .build()
            .unwrap();
        let call = RequestBuilder::new(&catalog, &labels)
            .build(&selection, &TextInput::typed("Guten Tag"))
            .unwrap();
        assert_eq!(
            call.as_tuple(),
            ("Guten Tag", "de-DE-KatjaNeural", "default", "+10%", "-20%")
        );
    }

    #[test]
    fn malformed_rate_is_rejected() {
        let (catalog, labels, _dir) = fixture();
        let mut selection = ryan();
        selection.rate = "fast".to_string();
        let err = RequestBuilder::new(&catalog, &labels)
            .build(&selection, &TextInput::typed("Hello"))
            .unwrap_err();
        assert!(err.starts_with("Error: 'fast'"), "{err}");
    }

    #[test]
    fn padded_pitch_is_rejected_rather_than_forwarded() {
        let (catalog, labels, _dir) = fixture();
        let mut selection = ryan();
        selection.pitch = " +10% ".to_string();
        let err = RequestBuilder::new(&catalog, &labels)
            .try_build(&selection, &TextInput::typed("Hello"))
            .unwrap_err();
        assert!(matches!(err, StudioError::Validation(_)), "{err}");
    }
}
