use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use tts_studio::{
    Catalog, LabelStore, ProviderError, RequestBuilder, Selection, SpeechProvider, Studio,
    StudioConfig, StudioError, SynthesisCall, TextInput,
};

const CATALOG: &str = r#"{
    "en-GB": { "voices": {
        "Ryan": { "id": "en-GB-RyanNeural", "gender": "Male", "styles": ["default", "chat"] }
    } },
    "fr-FR": { "voices": {
        "Denise": { "id": "fr-FR-DeniseNeural", "gender": "Female" }
    } }
}"#;

/// Records every call and answers with a fixed path or a provider failure.
#[derive(Clone, Default)]
struct RecordingProvider {
    calls: Arc<Mutex<Vec<SynthesisCall>>>,
    fail_with: Option<u16>,
}

impl SpeechProvider for RecordingProvider {
    fn id(&self) -> &'static str {
        "recording"
    }

    fn synthesize(&self, call: &SynthesisCall) -> Result<PathBuf, ProviderError> {
        self.calls.lock().unwrap().push(call.clone());
        match self.fail_with {
            Some(status) => Err(ProviderError::Status {
                status,
                body: "quota exceeded".to_string(),
            }),
            None => Ok(PathBuf::from("audio_outputs/tts-test.wav")),
        }
    }
}

fn studio_with(provider: RecordingProvider) -> (Studio, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let labels = LabelStore::open(dir.path().join("language_labels.json"));
    let catalog = Catalog::from_json_str(CATALOG).unwrap();
    (Studio::new(catalog, labels, Box::new(provider)), dir)
}

fn config_in(dir: &tempfile::TempDir) -> StudioConfig {
    StudioConfig {
        catalog_path: dir.path().join("voices.json"),
        labels_path: dir.path().join("language_labels.json"),
        output_dir: dir.path().join("audio_outputs"),
        ..StudioConfig::default()
    }
}

fn ryan_chat() -> Selection {
    Selection::builder()
        .language_display("en-GB")
        .voice_display("Ryan")
        .style("chat")
        .rate("0%")
        .pitch("0%")
        .build()
        .unwrap()
}

#[test]
fn builds_exact_call_tuple_with_empty_label_store() {
    let dir = tempfile::tempdir().unwrap();
    let labels = LabelStore::open(dir.path().join("language_labels.json"));
    let catalog = Catalog::from_json_str(CATALOG).unwrap();

    let call = RequestBuilder::new(&catalog, &labels)
        .build(&ryan_chat(), &TextInput::typed("Hello"))
        .unwrap();
    assert_eq!(
        call.as_tuple(),
        ("Hello", "en-GB-RyanNeural", "chat", "0%", "0%")
    );
}

#[test]
fn empty_text_and_no_file_produces_no_call() {
    let provider = RecordingProvider::default();
    let (studio, _dir) = studio_with(provider.clone());

    let result = studio.generate_audio(&ryan_chat(), &TextInput::default());
    assert_eq!(
        result,
        Err("Error: Please provide text input or upload a file.".to_string())
    );
    assert!(provider.calls.lock().unwrap().is_empty());
}

#[test]
fn generate_audio_passes_the_call_to_the_provider() {
    let provider = RecordingProvider::default();
    let (studio, _dir) = studio_with(provider.clone());

    let path = studio
        .generate_audio(&ryan_chat(), &TextInput::typed("Hello"))
        .unwrap();
    assert_eq!(path, PathBuf::from("audio_outputs/tts-test.wav"));

    let calls = provider.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].voice_id, "en-GB-RyanNeural");
}

#[test]
fn provider_failures_become_error_strings() {
    let provider = RecordingProvider {
        fail_with: Some(429),
        ..Default::default()
    };
    let (studio, _dir) = studio_with(provider);

    let err = studio
        .generate_audio(&ryan_chat(), &TextInput::typed("Hello"))
        .unwrap_err();
    assert_eq!(err, "Error: Speech synthesis failed (429): quota exceeded");
}

#[test]
fn label_round_trip_through_the_studio() {
    let (studio, _dir) = studio_with(RecordingProvider::default());
    assert_eq!(studio.languages(), vec!["en-GB", "fr-FR"]);

    let view = studio.save_label("en-GB", "English (UK)").unwrap();
    assert_eq!(
        view.rows,
        vec![("en-GB".to_string(), "English (UK)".to_string())]
    );
    assert_eq!(view.languages, vec!["English (UK)"]);
    assert_eq!(studio.labels().resolve_code("English (UK)"), "en-GB");

    let selection = Selection::builder()
        .language_display("English (UK)")
        .voice_display("Ryan")
        .build()
        .unwrap();
    assert!(studio
        .generate_audio(&selection, &TextInput::typed("Hello"))
        .is_ok());

    let view = studio.delete_label("English (UK)").unwrap();
    assert!(view.rows.is_empty());
    assert_eq!(view.languages, vec!["en-GB", "fr-FR"]);
    assert_eq!(studio.labels().resolve_code("English (UK)"), "English (UK)");

    // A stale dropdown entry now fails lookup instead of crashing.
    let err = studio
        .generate_audio(&selection, &TextInput::typed("Hello"))
        .unwrap_err();
    assert_eq!(
        err,
        "Error: Language 'English (UK)' is not in the voice catalog"
    );
}

#[test]
fn reload_picks_up_edits_made_on_disk() {
    let (studio, _dir) = studio_with(RecordingProvider::default());
    studio.save_label("fr-FR", "French").unwrap();

    std::fs::write(
        studio.labels().path(),
        r#"{"fr-FR": "Français", "en-GB": "English (UK)"}"#,
    )
    .unwrap();
    let view = studio.reload_labels();
    assert_eq!(view.languages, vec!["Français", "English (UK)"]);
    assert_eq!(studio.voice_choices("Français").voices, vec!["Denise"]);
    assert_eq!(studio.styles("English (UK)", "Ryan"), vec!["default", "chat"]);
}

#[test]
fn concurrent_sessions_keep_every_label() {
    let (studio, _dir) = studio_with(RecordingProvider::default());
    let studio = Arc::new(studio);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let studio = Arc::clone(&studio);
            thread::spawn(move || {
                studio
                    .save_label(&format!("zz-{i}"), &format!("Session {i}"))
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let view = studio.reload_labels();
    assert_eq!(view.rows.len(), 8);
    for i in 0..8 {
        assert!(view.languages.contains(&format!("Session {i}")));
    }
}

#[test]
fn missing_catalog_is_fatal_and_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let result = Studio::open_with_provider(&config, Box::new(RecordingProvider::default()));
    assert!(matches!(result, Err(StudioError::Config(_))));
    assert!(!config.output_dir.exists());

    // The configured provider may fail first, but the outcome is the same.
    assert!(matches!(Studio::open(&config), Err(StudioError::Config(_))));
    assert!(!config.output_dir.exists());
}

#[test]
fn missing_label_file_is_tolerated_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    std::fs::write(&config.catalog_path, CATALOG).unwrap();

    let studio =
        Studio::open_with_provider(&config, Box::new(RecordingProvider::default())).unwrap();
    assert_eq!(studio.provider_id(), "recording");
    assert!(studio.labels().is_empty());
    assert_eq!(studio.languages(), vec!["en-GB", "fr-FR"]);
    assert!(config.output_dir.is_dir());
    assert!(!config.labels_path.exists());

    studio.save_label("fr-FR", "French").unwrap();
    assert_eq!(studio.labels().get("fr-FR").as_deref(), Some("French"));
    assert!(config.labels_path.exists());
}
