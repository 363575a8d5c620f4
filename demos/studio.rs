use std::time::Instant;

use tts_studio::{
    providers, Catalog, LabelStore, LanguageResolver, RequestBuilder, StudioConfig, TextInput,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let (config, provider_ready) = match StudioConfig::from_env() {
        Ok(config) => (config, true),
        Err(e) => {
            println!("{e}; running without a provider");
            (StudioConfig::default(), false)
        }
    };

    let catalog = Catalog::load(&config.catalog_path)?;
    let labels = LabelStore::open(&config.labels_path);
    let resolver = LanguageResolver::new(&catalog, &labels);

    println!("Languages: {:?}", resolver.display_list());
    let Some(selection) = resolver.default_selection() else {
        println!("The first language has no voices");
        return Ok(());
    };
    println!("Default selection: {selection:?}");

    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Hello! This is a quick test of the selected voice.".to_string());
    let call = RequestBuilder::new(&catalog, &labels).build(&selection, &TextInput::typed(text))?;
    println!("Call: {:?}", call.as_tuple());

    if !provider_ready {
        return Ok(());
    }

    let provider = providers::from_settings(&config.provider, &config.output_dir)?;
    let start = Instant::now();
    let path = provider.synthesize(&call)?;
    println!(
        "{} synthesized {} in {:.2?}",
        provider.id(),
        path.display(),
        start.elapsed()
    );
    Ok(())
}
