use clap::{Arg, Command};
use mtuoc_connector::{
    LocaleId, MockMode, MockProvider, MtuocConnector, Parameters, TextFragment,
    TranslationProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("mtuoc-query")
        .version("0.1.0")
        .about("Translate a text with an MTUOC machine translation server")
        .arg(
            Arg::new("text")
                .help("Source text to translate")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("url")
                .long("url")
                .short('u')
                .help("MTUOC server URL, e.g. http://localhost:8000 (overrides --config)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file with connector parameters"),
        )
        .arg(
            Arg::new("source-locale")
                .long("source")
                .short('s')
                .help("Source language code (default: en)")
                .default_value("en"),
        )
        .arg(
            Arg::new("target-locale")
                .long("target")
                .short('t')
                .help("Target language code (default: fr)")
                .default_value("fr"),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use the mock provider instead of an MTUOC server")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the full query result as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log the request and response")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let default_level = if matches.get_flag("verbose") { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let text = matches
        .get_one::<String>("text")
        .ok_or("missing source text")?;
    let source = LocaleId::parse(
        matches
            .get_one::<String>("source-locale")
            .map(String::as_str)
            .unwrap_or("en"),
    )?;
    let target = LocaleId::parse(
        matches
            .get_one::<String>("target-locale")
            .map(String::as_str)
            .unwrap_or("fr"),
    )?;

    let provider: Box<dyn TranslationProvider> = if matches.get_flag("mock") {
        Box::new(MockProvider::new(MockMode::Suffix(target.language().to_string())))
    } else {
        let mut params = match matches.get_one::<String>("config") {
            Some(path) => Parameters::from_file(path)?,
            None => Parameters::new(),
        };
        if let Some(url) = matches.get_one::<String>("url") {
            params.set_url(url.as_str());
        }

        let connector = MtuocConnector::with_parameters(params).with_languages(source, target);
        tracing::info!("{}", connector.settings_display());
        Box::new(connector)
    };

    let fragment = TextFragment::from(text.as_str());
    provider.open();
    let outcome = provider.query(&fragment).await;
    provider.close();

    match outcome? {
        Some(result) if matches.get_flag("json") => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Some(result) => println!("{}", result.target),
        None => eprintln!("Nothing to translate"),
    }

    Ok(())
}
