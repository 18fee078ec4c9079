use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use leitor_core::{
    config::{self, AppConfig, SpeechConfig},
    nav::parse_page_param,
    prefs::{FileStore, MemoryStore, PreferenceStore, Settings},
    source::{open_source, ResourceSource, DICTIONARY_RESOURCE},
    speech::{CommandSpeech, Player, SpeechOptions, SpeechPort},
    vocab::{extract_vocabulary, missing_entries},
    Dictionary,
};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{prelude::*, EnvFilter};
use ui::app::App;

#[derive(Debug, Parser)]
#[command(
    name = "leitor",
    version,
    about = "Graded reader with tap-to-translate word lookup"
)]
struct Args {
    /// Directory or http(s) URL holding data/{n}.txt and dictionary.json
    #[arg(short = 'c', long = "content")]
    content: Option<String>,

    /// Page to open on: "7", "page=7" or "?page=7"
    #[arg(short = 'p', long = "page")]
    page: Option<String>,

    /// Config file to use instead of the platform default
    #[arg(long = "config")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Print the distinct words used across all pages
    Vocab {
        /// Only words that have no dictionary entry
        #[arg(long)]
        missing: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_logging()?;

    let config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => AppConfig::load_default().context("failed to read config")?,
    };
    let location = args
        .content
        .clone()
        .or_else(|| config.content.clone())
        .unwrap_or_else(|| ".".to_string());
    let source: Arc<dyn ResourceSource> = Arc::from(
        open_source(&location).with_context(|| format!("failed to open content {location}"))?,
    );
    info!(content = %location, "content source opened");

    match args.command {
        Some(Cmd::Vocab { missing }) => print_vocabulary(source.as_ref(), missing),
        None => run_reader(source, &config, args.page.as_deref()),
    }
}

fn run_reader(
    source: Arc<dyn ResourceSource>,
    config: &AppConfig,
    page: Option<&str>,
) -> Result<()> {
    let start = parse_page_param(page);

    let store: Box<dyn PreferenceStore> = match FileStore::in_config_dir() {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!(error = %err, "no config directory; preferences will not persist");
            Box::new(MemoryStore::default())
        }
    };
    let settings = Settings::load(store);
    let port: Box<dyn SpeechPort> = Box::new(CommandSpeech::new(&config.speech.engine));
    let player = Player::new(port, speech_options(&config.speech));
    let catalog: Box<dyn SpeechPort> = Box::new(CommandSpeech::new(&config.speech.engine));

    let mut app = App::new(source, settings, player).with_theme_overrides(config.theme.clone());
    app.start(start.number() as i64, Some(catalog));
    let last_page = app.run().context("terminal session failed")?;
    info!(page = last_page, "reader closed");
    Ok(())
}

fn speech_options(speech: &SpeechConfig) -> SpeechOptions {
    SpeechOptions {
        voice: speech.voice.clone(),
        rate: speech.rate,
        pitch: speech.pitch,
        volume: speech.volume,
    }
}

fn print_vocabulary(source: &dyn ResourceSource, missing: bool) -> Result<()> {
    let words = extract_vocabulary(source);
    if !missing {
        for word in &words {
            println!("{word}");
        }
        return Ok(());
    }
    let text = source
        .fetch(DICTIONARY_RESOURCE)
        .context("failed to read dictionary")?;
    let dictionary = Dictionary::from_json(&text).context("failed to parse dictionary")?;
    for word in missing_entries(&words, &dictionary) {
        println!("{word}");
    }
    Ok(())
}

fn init_logging() -> Result<WorkerGuard> {
    let log_dir = config::data_root()
        .ok_or_else(|| anyhow!("unable to resolve platform data directories"))?
        .join("logs");
    fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, "leitor.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // no console layer while the reader owns the terminal
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(file_writer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!(err))?;

    Ok(guard)
}
