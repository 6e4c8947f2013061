use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use numbers_dictation_server::generate::{AudioGenerationJob, GenerationError, ItemStatus};
use numbers_dictation_server::tts::TtsService;
use numbers_dictation_server::{logging, AudioFileStore, Settings, Speed};

/// Generate the German number clips (1-100) for every speed with Google Cloud TTS
#[derive(Parser, Debug)]
#[command(name = "generate-audio", version, about, long_about = None)]
struct Cli {
    /// Only generate these speeds (repeatable); defaults to slow, normal and fast
    #[arg(short, long = "speed", value_parser = parse_speed)]
    speeds: Vec<Speed>,

    /// Output directory, overrides AUDIO_FILES_DIR
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Keep clips that already exist instead of regenerating them
    #[arg(long)]
    skip_existing: bool,
}

fn parse_speed(s: &str) -> Result<Speed, String> {
    s.parse().map_err(|e| format!("{}", e))
}

const SETUP_HELP: &str = "\
To configure Google Cloud TTS:
  1. Create a Google Cloud project
  2. Enable the Text-to-Speech API
  3. Create a service account and download its JSON key
  4. Set GOOGLE_APPLICATION_CREDENTIALS to the key path (environment or .env)
     or set GOOGLE_USE_APPLICATION_DEFAULT_CREDENTIALS=true to use ADC";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    logging::init();

    let cli = Cli::parse();
    let settings = Settings::from_env().context("failed to load settings")?;
    settings.log_summary();

    let root = cli
        .output
        .unwrap_or_else(|| settings.audio_files_dir.clone());
    let store = AudioFileStore::new(root);

    let job = AudioGenerationJob::new(
        store,
        TtsService::from_settings(&settings),
        settings.speed_rates(),
        settings.voice(),
    )
    .with_speeds(cli.speeds)
    .skip_existing(cli.skip_existing);

    let report = match job.run().await {
        Ok(report) => report,
        Err(GenerationError::ServiceUnavailable) => {
            tracing::error!("Google Cloud TTS is unavailable. Check your settings.");
            eprintln!("{}", SETUP_HELP);
            return Ok(ExitCode::FAILURE);
        }
    };

    for outcome in report.failures() {
        if let ItemStatus::Failed(e) = &outcome.status {
            tracing::warn!(
                speed = %outcome.speed,
                number = %outcome.number,
                "Not generated: {}",
                e
            );
        }
    }

    tracing::info!(
        "Generation finished: {}/{} clips available ({} skipped, {} failed)",
        report.succeeded(),
        report.total(),
        report.skipped(),
        report.failed()
    );
    tracing::info!("Files saved in: {}", job.store().root().display());

    for &speed in job.speeds() {
        let count = job.store().count_clips(speed).await;
        tracing::info!("  {}/ ({} files)", speed, count);
    }

    if report.failed() > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
