//! Offline batch generation of every (speed, number) clip.
//!
//! Items are processed one at a time. A failed item is recorded and the loop
//! moves on; the caller gets a [`GenerationReport`] instead of an early error.

use std::path::PathBuf;

use crate::audio::{AudioFileStore, Number, Speed, SpeedRates, StoreError};
use crate::tts::{SynthesisRequest, TtsError, TtsService, VoiceSelection};

#[derive(thiserror::Error, Debug)]
pub enum GenerationError {
    #[error("Speech synthesis service is unavailable")]
    ServiceUnavailable,
}

#[derive(thiserror::Error, Debug)]
pub enum ItemError {
    #[error("synthesis failed: {0}")]
    Synthesis(#[from] TtsError),

    #[error("{0}")]
    Store(#[from] StoreError),
}

#[derive(Debug)]
pub enum ItemStatus {
    Generated(PathBuf),
    Skipped(PathBuf),
    Failed(ItemError),
}

#[derive(Debug)]
pub struct ItemOutcome {
    pub speed: Speed,
    pub number: Number,
    pub status: ItemStatus,
}

#[derive(Debug, Default)]
pub struct GenerationReport {
    pub outcomes: Vec<ItemOutcome>,
}

impl GenerationReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Items whose clip is on disk after the run, generated or already present.
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| !matches!(o.status, ItemStatus::Failed(_)))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ItemStatus::Skipped(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ItemStatus::Failed(_)))
    }
}

pub struct AudioGenerationJob {
    store: AudioFileStore,
    tts: TtsService,
    rates: SpeedRates,
    voice: VoiceSelection,
    speeds: Vec<Speed>,
    skip_existing: bool,
}

impl AudioGenerationJob {
    pub fn new(
        store: AudioFileStore,
        tts: TtsService,
        rates: SpeedRates,
        voice: VoiceSelection,
    ) -> Self {
        Self {
            store,
            tts,
            rates,
            voice,
            speeds: Speed::ALL.to_vec(),
            skip_existing: false,
        }
    }

    pub fn with_speeds(mut self, speeds: Vec<Speed>) -> Self {
        if !speeds.is_empty() {
            self.speeds = speeds;
        }
        self
    }

    pub fn skip_existing(mut self, skip: bool) -> Self {
        self.skip_existing = skip;
        self
    }

    pub fn store(&self) -> &AudioFileStore {
        &self.store
    }

    pub fn speeds(&self) -> &[Speed] {
        &self.speeds
    }

    pub async fn run(&self) -> Result<GenerationReport, GenerationError> {
        if !self.tts.is_available() {
            return Err(GenerationError::ServiceUnavailable);
        }

        let numbers: Vec<Number> = Number::all().collect();
        let total = numbers.len() * self.speeds.len();
        let mut report = GenerationReport::default();

        tracing::info!(
            total,
            numbers = numbers.len(),
            speeds = self.speeds.len(),
            "Starting audio generation"
        );

        for &speed in &self.speeds {
            tracing::info!(speed = %speed, rate = self.rates.rate(speed), "Generating clips");

            for &number in &numbers {
                let status = self.generate_one(speed, number).await;
                let current = report.outcomes.len() + 1;

                match &status {
                    ItemStatus::Generated(path) => tracing::info!(
                        "[{:3}/{}] {:3} ({}) -> {}",
                        current,
                        total,
                        number,
                        speed,
                        path.display()
                    ),
                    ItemStatus::Skipped(_) => tracing::info!(
                        "[{:3}/{}] {:3} ({}) already present, skipped",
                        current,
                        total,
                        number,
                        speed
                    ),
                    ItemStatus::Failed(e) => tracing::error!(
                        "[{:3}/{}] {:3} ({}) failed: {}",
                        current,
                        total,
                        number,
                        speed,
                        e
                    ),
                }

                report.outcomes.push(ItemOutcome {
                    speed,
                    number,
                    status,
                });
            }
        }

        tracing::info!(
            succeeded = report.succeeded(),
            skipped = report.skipped(),
            failed = report.failed(),
            total = report.total(),
            "Audio generation finished"
        );

        Ok(report)
    }

    async fn generate_one(&self, speed: Speed, number: Number) -> ItemStatus {
        if self.skip_existing && self.store.exists(speed, number).await {
            return ItemStatus::Skipped(self.store.path_for(speed, number));
        }

        match self.synthesize_and_store(speed, number).await {
            Ok(path) => ItemStatus::Generated(path),
            Err(e) => ItemStatus::Failed(e),
        }
    }

    async fn synthesize_and_store(
        &self,
        speed: Speed,
        number: Number,
    ) -> Result<PathBuf, ItemError> {
        let request = SynthesisRequest {
            text: number.german_words(),
            voice: self.voice.clone(),
            speaking_rate: self.rates.rate(speed),
        };

        let audio = self.tts.synthesize(&request).await?;
        Ok(self.store.write(speed, number, &audio).await?)
    }
}
