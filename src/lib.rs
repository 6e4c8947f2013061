//! German number dictation clips: transcription, Google Cloud TTS generation
//! and an HTTP API serving the generated MP3 files.

pub mod api;
pub mod audio;
pub mod config;
pub mod error;
pub mod generate;
pub mod logging;
pub mod numerals;
pub mod tts;

pub use audio::{AudioFileStore, Number, Speed, SpeedRates};
pub use config::Settings;
pub use numerals::transcribe;
