//! Process settings, read once at startup from the environment (and `.env`).
//!
//! Keys are matched case-insensitively, so `GOOGLE_TTS_VOICE_NAME` and
//! `google_tts_voice_name` both set [`Settings::google_tts_voice_name`].

use std::path::PathBuf;

use config::{Config, Environment};
use serde::Deserialize;

use crate::audio::SpeedRates;
use crate::tts::VoiceSelection;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Path to a Google credential file (service account, authorized user or
    /// external account).
    #[serde(default)]
    pub google_application_credentials: Option<PathBuf>,

    /// Fall back to Application Default Credentials when no file is configured.
    #[serde(default)]
    pub google_use_application_default_credentials: bool,

    #[serde(default = "default_language_code")]
    pub google_tts_language_code: String,
    #[serde(default = "default_voice_name")]
    pub google_tts_voice_name: String,

    #[serde(default = "default_slow_speed")]
    pub google_tts_slow_speed: f32,
    #[serde(default = "default_normal_speed")]
    pub google_tts_normal_speed: f32,
    #[serde(default = "default_fast_speed")]
    pub google_tts_fast_speed: f32,

    #[serde(default = "default_audio_files_dir")]
    pub audio_files_dir: PathBuf,

    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    /// Comma-separated list of origins allowed by CORS.
    #[serde(default = "default_cors_allow_origins")]
    pub cors_allow_origins: String,

    #[serde(default = "default_tts_timeout_secs")]
    pub tts_timeout_secs: u64,
}

fn default_language_code() -> String {
    "de-DE".to_string()
}

fn default_voice_name() -> String {
    "de-DE-Standard-A".to_string()
}

fn default_slow_speed() -> f32 {
    0.7
}

fn default_normal_speed() -> f32 {
    1.0
}

fn default_fast_speed() -> f32 {
    1.3
}

fn default_audio_files_dir() -> PathBuf {
    PathBuf::from("audio_files")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_allow_origins() -> String {
    "http://localhost:3000,http://127.0.0.1:3000".to_string()
}

fn default_tts_timeout_secs() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            google_application_credentials: None,
            google_use_application_default_credentials: false,
            google_tts_language_code: default_language_code(),
            google_tts_voice_name: default_voice_name(),
            google_tts_slow_speed: default_slow_speed(),
            google_tts_normal_speed: default_normal_speed(),
            google_tts_fast_speed: default_fast_speed(),
            audio_files_dir: default_audio_files_dir(),
            host: default_host(),
            port: default_port(),
            cors_allow_origins: default_cors_allow_origins(),
            tts_timeout_secs: default_tts_timeout_secs(),
        }
    }
}

/// Load `.env` into the process environment without overriding variables that
/// are already set. Returns the file that was loaded, if any.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

impl Settings {
    /// Read settings from the process environment. Call [`load_dotenv`] first
    /// to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(Environment::default().try_parsing(true))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Validation("PORT cannot be 0".to_string()));
        }

        for (name, rate) in [
            ("GOOGLE_TTS_SLOW_SPEED", self.google_tts_slow_speed),
            ("GOOGLE_TTS_NORMAL_SPEED", self.google_tts_normal_speed),
            ("GOOGLE_TTS_FAST_SPEED", self.google_tts_fast_speed),
        ] {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(ConfigError::Validation(format!(
                    "{} must be a positive number, got {}",
                    name, rate
                )));
            }
        }

        // Credentialed CORS cannot use a wildcard origin.
        if self.cors_origins().contains(&"*") {
            return Err(ConfigError::Validation(
                "CORS_ALLOW_ORIGINS cannot contain '*'; list the allowed origins explicitly"
                    .to_string(),
            ));
        }

        if self.google_tts_language_code.is_empty() {
            return Err(ConfigError::Validation(
                "GOOGLE_TTS_LANGUAGE_CODE cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn speed_rates(&self) -> SpeedRates {
        SpeedRates {
            slow: self.google_tts_slow_speed,
            normal: self.google_tts_normal_speed,
            fast: self.google_tts_fast_speed,
        }
    }

    pub fn voice(&self) -> VoiceSelection {
        VoiceSelection::new(&self.google_tts_language_code, &self.google_tts_voice_name)
    }

    pub fn cors_origins(&self) -> Vec<&str> {
        self.cors_allow_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .collect()
    }

    pub fn log_summary(&self) {
        tracing::info!("Audio directory: {}", self.audio_files_dir.display());
        tracing::info!(
            "Voice: {} ({})",
            self.google_tts_voice_name,
            self.google_tts_language_code
        );
        tracing::info!(
            "Speaking rates: slow={} normal={} fast={}",
            self.google_tts_slow_speed,
            self.google_tts_normal_speed,
            self.google_tts_fast_speed
        );
        match &self.google_application_credentials {
            Some(path) => tracing::info!("Google credentials: {}", path.display()),
            None if self.google_use_application_default_credentials => {
                tracing::info!("Google credentials: application default")
            }
            None => tracing::info!("Google credentials: not configured"),
        }
    }
}
