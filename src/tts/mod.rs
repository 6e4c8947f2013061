pub mod credentials;
pub mod google;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::Settings;

pub use google::GoogleTtsClient;

#[derive(thiserror::Error, Debug)]
pub enum TtsError {
    #[error("Speech synthesis is not configured")]
    Unavailable,

    #[error("Invalid credentials: {0}")]
    Credentials(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSelection {
    pub language_code: String,
    pub name: String,
    pub ssml_gender: SsmlGender,
}

impl VoiceSelection {
    pub fn new(language_code: &str, name: &str) -> Self {
        Self {
            language_code: language_code.to_string(),
            name: name.to_string(),
            ssml_gender: SsmlGender::Female,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SsmlGender {
    Female,
    Male,
    Neutral,
}

#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: VoiceSelection,
    pub speaking_rate: f32,
}

/// A text-to-speech backend returning encoded MP3 bytes.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, TtsError>;
}

/// Synthesis capability that may be absent when no credentials are configured.
#[derive(Clone, Default)]
pub struct TtsService {
    client: Option<Arc<dyn SpeechSynthesizer>>,
}

impl TtsService {
    pub fn new(client: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            client: Some(client),
        }
    }

    pub fn unavailable() -> Self {
        Self { client: None }
    }

    /// Build the Google client from settings. Missing or broken credentials are
    /// logged and leave the service unavailable.
    pub fn from_settings(settings: &Settings) -> Self {
        let credentials = match settings.google_application_credentials.as_deref() {
            Some(path) if path.exists() => credentials::from_file(path),
            Some(path) => {
                tracing::warn!(
                    path = %path.display(),
                    "Google Cloud TTS credentials file not found, synthesis unavailable"
                );
                return Self::unavailable();
            }
            None if settings.google_use_application_default_credentials => {
                credentials::application_default()
            }
            None => {
                tracing::warn!(
                    "Google Cloud TTS credentials not configured, synthesis unavailable"
                );
                return Self::unavailable();
            }
        };

        let client = credentials.and_then(|credentials| {
            GoogleTtsClient::new(credentials, Duration::from_secs(settings.tts_timeout_secs))
        });

        match client {
            Ok(client) => {
                tracing::info!("Google Cloud TTS client initialized");
                Self::new(Arc::new(client))
            }
            Err(e) => {
                tracing::error!("Failed to initialize Google Cloud TTS client: {}", e);
                Self::unavailable()
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    pub async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, TtsError> {
        match &self.client {
            Some(client) => client.synthesize(request).await,
            None => Err(TtsError::Unavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl SpeechSynthesizer for Echo {
        async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, TtsError> {
            Ok(request.text.as_bytes().to_vec())
        }
    }

    fn request(text: &str) -> SynthesisRequest {
        SynthesisRequest {
            text: text.to_string(),
            voice: VoiceSelection::new("de-DE", "de-DE-Standard-A"),
            speaking_rate: 1.0,
        }
    }

    #[tokio::test]
    async fn unavailable_service_refuses_synthesis() {
        let service = TtsService::unavailable();
        assert!(!service.is_available());
        assert!(matches!(
            service.synthesize(&request("eins")).await,
            Err(TtsError::Unavailable)
        ));
    }

    #[tokio::test]
    async fn available_service_delegates_to_client() {
        let service = TtsService::new(Arc::new(Echo));
        assert!(service.is_available());
        assert_eq!(service.synthesize(&request("zwei")).await.unwrap(), b"zwei");
    }

    #[test]
    fn missing_credentials_leave_service_unavailable() {
        let settings = Settings::default();
        assert!(!TtsService::from_settings(&settings).is_available());

        let settings = Settings {
            google_application_credentials: Some("/nonexistent/key.json".into()),
            ..Settings::default()
        };
        assert!(!TtsService::from_settings(&settings).is_available());
    }

    #[test]
    fn malformed_credentials_leave_service_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let settings = Settings {
            google_application_credentials: Some(path),
            ..Settings::default()
        };
        assert!(!TtsService::from_settings(&settings).is_available());
    }

    #[test]
    fn unsupported_credential_type_leaves_service_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        std::fs::write(&path, br#"{"type": "api_key", "key": "abc"}"#).unwrap();

        let settings = Settings {
            google_application_credentials: Some(path),
            ..Settings::default()
        };
        assert!(!TtsService::from_settings(&settings).is_available());
    }

    #[test]
    fn voice_selection_serializes_in_api_shape() {
        let voice = VoiceSelection::new("de-DE", "de-DE-Standard-A");
        let json = serde_json::to_value(&voice).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "languageCode": "de-DE",
                "name": "de-DE-Standard-A",
                "ssmlGender": "FEMALE"
            })
        );
    }
}
