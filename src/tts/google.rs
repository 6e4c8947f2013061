//! Google Cloud Text-to-Speech over its REST API.
//!
//! `POST https://texttospeech.googleapis.com/v1/text:synthesize`, MP3 output,
//! audio returned base64-encoded in `audioContent`.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use google_cloud_auth::credentials::Credentials;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::credentials::auth_headers;
use super::{SpeechSynthesizer, SynthesisRequest, TtsError, VoiceSelection};

pub const GOOGLE_TTS_URL: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";

#[derive(Debug, Serialize)]
struct SynthesizeBody<'a> {
    input: SynthesisInput<'a>,
    voice: &'a VoiceSelection,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    speaking_rate: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

pub struct GoogleTtsClient {
    http: Client,
    credentials: Credentials,
}

impl GoogleTtsClient {
    pub fn new(credentials: Credentials, timeout: Duration) -> Result<Self, TtsError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TtsError::Network(e.to_string()))?;

        Ok(Self {
            http,
            credentials,
        })
    }
}

fn request_body(request: &SynthesisRequest) -> SynthesizeBody<'_> {
    SynthesizeBody {
        input: SynthesisInput {
            text: &request.text,
        },
        voice: &request.voice,
        audio_config: AudioConfig {
            audio_encoding: "MP3",
            speaking_rate: request.speaking_rate,
        },
    }
}

fn decode_audio(body: &[u8]) -> Result<Vec<u8>, TtsError> {
    let parsed: SynthesizeResponse = serde_json::from_slice(body)
        .map_err(|e| TtsError::InvalidResponse(format!("synthesize response: {}", e)))?;

    base64::engine::general_purpose::STANDARD
        .decode(parsed.audio_content)
        .map_err(|e| TtsError::InvalidResponse(format!("audioContent is not base64: {}", e)))
}

#[async_trait]
impl SpeechSynthesizer for GoogleTtsClient {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, TtsError> {
        let headers = auth_headers(&self.credentials).await?;

        tracing::debug!(
            text = %request.text,
            voice = %request.voice.name,
            speaking_rate = request.speaking_rate,
            "Sending synthesize request"
        );

        let response = self
            .http
            .post(GOOGLE_TTS_URL)
            .headers(headers)
            .json(&request_body(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TtsError::Network("request timed out".to_string())
                } else if e.is_connect() {
                    TtsError::Network(format!("cannot connect to Google Cloud TTS: {}", e))
                } else {
                    TtsError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::Service(format!("HTTP {}: {}", status, error_text)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("failed to read body: {}", e)))?;

        let audio = decode_audio(&body)?;
        tracing::debug!(size = audio.len(), "Synthesis completed");

        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_request_body() {
        let request = SynthesisRequest {
            text: "dreiunddreißig".to_string(),
            voice: VoiceSelection::new("de-DE", "de-DE-Standard-A"),
            speaking_rate: 0.7,
        };

        let json = serde_json::to_value(request_body(&request)).unwrap();
        assert_eq!(json["input"]["text"], "dreiunddreißig");
        assert_eq!(json["voice"]["languageCode"], "de-DE");
        assert_eq!(json["voice"]["name"], "de-DE-Standard-A");
        assert_eq!(json["voice"]["ssmlGender"], "FEMALE");
        assert_eq!(json["audioConfig"]["audioEncoding"], "MP3");
        let rate = json["audioConfig"]["speakingRate"].as_f64().unwrap();
        assert!((rate - 0.7).abs() < 1e-6);
    }

    #[test]
    fn decodes_audio_content() {
        let body = br#"{"audioContent": "SUQzBAA="}"#;
        assert_eq!(decode_audio(body).unwrap(), b"ID3\x04\x00");
    }

    #[test]
    fn rejects_non_base64_audio() {
        let body = br#"{"audioContent": "***"}"#;
        assert!(matches!(
            decode_audio(body),
            Err(TtsError::InvalidResponse(_))
        ));
    }

    #[test]
    fn rejects_missing_audio_content() {
        assert!(matches!(
            decode_audio(br#"{"error": "nope"}"#),
            Err(TtsError::InvalidResponse(_))
        ));
    }
}
