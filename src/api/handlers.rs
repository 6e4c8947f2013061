use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use super::{HealthResponse, RootResponse};
use crate::api::routes::AppState;
use crate::audio::{Number, Speed};
use crate::error::AppError;

pub async fn get_audio(
    State(state): State<Arc<AppState>>,
    Path((speed, number)): Path<(String, String)>,
) -> Result<Response, AppError> {
    // Speed is validated before the number.
    let speed: Speed = speed.parse()?;
    let number: Number = number.parse()?;

    let path = state.store.path_for(speed, number);
    let file_name = number.file_name();

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!(
                "Audio file not found: {}/{}",
                speed, file_name
            )));
        }
        Err(e) => return Err(e.into()),
    };

    let length = file.metadata().await?.len();
    let body = Body::from_stream(ReaderStream::new(file));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "audio/mpeg".to_string()),
            (header::CONTENT_LENGTH, length.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
        .into_response())
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Numbers Dictation API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "numbers-dictation-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
