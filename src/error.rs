use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::audio::{NumberError, SpeedError};

pub const INTERNAL_ERROR_CODE: &str = "INTERNAL_ERROR";

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<SpeedError> for AppError {
    fn from(_: SpeedError) -> Self {
        AppError::InvalidArgument("Invalid speed. Must be: slow, normal, or fast".into())
    }
}

impl From<NumberError> for AppError {
    fn from(e: NumberError) -> Self {
        match e {
            NumberError::OutOfRange(_) => {
                AppError::InvalidArgument("Number must be between 1 and 100".into())
            }
            NumberError::NotAnInteger(_) => {
                AppError::InvalidArgument("Number must be an integer".into())
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::InvalidArgument(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        detail: msg.clone(),
                        error_code: None,
                    },
                )
            }
            AppError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        detail: msg.clone(),
                        error_code: None,
                    },
                )
            }
            AppError::Internal(_) | AppError::IoError(_) => {
                tracing::error!("Request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        detail: "Internal server error".to_string(),
                        error_code: Some(INTERNAL_ERROR_CODE.to_string()),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
