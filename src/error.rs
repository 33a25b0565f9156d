use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to fetch page: {0}")]
    FetchError(String),

    #[error("Upstream returned status {status} for {url}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("Error parsing content: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::FetchError(_) | AppError::UpstreamStatus { .. } => StatusCode::BAD_GATEWAY,
            AppError::ParseError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::ParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
