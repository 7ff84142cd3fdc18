use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};

use crate::api::response;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to reach prediction server: {0}")]
    RemoteError(String),

    #[error("Error parsing content: {0}")]
    ParseError(String),

    #[error("Failed to load asset: {0}")]
    AssetError(String),

    #[error("Unknown demo page: {0}")]
    UnknownPage(String),

    #[error("Invalid drop payload: {0}")]
    DropError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::RemoteError(_) => StatusCode::BAD_GATEWAY,
            AppError::ParseError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::AssetError(_) => StatusCode::NOT_FOUND,
            AppError::UnknownPage(_) => StatusCode::NOT_FOUND,
            AppError::DropError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(%status, "request failed: {}", self);
        response::error::<()>(status, self.to_string()).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::ParseError(err.to_string())
        } else {
            AppError::RemoteError(err.to_string())
        }
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::AssetError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
