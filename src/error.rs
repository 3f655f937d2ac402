use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("asset id {0} already exists")]
    DuplicateKey(Uuid),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Generating response for AppError: {:?}", self);

        let status_code = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateKey(_) | Self::Storage(_) | Self::Sqlx(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            format!("{self}. See logs for more details")
        } else {
            self.to_string()
        };

        (status_code, Json(json!({ "message": message }))).into_response()
    }
}
