//! Application error type mapping to HTTP status codes and the envelope format.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use solace_types::error::ChatError;

use crate::http::response::ApiResponse;

#[derive(Debug)]
pub enum AppError {
    Chat(ChatError),
    /// Malformed input (bad UUID, bad body).
    Validation(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Chat(ChatError::SessionNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Chat(ChatError::NoPendingMessage) => StatusCode::CONFLICT,
            AppError::Chat(ChatError::EmptyMessage) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Chat(ChatError::SessionNotFound(_)) => "SESSION_NOT_FOUND",
            AppError::Chat(ChatError::NoPendingMessage) => "NO_PENDING_MESSAGE",
            AppError::Chat(ChatError::EmptyMessage) | AppError::Validation(_) => "VALIDATION_ERROR",
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Chat(e) => e.to_string(),
            AppError::Validation(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ApiResponse::error(self.code(), &self.message(), Uuid::now_v7().to_string());
        (self.status(), Json(body)).into_response()
    }
}
