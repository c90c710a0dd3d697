//! Affirmation, meditation and disclaimer handlers.
//!
//! Affirmations and meditations are stateless: the session must exist but
//! its transcript is never touched.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use uuid::Uuid;

use solace_core::chat::prompts::{APP_TITLE, DISCLAIMER, INPUT_PLACEHOLDER};
use solace_core::chat::session::CannedText;

use crate::http::error::AppError;
use crate::http::handlers::parse_uuid;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CannedResponse {
    pub text: String,
    pub notice: Option<String>,
}

impl From<CannedText> for CannedResponse {
    fn from(canned: CannedText) -> Self {
        Self {
            text: canned.text,
            notice: canned.failure.map(|f| f.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Disclaimer {
    pub title: &'static str,
    pub disclaimer: &'static str,
    pub placeholder: &'static str,
}

/// GET /api/v1/disclaimer
pub async fn get_disclaimer() -> Json<ApiResponse<Disclaimer>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let data = Disclaimer {
        title: APP_TITLE,
        disclaimer: DISCLAIMER,
        placeholder: INPUT_PLACEHOLDER,
    };

    let elapsed = start.elapsed().as_millis() as u64;
    Json(ApiResponse::success(data, request_id, elapsed))
}

/// POST /api/v1/sessions/{id}/affirmation
pub async fn affirmation(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<CannedResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_uuid(&session_id)?;
    let handle = state.sessions.get(&id)?;
    let canned = handle.lock().await.generate_affirmation().await;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(canned.into(), request_id, elapsed)))
}

/// POST /api/v1/sessions/{id}/meditation
pub async fn meditation(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<CannedResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_uuid(&session_id)?;
    let handle = state.sessions.get(&id)?;
    let canned = handle.lock().await.generate_meditation_guide().await;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(canned.into(), request_id, elapsed)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_core::chat::prompts::{FALLBACK_AFFIRMATION, FALLBACK_MEDITATION};
    use solace_types::error::ChatError;
    use solace_types::llm::GenerationFailure;

    use crate::http::handlers::test_support::state_with;

    #[tokio::test]
    async fn test_disclaimer() {
        let Json(resp) = get_disclaimer().await;
        let data = resp.data.unwrap();
        assert_eq!(data.title, "Mental Health Support Chatbot");
        assert_eq!(data.placeholder, "How can I help you today?");
    }

    #[tokio::test]
    async fn test_affirmation_leaves_transcript_untouched() {
        let state = state_with(vec![Ok("You are doing your best.".to_string())]);
        let (id, handle) = state.sessions.create();

        let Json(resp) = affirmation(State(state), Path(id.to_string())).await.unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data.text, "You are doing your best.");
        assert!(data.notice.is_none());
        assert_eq!(handle.lock().await.turn_count(), 0);
    }

    #[tokio::test]
    async fn test_affirmation_failure_uses_fallback() {
        let state = state_with(vec![Err(GenerationFailure::new("timeout"))]);
        let (id, _) = state.sessions.create();

        let Json(resp) = affirmation(State(state), Path(id.to_string())).await.unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data.text, FALLBACK_AFFIRMATION);
        assert!(data.notice.is_some());
    }

    #[tokio::test]
    async fn test_meditation_failure_uses_fallback() {
        let state = state_with(vec![Err(GenerationFailure::new("unauthorized"))]);
        let (id, _) = state.sessions.create();

        let Json(resp) = meditation(State(state), Path(id.to_string())).await.unwrap();
        assert_eq!(resp.data.unwrap().text, FALLBACK_MEDITATION);
    }

    #[tokio::test]
    async fn test_meditation_unknown_session() {
        let state = state_with(Vec::new());
        let err = meditation(State(state), Path(Uuid::now_v7().to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Chat(ChatError::SessionNotFound(_))));
    }
}
