//! Session HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/v1/sessions               - List live session IDs
//! - POST   /api/v1/sessions               - Create an empty session
//! - GET    /api/v1/sessions/{id}          - Get a session snapshot
//! - DELETE /api/v1/sessions/{id}          - Drop a session
//! - POST   /api/v1/sessions/{id}/messages - Send a message, get the reply
//! - POST   /api/v1/sessions/{id}/clear    - Reset the transcript

use std::time::Instant;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use solace_types::chat::{SessionSnapshot, Turn};

use crate::http::error::AppError;
use crate::http::handlers::parse_uuid;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

/// The appended assistant turn, plus a notice when it is the fallback.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub turn: Turn,
    pub notice: Option<String>,
}

fn session_link(id: &Uuid) -> String {
    format!("/api/v1/sessions/{id}")
}

/// GET /api/v1/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Uuid>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let ids = state.sessions.ids();

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(
        ApiResponse::success(ids, request_id, elapsed).with_link("self", "/api/v1/sessions"),
    ))
}

/// POST /api/v1/sessions
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SessionSnapshot>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let (id, handle) = state.sessions.create();
    let snapshot = handle.lock().await.snapshot();

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(
        ApiResponse::success(snapshot, request_id, elapsed).with_link("self", &session_link(&id)),
    ))
}

/// GET /api/v1/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionSnapshot>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_uuid(&session_id)?;
    let snapshot = state.sessions.get(&id)?.lock().await.snapshot();

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(
        ApiResponse::success(snapshot, request_id, elapsed)
            .with_link("self", &session_link(&id))
            .with_link("messages", &format!("{}/messages", session_link(&id))),
    ))
}

/// DELETE /api/v1/sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_uuid(&session_id)?;
    if !state.sessions.remove(&id) {
        return Err(solace_types::error::ChatError::SessionNotFound(id).into());
    }

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({ "deleted": true }),
        request_id,
        elapsed,
    )))
}

/// POST /api/v1/sessions/{id}/messages
///
/// A generation failure is not an HTTP error: the fallback turn comes back
/// with `notice` set.
pub async fn send_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    body: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_uuid(&session_id)?;
    let Json(body) = body.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    let handle = state.sessions.get(&id)?;
    let reply = handle.lock().await.send_message(&body.message).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let data = MessageResponse {
        notice: reply.failure.map(|f| f.to_string()),
        turn: reply.turn,
    };
    Ok(Json(
        ApiResponse::success(data, request_id, elapsed).with_link("session", &session_link(&id)),
    ))
}

/// POST /api/v1/sessions/{id}/clear
pub async fn clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionSnapshot>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_uuid(&session_id)?;
    let handle = state.sessions.get(&id)?;
    let snapshot = {
        let mut session = handle.lock().await;
        session.clear();
        session.snapshot()
    };

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(
        ApiResponse::success(snapshot, request_id, elapsed).with_link("self", &session_link(&id)),
    ))
}
