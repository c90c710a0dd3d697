//! Shared plumbing for the reqwest-based generator backends.

use std::time::Duration;

use solace_types::error::SetupError;
use solace_types::llm::GenerationFailure;

/// Build the HTTP client used by a backend.
///
/// Without `timeout_secs` the transport default applies (no overall timeout).
pub(crate) fn build_client(timeout_secs: Option<u64>) -> Result<reqwest::Client, SetupError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().map_err(|e| SetupError::Client(e.to_string()))
}

/// Map a transport error (connect, timeout, body read) to a failure.
pub(crate) fn transport_failure(err: reqwest::Error) -> GenerationFailure {
    if err.is_timeout() {
        GenerationFailure::new(format!("request timed out: {err}"))
    } else {
        GenerationFailure::new(format!("HTTP request failed: {err}"))
    }
}

/// Map a non-success HTTP status and its body to a failure.
pub(crate) fn status_failure(status: reqwest::StatusCode, body: &str) -> GenerationFailure {
    let detail = error_detail(body);
    match status.as_u16() {
        401 | 403 => GenerationFailure::new(format!("authentication failed: {detail}")),
        429 => GenerationFailure::new(format!("rate limited: {detail}")),
        _ => GenerationFailure::new(format!("HTTP {status}: {detail}")),
    }
}

/// Pull a human-readable message out of a provider error body.
///
/// Understands `{"error": {"message": ...}}` (OpenAI, Gemini) and
/// `{"error": "..."}` (Ollama); anything else is returned as-is.
pub(crate) fn error_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    match value.get("error") {
        Some(serde_json::Value::String(msg)) => msg.clone(),
        Some(obj) => obj
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| obj.to_string()),
        None => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_nested_message() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(error_detail(body), "Incorrect API key provided");
    }

    #[test]
    fn test_error_detail_flat_string() {
        assert_eq!(error_detail(r#"{"error": "model 'llama9' not found"}"#), "model 'llama9' not found");
    }

    #[test]
    fn test_error_detail_plain_text() {
        assert_eq!(error_detail("Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn test_status_failure_categories() {
        let auth = status_failure(reqwest::StatusCode::UNAUTHORIZED, "{}");
        assert!(auth.message.starts_with("authentication failed"));

        let limited = status_failure(reqwest::StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert_eq!(limited.message, "rate limited: slow down");

        let other = status_failure(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(other.message.contains("500"));
        assert!(other.message.contains("boom"));
    }

    #[test]
    fn test_build_client_with_and_without_timeout() {
        assert!(build_client(None).is_ok());
        assert!(build_client(Some(5)).is_ok());
    }
}
