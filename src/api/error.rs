use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure: the server could not be reached at all.
    #[error("cannot reach the server: {0}")]
    Connection(String),

    /// The server refused the request and said why (or we fell back to a
    /// per-operation message). Shown to the user verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error("unauthorized - session may be expired")]
    Unauthorized,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies carried in error messages.
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error payload shape used across the API. Older endpoints say `error`,
/// newer ones say `message`; accept both.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default, alias = "error")]
    message: Option<String>,
}

impl ApiError {
    /// Extract the server-provided message from an error body, if any.
    pub fn server_message(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
    }

    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    /// Map a non-success status on a domain request to an error.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message =
            Self::server_message(body).unwrap_or_else(|| Self::truncate_body(body));
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound(message),
            400..=499 => ApiError::Rejected(message),
            500..=599 => ApiError::Server(message),
            _ => ApiError::InvalidResponse(format!("status {}: {}", status, message)),
        }
    }

    /// Map a non-success status on login/register to an error. Any refusal
    /// becomes `Rejected` carrying the server's message verbatim when present,
    /// else the operation's fallback text.
    pub fn from_auth_status(status: reqwest::StatusCode, body: &str, fallback: &str) -> Self {
        if status.is_server_error() {
            ApiError::Server(Self::truncate_body(body))
        } else {
            ApiError::Rejected(
                Self::server_message(body).unwrap_or_else(|| fallback.to_string()),
            )
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() || err.is_builder() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            // Connect refusals, DNS failures, timeouts: the server was
            // never reached or never answered.
            ApiError::Connection(err.to_string())
        }
    }
}
