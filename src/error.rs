//! Error types for the API client.
//!
//! ERROR HANDLING
//! ==============
//! Every non-2xx response becomes an error carrying the backend's decoded
//! payload untouched. A 401 is reported as [`ApiError::Unauthorized`] after
//! the client has already cleared the stored session, so callers only need
//! to decide how to present it.

use reqwest::StatusCode;
use serde_json::Value;

/// A configuration value could not be parsed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown STAFFDESK_VARIANT: {0}")]
    UnknownVariant(String),

    #[error("invalid {var}: {value}")]
    InvalidValue { var: &'static str, value: String },

    #[error("invalid default header `{0}`")]
    InvalidHeader(String),
}

/// The token store could not be read or written.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("token store lock poisoned")]
    Poisoned,
}

/// Failure of a single API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was received.
    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered 401. Stored credentials have been cleared and the
    /// caller should send the user to `login_path`.
    #[error("unauthorized; login required at {login_path}")]
    Unauthorized { login_path: String, body: Value },

    /// Any other non-success status, 4xx and 5xx alike.
    #[error("server returned HTTP {}: {}", status.as_u16(), error_text(body))]
    Status { status: StatusCode, body: Value },

    /// A 2xx body did not match the expected shape.
    #[error("invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// HTTP status of the failed call, when there was a response.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// Decoded error payload as returned by the backend.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Unauthorized { body, .. } | Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The backend's human-readable `error` field, if the payload has one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body()
            .and_then(|body| body.get("error"))
            .and_then(Value::as_str)
    }

    /// Message suitable for showing to a user, falling back to `fallback`
    /// when the backend did not supply one.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.message().unwrap_or(fallback).to_owned()
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

fn error_text(body: &Value) -> String {
    match body.get("error").and_then(Value::as_str) {
        Some(message) => message.to_owned(),
        None => body.to_string(),
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
