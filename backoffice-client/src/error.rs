//! Client error types

use reqwest::StatusCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or transport failure
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("{message}")]
    Request { status: StatusCode, message: String },

    /// Response body did not match the expected shape
    #[error("Invalid response from {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Token persistence failed
    #[error("Token storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Protected call attempted without a token
    #[error("Authentication required")]
    NotAuthenticated,

    /// Invalid state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Text shown inline next to the failed table or form
    pub fn user_message(&self) -> String {
        match self {
            Self::Request { message, .. } => message.clone(),
            Self::Transport(_) => "Błąd połączenia z serwerem".to_string(),
            Self::Decode { .. } | Self::Serialization(_) => {
                "Nieprawidłowa odpowiedź serwera".to_string()
            }
            Self::Storage(_) => "Błąd zapisu sesji".to_string(),
            Self::NotAuthenticated => "Brak dostępu".to_string(),
            Self::InvalidState(_) | Self::Config(_) => "Wystąpił błąd".to_string(),
        }
    }

    /// HTTP status for `Request` errors
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Request { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Replace the message of a `Request` error, keeping the status
    pub(crate) fn with_request_message(self, message: &str) -> Self {
        match self {
            Self::Request { status, .. } => Self::Request {
                status,
                message: message.to_string(),
            },
            other => other,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
