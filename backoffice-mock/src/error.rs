//! Error responses in the backend's shape: `{"detail": "..."}`

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("Not authenticated")]
    Unauthorized,

    #[error("Incorrect username or password")]
    BadCredentials,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),
}

pub type MockResult<T> = Result<T, MockError>;

impl MockError {
    pub fn not_found(what: &str) -> Self {
        Self::NotFound(format!("{} not found", what))
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let status = match &self {
            MockError::Unauthorized | MockError::BadCredentials => StatusCode::UNAUTHORIZED,
            MockError::NotFound(_) => StatusCode::NOT_FOUND,
            MockError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        tracing::debug!(status = %status, "{}", self);
        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}
