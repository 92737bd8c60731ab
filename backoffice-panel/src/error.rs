//! Panel errors

use std::sync::Arc;

use backoffice_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanelError {
    /// A mutation or direct API call failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A cached query failed (shared between subscribers)
    #[error("{0}")]
    Query(Arc<ClientError>),

    /// Form input rejected before any request was sent
    #[error("{0}")]
    Validation(String),

    /// Page requires a logged-in user
    #[error("Brak dostępu")]
    NotAuthenticated,

    /// Path does not name a page with data
    #[error("Nieznana strona: {0}")]
    UnknownPage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PanelResult<T> = Result<T, PanelError>;

impl From<Arc<ClientError>> for PanelError {
    fn from(e: Arc<ClientError>) -> Self {
        Self::Query(e)
    }
}

impl PanelError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Message rendered inline next to the table or form
    pub fn user_message(&self) -> String {
        match self {
            Self::Client(e) => e.user_message(),
            Self::Query(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_passes_through_client_text() {
        let e = PanelError::from(ClientError::NotAuthenticated);
        assert_eq!(e.user_message(), "Brak dostępu");
        let e = PanelError::validation("Cena musi być liczbą");
        assert_eq!(e.user_message(), "Cena musi być liczbą");
    }
}
