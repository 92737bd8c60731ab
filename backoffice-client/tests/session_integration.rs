// backoffice-client/tests/session_integration.rs
// Session lifecycle against the in-memory backend

use std::sync::Arc;

use backoffice_client::{
    BackofficeApi, ClientConfig, ClientError, ClientResult, FileTokenStore, MemoryTokenStore,
    NetworkHttpClient, Session, SessionState, TokenStore,
};
use backoffice_mock::MockServer;
use tempfile::TempDir;

fn session_with(server: &MockServer, tokens: Arc<dyn TokenStore>) -> Session {
    let config = ClientConfig::new(server.base_url());
    let http = NetworkHttpClient::new(&config, tokens).unwrap();
    Session::new(Arc::new(BackofficeApi::new(http)))
}

fn file_store(dir: &TempDir) -> Arc<FileTokenStore> {
    Arc::new(FileTokenStore::new(dir.path().join("session.json")))
}

/// Token store whose file cannot be removed
#[derive(Debug)]
struct StuckTokenStore(MemoryTokenStore);

impl TokenStore for StuckTokenStore {
    fn load(&self) -> ClientResult<Option<String>> {
        self.0.load()
    }

    fn save(&self, token: &str) -> ClientResult<()> {
        self.0.save(token)
    }

    fn clear(&self) -> ClientResult<()> {
        Err(ClientError::Storage(std::io::Error::other("read-only")))
    }
}

#[tokio::test]
async fn test_login_authenticates_and_persists_token() {
    let server = backoffice_mock::spawn().await.unwrap();
    let dir = TempDir::new().unwrap();
    let tokens = file_store(&dir);
    let session = session_with(&server, tokens.clone());

    let user = session.login("manager", "manager").await.unwrap();
    assert_eq!(user.role, "manager");
    assert!(!user.is_admin());
    assert_eq!(session.state(), SessionState::Authenticated(user));
    assert!(tokens.load().unwrap().is_some());
}

#[tokio::test]
async fn test_invalid_login_stays_anonymous() {
    let server = backoffice_mock::spawn().await.unwrap();
    let dir = TempDir::new().unwrap();
    let tokens = file_store(&dir);
    let session = session_with(&server, tokens.clone());

    let err = session.login("admin", "nie-to-haslo").await.unwrap_err();
    assert_eq!(err.user_message(), "Nieprawidłowy login lub hasło");
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(session.user().is_none());
    assert!(tokens.load().unwrap().is_none());
}

#[tokio::test]
async fn test_restore_resolves_persisted_token() {
    let server = backoffice_mock::spawn().await.unwrap();
    let dir = TempDir::new().unwrap();

    // First process: log in
    let first = session_with(&server, file_store(&dir));
    first.login("admin", "admin").await.unwrap();

    // Second process: start from the file only
    let second = session_with(&server, file_store(&dir));
    assert_eq!(second.state(), SessionState::Anonymous);
    let state = second.restore().await.unwrap();
    let user = state.user().unwrap();
    assert_eq!(user.username, "admin");
    // Identity lookup returns the singular `role` field
    assert!(user.is_admin());
}

#[tokio::test]
async fn test_restore_with_rejected_token_clears_it() {
    let server = backoffice_mock::spawn().await.unwrap();
    let dir = TempDir::new().unwrap();
    let tokens = file_store(&dir);
    tokens.save("mock-404-1").unwrap();

    let session = session_with(&server, tokens.clone());
    let state = session.restore().await.unwrap();

    assert_eq!(state, SessionState::Anonymous);
    assert!(tokens.load().unwrap().is_none());
}

#[tokio::test]
async fn test_login_with_rejected_identity_clears_token() {
    let server = backoffice_mock::spawn().await.unwrap();
    server.state.reject_identity_lookups();
    let dir = TempDir::new().unwrap();
    let tokens = file_store(&dir);
    let session = session_with(&server, tokens.clone());

    let err = session.login("admin", "admin").await.unwrap_err();
    assert_eq!(err.user_message(), "Brak dostępu");
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(session.user().is_none());
    assert!(tokens.load().unwrap().is_none());
}

#[tokio::test]
async fn test_rejected_token_ends_anonymous_even_if_clear_fails() {
    let server = backoffice_mock::spawn().await.unwrap();
    let tokens = Arc::new(StuckTokenStore(MemoryTokenStore::with_token("mock-404-1")));
    let session = session_with(&server, tokens);

    let err = session.restore().await.unwrap_err();
    assert!(matches!(err, ClientError::Storage(_)));
    assert_eq!(session.state(), SessionState::Anonymous);
}

#[tokio::test]
async fn test_restore_without_token_skips_lookup() {
    let server = backoffice_mock::spawn().await.unwrap();
    let dir = TempDir::new().unwrap();
    let session = session_with(&server, file_store(&dir));

    assert_eq!(session.restore().await.unwrap(), SessionState::Anonymous);
}

#[tokio::test]
async fn test_logout_clears_everything() {
    let server = backoffice_mock::spawn().await.unwrap();
    let dir = TempDir::new().unwrap();
    let tokens = file_store(&dir);
    let session = session_with(&server, tokens.clone());

    session.login("admin", "admin").await.unwrap();
    session.logout().unwrap();

    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(tokens.load().unwrap().is_none());
    assert!(session.api().list_menu_items().await.is_err());
}
