use shared::client::{IdentityResponse, LoginRequest, LoginResponse};

use super::BackofficeApi;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

pub(crate) const LOGIN_FAILED: &str = "Nieprawidłowy login lub hasło";
pub(crate) const ACCESS_DENIED: &str = "Brak dostępu";

impl<H: HttpClient> BackofficeApi<H> {
    // ========== Auth API ==========

    /// POST /auth/login (form-encoded)
    ///
    /// Any rejection surfaces as the same fixed message; the backend's
    /// detail is not shown for failed logins.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let form = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.http
            .post_form("auth/login", &form, LOGIN_FAILED)
            .await
            .map_err(|e| e.with_request_message(LOGIN_FAILED))
    }

    /// GET /auth/me with the stored token
    pub async fn me(&self) -> ClientResult<IdentityResponse> {
        if self.http.token_store().load()?.is_none() {
            return Err(ClientError::NotAuthenticated);
        }
        self.http
            .get("auth/me", ACCESS_DENIED)
            .await
            .map_err(|e| e.with_request_message(ACCESS_DENIED))
    }
}
