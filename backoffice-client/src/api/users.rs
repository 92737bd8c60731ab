use shared::models::{User, UserPayload};

use super::BackofficeApi;
use crate::error::ClientResult;
use crate::http::HttpClient;

impl<H: HttpClient> BackofficeApi<H> {
    // ========== Users API ==========

    pub async fn list_users(&self) -> ClientResult<Vec<User>> {
        self.http.get("users", "Błąd pobierania użytkowników").await
    }

    pub async fn create_user(&self, payload: &UserPayload) -> ClientResult<User> {
        self.http
            .post("users", payload, "Błąd dodawania użytkownika")
            .await
    }

    pub async fn update_user(&self, id: i64, payload: &UserPayload) -> ClientResult<User> {
        self.http
            .put(&format!("users/{}", id), payload, "Błąd edycji użytkownika")
            .await
    }

    pub async fn delete_user(&self, id: i64) -> ClientResult<()> {
        self.http
            .delete(&format!("users/{}", id), "Błąd usuwania użytkownika")
            .await
    }
}
