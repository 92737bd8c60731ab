use shared::models::{MenuItem, MenuItemPayload};

use super::BackofficeApi;
use crate::error::ClientResult;
use crate::http::HttpClient;

impl<H: HttpClient> BackofficeApi<H> {
    // ========== Menu API ==========

    pub async fn list_menu_items(&self) -> ClientResult<Vec<MenuItem>> {
        self.http.get("menu/items", "Błąd pobierania menu").await
    }

    pub async fn get_menu_item(&self, id: i64) -> ClientResult<MenuItem> {
        self.http
            .get(&format!("menu/items/{}", id), "Nie znaleziono pozycji menu")
            .await
    }

    pub async fn create_menu_item(&self, payload: &MenuItemPayload) -> ClientResult<MenuItem> {
        self.http
            .post("menu/items", payload, "Błąd dodawania pozycji")
            .await
    }

    pub async fn update_menu_item(
        &self,
        id: i64,
        payload: &MenuItemPayload,
    ) -> ClientResult<MenuItem> {
        self.http
            .put(&format!("menu/items/{}", id), payload, "Błąd edycji pozycji")
            .await
    }

    pub async fn delete_menu_item(&self, id: i64) -> ClientResult<()> {
        self.http
            .delete(&format!("menu/items/{}", id), "Błąd usuwania pozycji")
            .await
    }

    /// Mark the item unavailable (`is_available=false`)
    pub async fn block_menu_item(&self, id: i64) -> ClientResult<()> {
        self.http
            .post_empty(
                &format!("menu/items/{}/block?is_available=false", id),
                "Błąd blokowania pozycji",
            )
            .await
    }

    pub async fn unblock_menu_item(&self, id: i64) -> ClientResult<()> {
        self.http
            .post_empty(
                &format!("menu/items/{}/block?is_available=true", id),
                "Błąd odblokowania pozycji",
            )
            .await
    }
}
