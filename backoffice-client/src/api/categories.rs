use shared::models::{CategoryPayload, MenuCategory};

use super::BackofficeApi;
use crate::error::ClientResult;
use crate::http::HttpClient;

impl<H: HttpClient> BackofficeApi<H> {
    // ========== Category API ==========

    pub async fn list_categories(&self) -> ClientResult<Vec<MenuCategory>> {
        self.http
            .get("menu/categories", "Błąd pobierania kategorii")
            .await
    }

    pub async fn create_category(&self, payload: &CategoryPayload) -> ClientResult<MenuCategory> {
        let body = CategoryPayload {
            id: None,
            ..payload.clone()
        };
        self.http
            .post("menu/categories", &body, "Błąd dodawania kategorii")
            .await
    }

    /// The id is echoed in the body as well as the path
    pub async fn update_category(
        &self,
        id: i64,
        payload: &CategoryPayload,
    ) -> ClientResult<MenuCategory> {
        let body = payload.clone().with_id(id);
        self.http
            .put(
                &format!("menu/categories/{}", id),
                &body,
                "Błąd edycji kategorii",
            )
            .await
    }

    pub async fn delete_category(&self, id: i64) -> ClientResult<()> {
        self.http
            .delete(&format!("menu/categories/{}", id), "Błąd usuwania kategorii")
            .await
    }
}
