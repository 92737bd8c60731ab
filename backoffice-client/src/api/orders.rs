use chrono::NaiveDate;
use shared::models::{Order, OrderEvent, OrderFilter};

use super::BackofficeApi;
use crate::error::ClientResult;
use crate::http::HttpClient;

impl<H: HttpClient> BackofficeApi<H> {
    // ========== Orders API ==========

    pub async fn list_orders(&self, filter: &OrderFilter) -> ClientResult<Vec<Order>> {
        self.http
            .get_query("orders", &filter.to_query_pairs(), "Błąd pobierania zamówień")
            .await
    }

    pub async fn pending_orders(&self) -> ClientResult<Vec<Order>> {
        self.list_orders(&OrderFilter::pending()).await
    }

    /// Orders that reached `ready` on `date` (range `[date, date + 1)`)
    pub async fn completed_orders(&self, date: NaiveDate) -> ClientResult<Vec<Order>> {
        self.http
            .get_query(
                "orders",
                &OrderFilter::completed_on(date).to_query_pairs(),
                "Błąd pobierania zrealizowanych zamówień",
            )
            .await
    }

    pub async fn get_order(&self, id: &str) -> ClientResult<Order> {
        self.http
            .get(&format!("orders/{}", id), "Nie znaleziono zamówienia")
            .await
    }

    /// Not every backend version exposes this endpoint
    pub async fn order_events(&self, id: &str) -> ClientResult<Vec<OrderEvent>> {
        self.http
            .get(
                &format!("orders/{}/events", id),
                "Błąd pobierania historii zamówienia",
            )
            .await
    }
}
