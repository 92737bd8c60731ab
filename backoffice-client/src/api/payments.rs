use chrono::NaiveDate;
use shared::models::{Payment, PaymentCreate};
use shared::util::{DATE_FORMAT, next_day};

use super::BackofficeApi;
use crate::error::ClientResult;
use crate::http::HttpClient;

impl<H: HttpClient> BackofficeApi<H> {
    // ========== Payments API ==========

    pub async fn list_payments(&self) -> ClientResult<Vec<Payment>> {
        self.http.get("payments", "Błąd pobierania płatności").await
    }

    pub async fn get_payment(&self, id: i64) -> ClientResult<Payment> {
        self.http
            .get(&format!("payments/{}", id), "Nie znaleziono płatności")
            .await
    }

    pub async fn payments_for_order(&self, order_number: i64) -> ClientResult<Vec<Payment>> {
        self.http
            .get_query(
                "payments",
                &[("order_number", order_number.to_string())],
                "Błąd pobierania płatności",
            )
            .await
    }

    /// Payments created on `date`, same exclusive range as orders
    pub async fn payments_on(&self, date: NaiveDate) -> ClientResult<Vec<Payment>> {
        let query = [
            ("date_from", date.format(DATE_FORMAT).to_string()),
            ("date_to", next_day(date).format(DATE_FORMAT).to_string()),
        ];
        self.http
            .get_query("payments", &query, "Błąd pobierania płatności")
            .await
    }

    pub async fn create_payment(&self, payment: &PaymentCreate) -> ClientResult<Payment> {
        self.http
            .post("payments", payment, "Błąd dodawania płatności")
            .await
    }
}
