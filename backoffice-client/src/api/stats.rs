//! Daily statistics endpoints and their response adapters
//!
//! The backend's field names differ from what the views consume. The
//! renaming lives here and nowhere else.

use serde::Deserialize;
use shared::models::{Bestseller, TerminalOrders};

use super::BackofficeApi;
use crate::error::ClientResult;
use crate::http::HttpClient;

/// Raw `GET /stats/orders/daily` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyOrderStatsResponse {
    #[serde(default)]
    pub terminal_stats: Option<Vec<RawTerminalStat>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTerminalStat {
    pub terminal_name: String,
    pub orders_count: i64,
}

/// Raw element of `GET /stats/menu-items/top`
#[derive(Debug, Clone, Deserialize)]
pub struct RawBestseller {
    pub name: String,
    pub sold_count: i64,
}

/// `terminal_stats[].orders_count` -> `orders_done`; missing list is empty
pub fn adapt_terminal_stats(raw: DailyOrderStatsResponse) -> Vec<TerminalOrders> {
    raw.terminal_stats
        .unwrap_or_default()
        .into_iter()
        .map(|s| TerminalOrders {
            terminal_name: s.terminal_name,
            orders_done: s.orders_count,
        })
        .collect()
}

/// `[].sold_count` -> `total`; a `null` body is empty
pub fn adapt_bestsellers(raw: Option<Vec<RawBestseller>>) -> Vec<Bestseller> {
    raw.unwrap_or_default()
        .into_iter()
        .map(|b| Bestseller {
            name: b.name,
            total: b.sold_count,
        })
        .collect()
}

impl<H: HttpClient> BackofficeApi<H> {
    // ========== Stats API ==========

    pub async fn orders_daily_stats(&self) -> ClientResult<Vec<TerminalOrders>> {
        let raw = self
            .http
            .get("stats/orders/daily", "Błąd pobierania statystyk")
            .await?;
        Ok(adapt_terminal_stats(raw))
    }

    pub async fn bestsellers(&self) -> ClientResult<Vec<Bestseller>> {
        let raw = self
            .http
            .get("stats/menu-items/top", "Błąd pobierania bestsellerów")
            .await?;
        Ok(adapt_bestsellers(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapt_terminal_stats() {
        let raw: DailyOrderStatsResponse = serde_json::from_str(
            r#"{"terminal_stats":[{"terminal_name":"kiosk-1","orders_count":12},{"terminal_name":"kiosk-2","orders_count":0}]}"#,
        )
        .unwrap();
        let stats = adapt_terminal_stats(raw);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].terminal_name, "kiosk-1");
        assert_eq!(stats[0].orders_done, 12);
    }

    #[test]
    fn test_adapt_terminal_stats_missing_list() {
        let raw: DailyOrderStatsResponse = serde_json::from_str("{}").unwrap();
        assert!(adapt_terminal_stats(raw).is_empty());
        let raw: DailyOrderStatsResponse =
            serde_json::from_str(r#"{"terminal_stats":null}"#).unwrap();
        assert!(adapt_terminal_stats(raw).is_empty());
    }

    #[test]
    fn test_adapt_bestsellers() {
        let raw: Option<Vec<RawBestseller>> =
            serde_json::from_str(r#"[{"name":"Pizza","sold_count":31}]"#).unwrap();
        assert_eq!(
            adapt_bestsellers(raw),
            vec![Bestseller {
                name: "Pizza".into(),
                total: 31
            }]
        );
        assert!(adapt_bestsellers(None).is_empty());
    }
}
