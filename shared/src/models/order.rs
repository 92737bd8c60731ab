//! Order Model
//!
//! Status transitions are owned by the backend; the panel only reads
//! orders and, where the backend supports it, their history events.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::util::{DATE_FORMAT, next_day, parse_timestamp};

/// Order status as reported by the backend.
///
/// Unknown values are preserved rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Ready,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Ready => "ready",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "ready" => Self::Ready,
            _ => Self::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    /// Numeric on most backends, a string on some
    #[serde(deserialize_with = "number_or_string")]
    pub order_number: String,
    pub status: OrderStatus,
    #[serde(rename = "type", default)]
    pub order_type: String,
    pub created_at: String,
    #[serde(default)]
    pub accepted_at: Option<String>,
    #[serde(default)]
    pub ready_at: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Whole minutes the customer waited, from placement to pickup
    pub fn wait_minutes(&self) -> Option<i64> {
        let start = parse_timestamp(&self.created_at)?;
        let end = parse_timestamp(self.ready_at.as_deref()?)?;
        Some((end - start).num_minutes())
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Int(n) => n.to_string(),
        Raw::Text(s) => s,
    })
}

/// History event of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEvent {
    pub event_type: String,
    #[serde(default)]
    pub new_status: Option<String>,
    #[serde(default)]
    pub terminal_name: Option<String>,
    pub timestamp: String,
}

/// Filter for `GET /orders`
///
/// `date_to` is an exclusive upper bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl OrderFilter {
    pub fn pending() -> Self {
        Self {
            status: Some(OrderStatus::Pending),
            ..Default::default()
        }
    }

    /// Orders completed (status `ready`) during a single day
    pub fn completed_on(date: NaiveDate) -> Self {
        Self {
            status: Some(OrderStatus::Ready),
            date_from: Some(date),
            date_to: Some(next_day(date)),
        }
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = &self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(from) = self.date_from {
            pairs.push(("date_from", from.format(DATE_FORMAT).to_string()));
        }
        if let Some(to) = self.date_to {
            pairs.push(("date_to", to.format(DATE_FORMAT).to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::parse_date;

    #[test]
    fn test_completed_on_single_day_range() {
        let filter = OrderFilter::completed_on(parse_date("2025-01-10").unwrap());
        assert_eq!(
            filter.to_query_pairs(),
            vec![
                ("status", "ready".to_string()),
                ("date_from", "2025-01-10".to_string()),
                ("date_to", "2025-01-11".to_string()),
            ]
        );
    }

    #[test]
    fn test_pending_filter_has_no_dates() {
        assert_eq!(
            OrderFilter::pending().to_query_pairs(),
            vec![("status", "pending".to_string())]
        );
    }

    #[test]
    fn test_order_decodes_numeric_and_string_numbers() {
        let a: Order = serde_json::from_str(
            r#"{"id":1,"order_number":42,"status":"pending","type":"takeaway","created_at":"2025-01-10T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(a.order_number, "42");
        assert_eq!(a.status, OrderStatus::Pending);
        assert!(a.items.is_empty());

        let b: Order = serde_json::from_str(
            r#"{"id":2,"order_number":"A-7","status":"cancelled","created_at":"2025-01-10T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(b.order_number, "A-7");
        assert_eq!(b.status, OrderStatus::Other("cancelled".into()));
        assert_eq!(b.status.to_string(), "cancelled");
    }

    #[test]
    fn test_wait_minutes() {
        let mut order: Order = serde_json::from_str(
            r#"{"id":1,"order_number":1,"status":"ready","created_at":"2025-01-10T10:00:00","ready_at":"2025-01-10T10:17:45"}"#,
        )
        .unwrap();
        assert_eq!(order.wait_minutes(), Some(17));

        order.ready_at = None;
        assert_eq!(order.wait_minutes(), None);
    }
}
