//! Payment Model

use serde::{Deserialize, Serialize};

/// Payment status. Unknown values are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Failed => "failed",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "completed" => Self::Completed,
            "pending" => Self::Pending,
            "failed" => Self::Failed,
            _ => Self::Other(value),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment entity (immutable once created)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub order_number: i64,
    /// Integer grosz
    pub amount_cents: i64,
    pub status: PaymentStatus,
    /// Terminal identifier
    pub hostname: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub terminal_log: Option<String>,
    pub created_at: String,
}

/// Create payment payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCreate {
    pub hostname: String,
    pub order_number: i64,
    pub amount_cents: i64,
    pub status: PaymentStatus,
    #[serde(default)]
    pub terminal_log: String,
    #[serde(default)]
    pub description: String,
}
