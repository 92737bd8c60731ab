//! Daily statistics models
//!
//! These are the shapes after the client-side adapters have run,
//! not the raw backend payloads.

use serde::{Deserialize, Serialize};

/// Orders completed today, per terminal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalOrders {
    pub terminal_name: String,
    pub orders_done: i64,
}

/// Best-selling menu item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bestseller {
    pub name: String,
    pub total: i64,
}
