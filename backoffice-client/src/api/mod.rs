//! Typed endpoints of the back-office REST API
//!
//! One method per backend operation, grouped by resource. Each carries
//! the message shown to staff when the backend gives no detail.

mod auth;
mod categories;
mod menu;
mod orders;
mod payments;
mod stats;
mod users;

pub use stats::{
    DailyOrderStatsResponse, RawBestseller, RawTerminalStat, adapt_bestsellers,
    adapt_terminal_stats,
};

use crate::http::{HttpClient, NetworkHttpClient};

/// Back-office API client
#[derive(Debug, Clone)]
pub struct BackofficeApi<H: HttpClient = NetworkHttpClient> {
    http: H,
}

impl<H: HttpClient> BackofficeApi<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// Underlying HTTP client
    pub fn http(&self) -> &H {
        &self.http
    }
}
