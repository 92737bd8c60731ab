//! In-memory back-office backend
//!
//! Implements the REST contract the panel consumes, closely enough for
//! integration tests and local development. Errors use the backend's
//! `{"detail": "..."}` body. `/orders/{id}/events` is deliberately absent:
//! older backend versions do not serve it either.

mod api;
pub mod error;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Json, Router, http::StatusCode, response::IntoResponse};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::{MockError, MockResult};
pub use state::{MockState, OrdersQuery};

/// Build the router over `state`
pub fn router(state: Arc<MockState>) -> Router {
    api::routes()
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "detail": "Not Found" })),
    )
}

/// A running mock server
#[derive(Debug, Clone)]
pub struct MockServer {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
}

impl MockServer {
    /// `http://127.0.0.1:<port>`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Serve `state` on `addr` in a background task
pub async fn spawn_on(addr: SocketAddr, state: Arc<MockState>) -> std::io::Result<MockServer> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;
    let app = router(state.clone());
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Mock server stopped: {}", e);
        }
    });
    tracing::info!("Mock backend listening on {}", addr);
    Ok(MockServer { addr, state })
}

/// Seeded mock on an ephemeral loopback port
pub async fn spawn() -> std::io::Result<MockServer> {
    spawn_on(
        SocketAddr::from(([127, 0, 0, 1], 0)),
        Arc::new(MockState::seeded()),
    )
    .await
}
