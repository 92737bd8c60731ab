use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use backoffice_mock::{MockState, router};
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let port = std::env::var("MOCK_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let app = router(Arc::new(MockState::seeded()));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Mock backend listening on {}", addr);
    tracing::info!("Accounts: admin/admin, manager/manager");

    axum::serve(listener, app).await.context("mock server stopped")?;
    Ok(())
}
