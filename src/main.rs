//! Revenue Estimator Server
//!
//! HTTP service that returns itemized revenue estimates for rate plan previews

use anyhow::{Context, Result};
use revenue_estimator::{create_router, utils::logging::init_logging, version_info, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load settings from environment (and .env if present)
    let settings = Settings::new().context("Failed to load server settings")?;

    init_logging(&settings.logging)?;
    info!("{}", version_info());

    let app = create_router(settings.clone()).await?;

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 Revenue estimator started!");
    info!("📝 Health check: http://{}/health", addr);
    info!("💰 Estimate endpoint: http://{}/api/v1/revenue/estimate", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    Ok(())
}
