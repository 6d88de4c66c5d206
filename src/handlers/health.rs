//! Health check handlers
//!
//! Provides application health status check endpoints

use crate::handlers::AppState;
use crate::models::PricingModel;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Service name reported by health endpoints
pub const SERVICE_NAME: &str = "revenue-estimator";

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

/// Check result
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDetails {
    /// Configuration status
    pub config: String,
    /// Number of pricing models the estimator serves
    pub pricing_models: usize,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Basic health check
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");

    Json(build_response("healthy", &state))
}

/// Liveness check
///
/// GET /health/live
/// Only confirms the process is serving requests
pub async fn liveness_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing liveness check");

    Json(build_response("alive", &state))
}

fn build_response(status: &str, state: &AppState) -> HealthResponse {
    let config = match state.settings.validate() {
        Ok(()) => "valid".to_string(),
        Err(e) => format!("invalid: {}", e),
    };

    HealthResponse {
        status: status.to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: Some(HealthDetails {
            config,
            pricing_models: PricingModel::ALL.len(),
            uptime_seconds: get_uptime_seconds(),
        }),
    }
}

/// Get service uptime in seconds
fn get_uptime_seconds() -> u64 {
    use std::sync::OnceLock;
    use std::time::{SystemTime, UNIX_EPOCH};

    static START_TIME: OnceLock<u64> = OnceLock::new();

    let start_time = *START_TIME.get_or_init(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    });

    let current_time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    current_time.saturating_sub(start_time)
}
