//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod estimate;
pub mod health;

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::services::RevenueEstimator;
use crate::utils::error::{helpers::not_found_error, AppError};
use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, Uri},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub estimator: RevenueEstimator,
}

/// Create application router
pub async fn create_router(settings: Settings) -> Result<Router> {
    let app_state = Arc::new(AppState {
        settings: settings.clone(),
        estimator: RevenueEstimator::new(),
    });

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(settings.request.max_request_size));

    let router = Router::new()
        .route("/api/v1/revenue/estimate", post(estimate::handle_estimate))
        .route("/api/v1/revenue/models", get(estimate::list_pricing_models))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .fallback(handle_not_found)
        .layer(middleware::from_fn(request_logging_middleware))
        .with_state(app_state)
        .layer(middleware_stack);

    if !settings.security.cors_enabled {
        info!("CORS disabled");
        return Ok(router);
    }

    Ok(router.layer(create_cors_layer(&settings)?))
}

/// JSON error envelope for unrouted paths
async fn handle_not_found(method: Method, uri: Uri) -> AppError {
    not_found_error(format!("No route for {} {}", method, uri.path()))
}

/// Build the CORS layer from the configured origins
fn create_cors_layer(settings: &Settings) -> Result<CorsLayer> {
    let origin = if settings.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins = settings
            .security
            .allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("Invalid CORS origin: {}", origin))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
