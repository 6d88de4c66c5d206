//! Revenue estimate handlers
//!
//! Wraps the estimator in a JSON request/response boundary

use crate::handlers::AppState;
use crate::models::{EstimateResponse, PricingModel, PricingModelInfo};
use crate::utils::error::{AppError, AppResult};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

/// Estimate revenue for a pricing configuration
///
/// POST /api/v1/revenue/estimate
pub async fn handle_estimate(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<EstimateResponse>> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::Validation(rejection.body_text())
        }
    })?;
    debug!("Received estimate request ({} bytes)", body.len());

    let response = state.estimator.estimate_json(&body)?;
    Ok(Json(response))
}

/// List the selectable pricing models
///
/// GET /api/v1/revenue/models
pub async fn list_pricing_models() -> Json<Vec<PricingModelInfo>> {
    Json(PricingModel::ALL.into_iter().map(PricingModelInfo::from).collect())
}
