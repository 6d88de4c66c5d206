//! Revenue estimator
//!
//! Dispatches to the base calculator chosen by the request's pricing model,
//! threads the result through the adjustment pipeline and rounds the total.

use crate::models::{EstimateRequest, EstimateResponse};
use crate::services::adjustments::apply_adjustments;
use crate::services::pricing::calculate_base;
use crate::utils::error::{helpers::validation_error, AppResult, ErrorContext};
use crate::utils::logging::create_estimate_log_summary;
use crate::utils::money::round_currency;
use tracing::debug;

/// Stateless estimator, cheap to clone and safe to share across threads
#[derive(Debug, Clone, Copy, Default)]
pub struct RevenueEstimator;

impl RevenueEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Produce the itemized estimate for `request`
    ///
    /// Fails when the pricing model is missing or an amount leaves the
    /// representable decimal range. Every other absent field is treated as
    /// zero or empty.
    pub fn estimate(&self, request: &EstimateRequest) -> AppResult<EstimateResponse> {
        let model = request
            .pricing_model
            .ok_or_else(|| validation_error("pricingModel is required"))?;
        let usage = request.safe_usage();

        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(summary = %create_estimate_log_summary(request), "Estimating revenue");
        }

        let base = calculate_base(model, request, usage)?;
        debug!(model = %model, subtotal = %base.total, items = base.breakdown.len(), "Base charge computed");

        let adjusted = apply_adjustments(request, usage, base)?;
        let total = round_currency(adjusted.total);
        debug!(model = %model, total = %total, "Estimate complete");

        Ok(EstimateResponse {
            model_type: model,
            breakdown: adjusted.breakdown,
            total,
        })
    }

    /// Estimate from a raw JSON body; an empty body counts as a missing request
    pub fn estimate_json(&self, body: &[u8]) -> AppResult<EstimateResponse> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(validation_error("estimate request body is required"));
        }
        let request: EstimateRequest =
            serde_json::from_slice(body).validation_context("Invalid estimate request")?;
        self.estimate(&request)
    }
}

/// Estimate with the default estimator
pub fn estimate(request: &EstimateRequest) -> AppResult<EstimateResponse> {
    RevenueEstimator::new().estimate(request)
}
