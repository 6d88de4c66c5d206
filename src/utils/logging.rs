//! Logging utilities
//!
//! Shared logging configuration and helper functions

use crate::config::settings::LoggingConfig;
use crate::models::EstimateRequest;
use anyhow::{Context, Result};
use tracing::info;

/// Set to true to include full request payloads (every tier and step) in debug logs
/// Default is false to reduce log verbosity
pub const VERBOSE_REQUEST_LOGGING: bool = false;

/// Initialize the global tracing subscriber
///
/// `json` format is meant for production, `text` for development.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(config.level.as_str())
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .finish())
    } else {
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(config.level.as_str())
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish())
    };

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Logging system initialized");
    Ok(())
}

/// Create a compact summary of an estimate request for logging
/// Tiers and steps are reduced to counts unless verbose logging is on
pub fn create_estimate_log_summary(request: &EstimateRequest) -> serde_json::Value {
    if VERBOSE_REQUEST_LOGGING {
        return serde_json::to_value(request)
            .unwrap_or(serde_json::json!({"error": "serialize failed"}));
    }

    serde_json::json!({
        "pricingModel": request.pricing_model,
        "usage": request.safe_usage(),
        "tiers": request.safe_tiers().len(),
        "steps": request.safe_steps().len(),
        "setup": request.includes_setup(),
        "freemium": request.includes_freemium(),
        "commitment": request.includes_commitment(),
        "discount": request.includes_discount(),
    })
}
