//! Service layer module
//!
//! Contains the base pricing calculators, the adjustment pipeline and the
//! estimator that composes them

pub mod adjustments;
pub mod estimator;
pub mod pricing;

pub use estimator::{estimate, RevenueEstimator};
pub use pricing::RunningTotal;
