//! Data models module
//!
//! Defines request and response data structures for revenue estimates

pub mod estimate;

pub use estimate::{
    EstimateRequest, EstimateResponse, LineItem, PricingModel, PricingModelInfo, Step, Tier,
};
