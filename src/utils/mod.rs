//! Utilities module
//!
//! Contains error handling, logging and currency helpers

pub mod error;
pub mod logging;
pub mod money;
