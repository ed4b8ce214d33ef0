//! CLI library components for the eCRF column mapper.

pub mod config;
pub mod logging;
pub mod workflow;
