//! HTTP request handlers, one module per resource.

pub mod alerts;
pub mod auth;
pub mod metrics;
pub mod status;
pub mod threshold;
pub mod websites;
