//! Alert reconciliation engine.
//!
//! Turns the pure verdicts from `sitewatch_core::threshold::evaluate` into
//! persisted alert episodes and outbound notifications. The engine is
//! generic over [`AlertStore`] so the lifecycle rules can be exercised
//! without a database.

pub mod lifecycle;
pub mod store;

pub use lifecycle::AlertEngine;
pub use store::{AlertStore, PgAlertStore};
