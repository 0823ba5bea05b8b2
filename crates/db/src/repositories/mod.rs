//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod agent_repo;
pub mod alert_repo;
pub mod client_repo;
pub mod metric_repo;
pub mod status_repo;
pub mod threshold_repo;
pub mod user_repo;
pub mod website_repo;

pub use agent_repo::AgentRepo;
pub use alert_repo::AlertRepo;
pub use client_repo::ClientRepo;
pub use metric_repo::MetricRepo;
pub use status_repo::StatusRepo;
pub use threshold_repo::ThresholdRepo;
pub use user_repo::UserRepo;
pub use website_repo::WebsiteRepo;
