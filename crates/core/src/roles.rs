//! Canonical role names.
//!
//! Stored verbatim in `users.role` and embedded in JWT claims.

/// Full administrative access within a client.
pub const ROLE_ADMIN: &str = "admin";

/// Human operator: manages websites and thresholds, submits status batches.
pub const ROLE_OPERATOR: &str = "operator";

/// Machine account used by monitoring agents to report resource metrics.
pub const ROLE_AGENT: &str = "agent";
