//! Host resource monitoring agent.
//!
//! Collects CPU, memory, and disk usage from the local machine and reports
//! them to the sitewatch backend at a fixed interval. The `/proc` parsers
//! are pure functions so the format handling is testable without a Linux
//! host.

pub mod collector;
pub mod config;
pub mod sender;
