//! Domain logic for the sitewatch monitoring backend.
//!
//! Everything in this crate is pure: no database access, no network I/O.
//! The api crate is responsible for fetching websites, thresholds, and
//! observations from the store and passing them in.

pub mod alert;
pub mod daterange;
pub mod error;
pub mod observation;
pub mod roles;
pub mod threshold;
pub mod timezone;
pub mod types;
pub mod validate;
