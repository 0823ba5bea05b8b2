//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) where patching applies

pub mod agent;
pub mod alert;
pub mod client;
pub mod metric;
pub mod status;
pub mod threshold;
pub mod user;
pub mod website;
