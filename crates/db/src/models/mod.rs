//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus a `Deserialize` DTO for inserts where rows are
//! created from outside the crate.

pub mod history;
pub mod sensor_reading;
pub mod threshold;
