//! Environmental monitoring engine for egg incubation.
//!
//! Pure domain logic and collaborator traits. Storage lives in `eggwatch-db`,
//! the HTTP surface in `eggwatch-api`.

pub mod error;
pub mod monitoring;
pub mod ports;
pub mod readings;
pub mod species;
pub mod status;
pub mod thresholds;
pub mod types;
