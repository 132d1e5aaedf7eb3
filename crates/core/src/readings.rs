//! Sensor readings and the history entries recorded from them.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// The most recent measurement reported by the sensor feed.
///
/// Either value may be absent when the feed reports a non-numeric sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    /// Assigned by the sensor feed.
    pub observed_at: Timestamp,
}

/// One row of the append-only history log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: DbId,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub observed_at: Timestamp,
    /// Assigned by the recorder at ingestion time.
    pub recorded_at: Timestamp,
}

/// A history row waiting to be appended. The recorder assigns `id` and `recorded_at`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewHistoryEntry {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub observed_at: Timestamp,
}

impl From<&Reading> for NewHistoryEntry {
    fn from(reading: &Reading) -> Self {
        Self {
            temperature: reading.temperature,
            humidity: reading.humidity,
            observed_at: reading.observed_at,
        }
    }
}
