//! History log rows (append-only).

use eggwatch_core::readings::HistoryEntry;
use eggwatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row of `history_entries`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HistoryEntryRow {
    pub id: DbId,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub observed_at: Timestamp,
    pub recorded_at: Timestamp,
}

impl From<HistoryEntryRow> for HistoryEntry {
    fn from(row: HistoryEntryRow) -> Self {
        Self {
            id: row.id,
            temperature: row.temperature,
            humidity: row.humidity,
            observed_at: row.observed_at,
            recorded_at: row.recorded_at,
        }
    }
}
