//! Collaborator traits consumed by the monitoring cycle.
//!
//! Implementations own their storage handle, passed in at construction. The
//! PostgreSQL adapters live in `eggwatch-db`; tests use in-memory fakes.
//!
//! Every method may fail only with [`CoreError::Infrastructure`], except
//! [`ThresholdRegistry::update`] which also reports
//! [`CoreError::NotFound`] for an unregistered species.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::readings::{HistoryEntry, NewHistoryEntry, Reading};
use crate::thresholds::{ThresholdProfile, ThresholdUpdate};

/// Durable store of per-species threshold profiles.
#[async_trait]
pub trait ThresholdRegistry: Send + Sync {
    /// Return the profile for `species_id`, creating an unconfigured one if
    /// it does not exist yet.
    ///
    /// Concurrent first-time calls for the same species must all observe the
    /// same single profile, without surfacing a conflict.
    async fn get_or_create(&self, species_id: &str) -> Result<ThresholdProfile, CoreError>;

    /// Overwrite all four bounds of an existing profile.
    async fn update(&self, species_id: &str, update: &ThresholdUpdate) -> Result<(), CoreError>;

    /// All registered profiles, ordered by species id.
    async fn list(&self) -> Result<Vec<ThresholdProfile>, CoreError>;
}

/// Append-only log of ingested readings.
#[async_trait]
pub trait HistoryRecorder: Send + Sync {
    /// Append one entry. Duplicate content is never rejected.
    async fn append(&self, entry: &NewHistoryEntry) -> Result<HistoryEntry, CoreError>;

    /// The `limit` most recently recorded entries, newest first.
    async fn recent(&self, limit: i64) -> Result<Vec<HistoryEntry>, CoreError>;
}

/// External sensor feed.
#[async_trait]
pub trait ReadingSource: Send + Sync {
    /// The single most recent reading, or `None` if the feed has none.
    async fn latest(&self) -> Result<Option<Reading>, CoreError>;
}
