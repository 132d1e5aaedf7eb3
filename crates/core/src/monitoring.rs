//! The monitoring cycle: one pull-evaluate-record pass per request.
//!
//! ```text
//! resolve species -> get_or_create profile -> [apply update, re-read]
//!   -> latest reading -> append to history -> classify -> recent(window)
//! ```
//!
//! The cycle holds no state between invocations beyond what the registry and
//! recorder persist. A missing reading is an expected state (classified as
//! `Unknown`, nothing appended); any collaborator failure or timeout aborts
//! the cycle with [`CoreError::Infrastructure`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::error::CoreError;
use crate::ports::{HistoryRecorder, ReadingSource, ThresholdRegistry};
use crate::readings::{HistoryEntry, NewHistoryEntry, Reading};
use crate::species::{validate_species_id, DEFAULT_SPECIES};
use crate::status::{classify_reading, ReadingStatus};
use crate::thresholds::{ThresholdBounds, ThresholdProfile, ThresholdUpdate};

/// Number of history entries returned with each view.
pub const DEFAULT_HISTORY_WINDOW: i64 = 10;

/// Upper bound for every registry, recorder, and source call.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Tunables for the monitoring cycle.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Species used when the request does not name one.
    pub default_species: String,
    /// How many history entries the view carries.
    pub history_window: i64,
    /// Per-call I/O timeout; an elapsed timeout is an infrastructure failure.
    pub io_timeout: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            default_species: DEFAULT_SPECIES.to_string(),
            history_window: DEFAULT_HISTORY_WINDOW,
            io_timeout: DEFAULT_IO_TIMEOUT,
        }
    }
}

/// Input for one cycle.
#[derive(Debug, Clone, Default)]
pub struct CycleRequest {
    /// Selected species; `None` falls back to [`MonitorConfig::default_species`].
    pub species_id: Option<String>,
    /// Bounds to write before evaluation.
    pub update: Option<ThresholdUpdate>,
    /// Whether the caller may mutate thresholds, as decided by the auth layer.
    pub authorized: bool,
}

/// Everything the presentation layer needs after one cycle.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorView {
    pub species_id: String,
    /// `None` when the sensor feed had no reading.
    pub reading: Option<Reading>,
    pub status: ReadingStatus,
    pub thresholds: ThresholdBounds,
    /// Most recent entries, newest first.
    pub history: Vec<HistoryEntry>,
    /// True when this cycle wrote new bounds.
    pub thresholds_updated: bool,
}

/// Orchestrates registry, reading source, evaluator, and recorder.
#[derive(Clone)]
pub struct MonitoringCycle {
    registry: Arc<dyn ThresholdRegistry>,
    recorder: Arc<dyn HistoryRecorder>,
    source: Arc<dyn ReadingSource>,
    config: MonitorConfig,
}

impl MonitoringCycle {
    pub fn new(
        registry: Arc<dyn ThresholdRegistry>,
        recorder: Arc<dyn HistoryRecorder>,
        source: Arc<dyn ReadingSource>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            registry,
            recorder,
            source,
            config,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Run one cycle.
    pub async fn run(&self, request: CycleRequest) -> Result<MonitorView, CoreError> {
        let species_id = request
            .species_id
            .unwrap_or_else(|| self.config.default_species.clone());
        validate_species_id(&species_id)?;

        if let Some(update) = &request.update {
            if !request.authorized {
                return Err(CoreError::Forbidden(
                    "Not authorized to update thresholds".into(),
                ));
            }
            update.validate()?;
        }

        let mut profile = self
            .bounded("registry.get_or_create", self.registry.get_or_create(&species_id))
            .await?;

        let thresholds_updated = match &request.update {
            Some(update) => {
                self.bounded("registry.update", self.registry.update(&species_id, update))
                    .await?;
                profile = self
                    .bounded("registry.get_or_create", self.registry.get_or_create(&species_id))
                    .await?;
                tracing::info!(species = %species_id, "Thresholds updated");
                true
            }
            None => false,
        };

        let reading = self.bounded("source.latest", self.source.latest()).await?;

        match &reading {
            Some(reading) => {
                let entry = NewHistoryEntry::from(reading);
                let recorded = self
                    .bounded("recorder.append", self.recorder.append(&entry))
                    .await?;
                tracing::debug!(history_id = recorded.id, "Reading recorded");
            }
            None => {
                tracing::debug!(species = %species_id, "No reading available from sensor feed");
            }
        }

        let status = classify_reading(reading.as_ref(), &profile.bounds);

        let history = self
            .bounded(
                "recorder.recent",
                self.recorder.recent(self.config.history_window),
            )
            .await?;

        Ok(MonitorView {
            species_id: profile.species_id,
            reading,
            status,
            thresholds: profile.bounds,
            history,
            thresholds_updated,
        })
    }

    /// Read-only history window, newest first.
    pub async fn history(&self, limit: i64) -> Result<Vec<HistoryEntry>, CoreError> {
        self.bounded("recorder.recent", self.recorder.recent(limit))
            .await
    }

    /// All registered profiles.
    pub async fn profiles(&self) -> Result<Vec<ThresholdProfile>, CoreError> {
        self.bounded("registry.list", self.registry.list()).await
    }

    /// Apply the configured I/O timeout to one collaborator call.
    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        match tokio::time::timeout(self.config.io_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    operation,
                    timeout_ms = self.config.io_timeout.as_millis() as u64,
                    "Collaborator call timed out"
                );
                Err(CoreError::Infrastructure(format!(
                    "{operation} timed out after {:?}",
                    self.config.io_timeout
                )))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::{Duration as ChronoDuration, Utc};

    use super::*;
    use crate::status::StatusClassification;

    #[derive(Default)]
    struct MemoryRegistry {
        profiles: Mutex<BTreeMap<String, ThresholdBounds>>,
    }

    #[async_trait]
    impl ThresholdRegistry for MemoryRegistry {
        async fn get_or_create(&self, species_id: &str) -> Result<ThresholdProfile, CoreError> {
            let mut profiles = self.profiles.lock().unwrap();
            let bounds = *profiles.entry(species_id.to_string()).or_default();
            Ok(ThresholdProfile {
                species_id: species_id.to_string(),
                bounds,
            })
        }

        async fn update(&self, species_id: &str, update: &ThresholdUpdate) -> Result<(), CoreError> {
            let mut profiles = self.profiles.lock().unwrap();
            match profiles.get_mut(species_id) {
                Some(bounds) => {
                    *bounds = ThresholdBounds::from(*update);
                    Ok(())
                }
                None => Err(CoreError::NotFound {
                    entity: "threshold_profile",
                    key: species_id.to_string(),
                }),
            }
        }

        async fn list(&self) -> Result<Vec<ThresholdProfile>, CoreError> {
            let profiles = self.profiles.lock().unwrap();
            Ok(profiles
                .iter()
                .map(|(species_id, bounds)| ThresholdProfile {
                    species_id: species_id.clone(),
                    bounds: *bounds,
                })
                .collect())
        }
    }

    #[derive(Default)]
    struct MemoryRecorder {
        entries: Mutex<Vec<HistoryEntry>>,
    }

    impl MemoryRecorder {
        fn len(&self) -> usize {
            self.entries.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl HistoryRecorder for MemoryRecorder {
        async fn append(&self, entry: &NewHistoryEntry) -> Result<HistoryEntry, CoreError> {
            let mut entries = self.entries.lock().unwrap();
            let recorded = HistoryEntry {
                id: entries.len() as i64 + 1,
                temperature: entry.temperature,
                humidity: entry.humidity,
                observed_at: entry.observed_at,
                recorded_at: Utc::now(),
            };
            entries.push(recorded);
            Ok(recorded)
        }

        async fn recent(&self, limit: i64) -> Result<Vec<HistoryEntry>, CoreError> {
            let entries = self.entries.lock().unwrap();
            Ok(entries
                .iter()
                .rev()
                .take(usize::try_from(limit).unwrap_or(0))
                .copied()
                .collect())
        }
    }

    struct FixedSource(Option<Reading>);

    #[async_trait]
    impl ReadingSource for FixedSource {
        async fn latest(&self) -> Result<Option<Reading>, CoreError> {
            Ok(self.0)
        }
    }

    struct SlowSource;

    #[async_trait]
    impl ReadingSource for SlowSource {
        async fn latest(&self) -> Result<Option<Reading>, CoreError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(None)
        }
    }

    struct BrokenRecorder;

    #[async_trait]
    impl HistoryRecorder for BrokenRecorder {
        async fn append(&self, _entry: &NewHistoryEntry) -> Result<HistoryEntry, CoreError> {
            Err(CoreError::Infrastructure("connection refused".into()))
        }

        async fn recent(&self, _limit: i64) -> Result<Vec<HistoryEntry>, CoreError> {
            Err(CoreError::Infrastructure("connection refused".into()))
        }
    }

    fn reading(temperature: f64, humidity: f64) -> Reading {
        Reading {
            temperature: Some(temperature),
            humidity: Some(humidity),
            observed_at: Utc::now() - ChronoDuration::seconds(2),
        }
    }

    fn incubator_update() -> ThresholdUpdate {
        ThresholdUpdate {
            temp_min: 36.0,
            temp_max: 38.0,
            humid_min: 50.0,
            humid_max: 65.0,
        }
    }

    fn cycle_with(
        registry: Arc<MemoryRegistry>,
        recorder: Arc<dyn HistoryRecorder>,
        source: Arc<dyn ReadingSource>,
    ) -> MonitoringCycle {
        MonitoringCycle::new(registry, recorder, source, MonitorConfig::default())
    }

    #[tokio::test]
    async fn default_species_is_created_unconfigured() {
        let registry = Arc::new(MemoryRegistry::default());
        let recorder = Arc::new(MemoryRecorder::default());
        let cycle = cycle_with(
            Arc::clone(&registry),
            recorder.clone(),
            Arc::new(FixedSource(Some(reading(37.0, 55.0)))),
        );

        let view = cycle.run(CycleRequest::default()).await.unwrap();

        assert_eq!(view.species_id, DEFAULT_SPECIES);
        assert_eq!(view.thresholds, ThresholdBounds::default());
        assert_eq!(view.status, ReadingStatus::UNKNOWN);
        assert!(!view.thresholds_updated);
        assert_eq!(registry.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn authorized_update_is_visible_in_same_cycle() {
        let registry = Arc::new(MemoryRegistry::default());
        let recorder = Arc::new(MemoryRecorder::default());
        let cycle = cycle_with(
            registry,
            recorder,
            Arc::new(FixedSource(Some(reading(37.0, 70.0)))),
        );

        let view = cycle
            .run(CycleRequest {
                species_id: Some("Duck Egg".into()),
                update: Some(incubator_update()),
                authorized: true,
            })
            .await
            .unwrap();

        assert!(view.thresholds_updated);
        assert_eq!(view.thresholds, ThresholdBounds::from(incubator_update()));
        assert_eq!(view.status.temperature, StatusClassification::OptimalRange);
        assert_eq!(view.status.humidity, StatusClassification::AboveRange);
    }

    #[tokio::test]
    async fn update_persists_into_next_cycle() {
        let registry = Arc::new(MemoryRegistry::default());
        let cycle = cycle_with(
            registry,
            Arc::new(MemoryRecorder::default()),
            Arc::new(FixedSource(Some(reading(35.0, 55.0)))),
        );

        cycle
            .run(CycleRequest {
                species_id: None,
                update: Some(incubator_update()),
                authorized: true,
            })
            .await
            .unwrap();
        let view = cycle.run(CycleRequest::default()).await.unwrap();

        assert!(!view.thresholds_updated);
        assert_eq!(view.status.temperature, StatusClassification::BelowRange);
        assert_eq!(view.status.humidity, StatusClassification::OptimalRange);
    }

    #[tokio::test]
    async fn unauthorized_update_is_rejected_before_any_write() {
        let registry = Arc::new(MemoryRegistry::default());
        let cycle = cycle_with(
            Arc::clone(&registry),
            Arc::new(MemoryRecorder::default()),
            Arc::new(FixedSource(None)),
        );

        let result = cycle
            .run(CycleRequest {
                species_id: None,
                update: Some(incubator_update()),
                authorized: false,
            })
            .await;

        assert_matches!(result, Err(CoreError::Forbidden(_)));
        assert!(registry.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn absent_reading_completes_without_append() {
        let recorder = Arc::new(MemoryRecorder::default());
        let cycle = cycle_with(
            Arc::new(MemoryRegistry::default()),
            recorder.clone(),
            Arc::new(FixedSource(None)),
        );

        let view = cycle
            .run(CycleRequest {
                species_id: None,
                update: Some(incubator_update()),
                authorized: true,
            })
            .await
            .unwrap();

        assert!(view.reading.is_none());
        assert_eq!(view.status, ReadingStatus::UNKNOWN);
        assert!(view.history.is_empty());
        assert_eq!(recorder.len(), 0);
    }

    #[tokio::test]
    async fn every_cycle_appends_even_duplicates() {
        let recorder = Arc::new(MemoryRecorder::default());
        let same = reading(37.0, 55.0);
        let cycle = cycle_with(
            Arc::new(MemoryRegistry::default()),
            recorder.clone(),
            Arc::new(FixedSource(Some(same))),
        );

        for _ in 0..3 {
            cycle.run(CycleRequest::default()).await.unwrap();
        }

        assert_eq!(recorder.len(), 3);
        let view = cycle.run(CycleRequest::default()).await.unwrap();
        assert_eq!(view.history.len(), 4);
        assert!(view.history.iter().all(|e| e.observed_at == same.observed_at));
    }

    #[tokio::test]
    async fn view_history_is_bounded_by_window() {
        let recorder = Arc::new(MemoryRecorder::default());
        let cycle = cycle_with(
            Arc::new(MemoryRegistry::default()),
            recorder.clone(),
            Arc::new(FixedSource(Some(reading(37.0, 55.0)))),
        );

        let mut last = None;
        for _ in 0..15 {
            last = Some(cycle.run(CycleRequest::default()).await.unwrap());
        }
        let view = last.unwrap();

        assert_eq!(recorder.len(), 15);
        assert_eq!(view.history.len(), DEFAULT_HISTORY_WINDOW as usize);
        let ids: Vec<i64> = view.history.iter().map(|e| e.id).collect();
        assert_eq!(ids, (6..=15).rev().collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn recorder_failure_is_fatal() {
        let cycle = cycle_with(
            Arc::new(MemoryRegistry::default()),
            Arc::new(BrokenRecorder),
            Arc::new(FixedSource(Some(reading(37.0, 55.0)))),
        );

        let result = cycle.run(CycleRequest::default()).await;
        assert_matches!(result, Err(CoreError::Infrastructure(_)));
    }

    #[tokio::test]
    async fn slow_source_times_out_as_infrastructure_failure() {
        let cycle = MonitoringCycle::new(
            Arc::new(MemoryRegistry::default()),
            Arc::new(MemoryRecorder::default()),
            Arc::new(SlowSource),
            MonitorConfig {
                io_timeout: Duration::from_millis(20),
                ..MonitorConfig::default()
            },
        );

        let result = cycle.run(CycleRequest::default()).await;
        assert_matches!(result, Err(CoreError::Infrastructure(msg)) if msg.contains("source.latest"));
    }

    #[tokio::test]
    async fn blank_species_is_rejected() {
        let cycle = cycle_with(
            Arc::new(MemoryRegistry::default()),
            Arc::new(MemoryRecorder::default()),
            Arc::new(FixedSource(None)),
        );

        let result = cycle
            .run(CycleRequest {
                species_id: Some("  ".into()),
                ..CycleRequest::default()
            })
            .await;
        assert_matches!(result, Err(CoreError::Validation(_)));
    }
}
