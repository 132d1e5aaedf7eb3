//! Optional pruning of old history entries.
//!
//! The monitoring engine never deletes history; display reads are merely
//! windowed. Deployments that want bounded storage enable this job by setting
//! `HISTORY_RETENTION_HOURS`. It deletes entries recorded before the horizon
//! on a fixed interval.

use std::time::Duration;

use chrono::{TimeDelta, Utc};
use eggwatch_db::repositories::HistoryEntryRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Delete history entries older than `retention_hours`, returning the count.
///
/// A zero horizon deletes nothing; the cutoff is never at or after "now".
pub async fn purge_once(pool: &PgPool, retention_hours: u32) -> Result<u64, sqlx::Error> {
    if retention_hours == 0 {
        tracing::warn!("History retention: zero horizon, skipping purge");
        return Ok(0);
    }
    let Some(cutoff) =
        Utc::now().checked_sub_signed(TimeDelta::hours(i64::from(retention_hours)))
    else {
        return Ok(0);
    };
    HistoryEntryRepo::delete_recorded_before(pool, cutoff).await
}

/// Run the history retention loop until `cancel` is triggered.
pub async fn run(pool: PgPool, retention_hours: u32, cancel: CancellationToken) {
    tracing::info!(
        retention_hours,
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "History retention job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("History retention job stopping");
                break;
            }
            _ = interval.tick() => {
                match purge_once(&pool, retention_hours).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "History retention: purged old rows");
                        } else {
                            tracing::debug!("History retention: no rows to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "History retention: cleanup failed");
                    }
                }
            }
        }
    }
}
