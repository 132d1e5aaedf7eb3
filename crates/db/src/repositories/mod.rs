//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async queries that
//! accept `&PgPool` as the first argument.

pub mod history_entry_repo;
pub mod sensor_reading_repo;
pub mod threshold_profile_repo;

pub use history_entry_repo::HistoryEntryRepo;
pub use sensor_reading_repo::SensorReadingRepo;
pub use threshold_profile_repo::ThresholdProfileRepo;
