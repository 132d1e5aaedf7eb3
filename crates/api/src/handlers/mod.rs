pub mod history;
pub mod monitor;
pub mod readings;
pub mod thresholds;
