pub mod query_stats;
pub mod records_reload;
pub mod runner;

pub use query_stats::QueryStatsJob;
pub use records_reload::{ReloadOutcome, RecordsReloadJob};
pub use runner::{JobRunner, RunningJobs};
