//! Caching, statistics reduction and batch orchestration around the
//! profile computation.

pub mod batch;
pub mod cache;
pub mod stats;

pub use batch::{TargetOutcome, TargetStatistics, compute_all_to_all_statistics};
pub use cache::{get_node_profile_statistics, get_or_compute, get_profile_data, target_fingerprint};
pub use stats::{ObservableTable, ProfileAnalysis, reduce_profiles};
