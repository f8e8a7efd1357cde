// Re-export of the main pipeline entry points
pub use crate::pipeline::batch::{TargetOutcome, compute_all_to_all_statistics};
pub use crate::pipeline::cache::{get_node_profile_statistics, get_profile_data};
pub use crate::pipeline::stats::{ObservableTable, reduce_profiles};

// Data loading
pub use crate::loading::{read_connections, read_stop_ids, read_transfer_graph};

// Core model types
pub use crate::model::{
    Connection, JourneyAlternative, PartialRoutingConfig, RoutingConfig, StopProfile, TimeWindow,
    WalkGraph,
};

// Engine interface and adapter
pub use crate::profiler::{EngineInputs, ProfileData, ProfileEngine, Profiler, load_profiler};

pub use crate::error::Error;
pub use crate::{StopId, Time, TripId};
