use serde::{Deserialize, Serialize};

use crate::{StopId, Time};

/// One Pareto-optimal journey option departing from a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyAlternative {
    pub dep_time: Time,
    pub arr_time: Time,
    /// Number of vehicle boardings; 0 for a pure walking journey.
    pub n_boardings: u32,
}

/// Pareto front of journey alternatives from one stop towards the target
/// set, as produced by the profile engine.
///
/// The pipeline never inspects dominance relations; it only reads the
/// alternatives back out when reducing profiles to statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StopProfile {
    alternatives: Vec<JourneyAlternative>,
}

impl StopProfile {
    /// Finalized profile of a stop with no journey to any target.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_alternatives(alternatives: Vec<JourneyAlternative>) -> Self {
        Self { alternatives }
    }

    pub fn alternatives(&self) -> &[JourneyAlternative] {
        &self.alternatives
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

/// Convenience used in tests and by engine implementations.
pub fn alternative(dep_time: Time, arr_time: Time, n_boardings: u32) -> JourneyAlternative {
    JourneyAlternative {
        dep_time,
        arr_time,
        n_boardings,
    }
}

/// Profiles keyed by their stop.
pub type StopProfiles = hashbrown::HashMap<StopId, StopProfile>;
