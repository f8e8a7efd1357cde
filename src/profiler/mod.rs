//! Profile engine interface and the adapter that drives it
//!
//! The multi-objective connection-scan algorithm lives outside this crate;
//! the pipeline talks to it exclusively through [`ProfileEngine`]. The
//! [`Profiler`] adapter owns one engine instance, resolves routing
//! parameters, applies the default-target policy and reuses the instance
//! across batch iterations via [`ProfileEngine::reset`].

mod adapter;

pub use adapter::{ProfileData, Profiler, load_profiler};

use crate::model::{Connection, StopProfiles, WalkGraph};
use crate::{Error, StopId, Time};

/// Everything an engine needs to be constructed, handed over once.
///
/// `connections` must be ordered by departure time descending; the
/// backward scan consumes them in that order.
#[derive(Debug)]
pub struct EngineInputs {
    pub connections: Vec<Connection>,
    pub targets: Vec<StopId>,
    pub walk_graph: WalkGraph,
    /// Walking speed on transfer edges, meters per second.
    pub walk_speed: f64,
    pub track_vehicle_legs: bool,
    pub track_time: bool,
    /// Minimum transfer buffer, seconds.
    pub transfer_margin: Time,
}

/// A multi-objective profile engine over a fixed timetable and walk
/// network.
///
/// Implementations are constructed once from [`EngineInputs`] and may be
/// retargeted any number of times afterwards.
pub trait ProfileEngine {
    /// Runs the scan to completion, populating the per-stop profiles.
    fn run(&mut self) -> Result<(), Error>;

    /// Clears all computed state and retargets the engine.
    ///
    /// Postcondition: a subsequent [`run`](Self::run) behaves exactly as
    /// if the engine had been freshly constructed with `targets`; nothing
    /// from the previous target set may remain visible.
    fn reset(&mut self, targets: &[StopId]);

    /// Profiles produced by the last [`run`](Self::run).
    fn stop_profiles(&self) -> &StopProfiles;
}
