//! Batch computation, caching and reduction of Pareto-optimal transit
//! journey profiles.
//!
//! Given a static timetable (individual vehicle-trip connections) and a
//! walking-transfer graph, this crate orchestrates a multi-objective
//! connection-scan engine to derive, for every stop in the network, the
//! set of non-dominated journey alternatives towards a target set, then
//! reduces each alternative set to scalar observables (trip durations,
//! boarding counts). Computed profile sets and observable tables are
//! cached on disk keyed by a target-set fingerprint, and an all-to-all
//! batch mode sweeps every stop as a target while isolating per-target
//! failures.
//!
//! The connection-scan algorithm itself is not part of this crate: it is
//! consumed through the [`profiler::ProfileEngine`] trait.

pub mod error;
pub mod loading;
pub mod model;
pub mod pipeline;
pub mod prelude;
pub mod profiler;

pub use error::Error;

/// Identifier of a transit stop, as found in the `stop_I` columns.
pub type StopId = u32;

/// Identifier of a vehicle trip.
pub type TripId = u32;

/// Point in time or duration, in seconds.
pub type Time = u32;
