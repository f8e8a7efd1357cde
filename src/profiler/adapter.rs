use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{EngineInputs, ProfileEngine};
use crate::loading::{read_connections, read_transfer_graph};
use crate::model::{Connection, PartialRoutingConfig, RoutingConfig, StopProfiles, TimeWindow, WalkGraph};
use crate::{Error, StopId};

/// Result of one profile computation: the parameters it ran with, the
/// target set, and the per-stop Pareto profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileData {
    pub params: RoutingConfig,
    pub targets: Vec<StopId>,
    pub profiles: StopProfiles,
}

/// Drives one [`ProfileEngine`] instance across one or more target sets.
///
/// Batch mode retargets the same instance instead of rebuilding it, so the
/// timetable and walk network are handed to the engine exactly once.
pub struct Profiler<E: ProfileEngine> {
    engine: E,
    params: RoutingConfig,
    targets: Vec<StopId>,
}

impl<E: ProfileEngine> Profiler<E> {
    /// Builds an engine over the given timetable and walk network.
    ///
    /// `connections` must already be in scan order (departure descending).
    /// With no explicit targets the default target is the origin stop of
    /// the first connection, i.e. the latest-departing one in the window.
    /// That default is data-dependent by design; an empty timetable
    /// without explicit targets is therefore an error.
    pub fn new<F>(
        connections: Vec<Connection>,
        walk_graph: WalkGraph,
        targets: Option<Vec<StopId>>,
        params: RoutingConfig,
        build_engine: F,
    ) -> Result<Self, Error>
    where
        F: FnOnce(EngineInputs) -> E,
    {
        let targets = match targets {
            Some(targets) => targets,
            None => {
                let first = connections.first().ok_or(Error::EmptyTimetable)?;
                info!("no targets given, defaulting to stop {}", first.dep_stop);
                vec![first.dep_stop]
            }
        };
        debug!("profiler parameters: {params:?}");

        let inputs = EngineInputs {
            connections,
            targets: targets.clone(),
            walk_graph,
            walk_speed: params.walking_speed,
            track_vehicle_legs: params.track_vehicle_legs,
            track_time: params.track_time,
            transfer_margin: params.transfer_margin,
        };
        Ok(Self {
            engine: build_engine(inputs),
            params,
            targets,
        })
    }

    /// Clears the engine and points it at a new target set.
    pub fn retarget(&mut self, targets: &[StopId]) {
        self.engine.reset(targets);
        self.targets = targets.to_vec();
    }

    /// Runs the scan for the current targets.
    pub fn run(&mut self) -> Result<ProfileData, Error> {
        info!("profile scan running for targets {:?}", self.targets);
        self.engine.run()?;
        info!("profile scan finished");
        Ok(ProfileData {
            params: self.params.clone(),
            targets: self.targets.clone(),
            profiles: self.engine.stop_profiles().clone(),
        })
    }

    /// The underlying engine instance.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn params(&self) -> &RoutingConfig {
        &self.params
    }

    pub fn targets(&self) -> &[StopId] {
        &self.targets
    }
}

/// Reads the timetable and transfer CSVs and builds a profiler on top.
///
/// Parameter resolution happens first since the connection reader depends
/// on the resolved routing window; absent window bounds fall back to
/// `default_window`.
pub fn load_profiler<E, F>(
    connections_path: &Path,
    transfers_path: &Path,
    targets: Option<Vec<StopId>>,
    params: PartialRoutingConfig,
    default_window: TimeWindow,
    build_engine: F,
) -> Result<Profiler<E>, Error>
where
    E: ProfileEngine,
    F: FnOnce(EngineInputs) -> E,
{
    let (params, defaulted) = params.resolve(default_window);
    if !defaulted.is_empty() {
        debug!("defaulted routing parameters: {defaulted:?}");
    }
    let connections = read_connections(connections_path, params.routing_window())?;
    let walk_graph = read_transfer_graph(transfers_path, params.max_walk_distance)?;
    Profiler::new(connections, walk_graph, targets, params, build_engine)
}
