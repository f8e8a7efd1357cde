use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::model::WalkGraph;
use crate::{Error, StopId};

/// Raw row of a transfers CSV.
///
/// Header: `from_stop_I,to_stop_I,d,d_walk`; `d` (straight-line distance)
/// is not consumed.
#[derive(Debug, Deserialize)]
struct RawTransfer {
    #[serde(rename = "from_stop_I")]
    from_stop: StopId,
    #[serde(rename = "to_stop_I")]
    to_stop: StopId,
    d_walk: u32,
}

/// Reads walking-transfer edges and builds the walk network, keeping only
/// edges with `d_walk <= max_walk_distance`.
///
/// # Errors
///
/// Fails on a missing file or on the first malformed row.
pub fn read_transfer_graph(path: &Path, max_walk_distance: u32) -> Result<WalkGraph, Error> {
    let file = File::open(path)?;
    let graph = read_transfer_graph_from_reader(file, max_walk_distance)?;
    info!(
        "Walk network from '{}': {} stops, {} edges within {max_walk_distance}m",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

pub fn read_transfer_graph_from_reader<R: Read>(
    reader: R,
    max_walk_distance: u32,
) -> Result<WalkGraph, Error> {
    let mut graph = WalkGraph::new();
    for record in csv::Reader::from_reader(reader).deserialize() {
        let raw: RawTransfer = record?;
        if raw.d_walk <= max_walk_distance {
            graph.add_edge(raw.from_stop, raw.to_stop, raw.d_walk);
        }
    }
    Ok(graph)
}
