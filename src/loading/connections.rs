use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::model::{Connection, TimeWindow, connection::sort_for_scan};
use crate::{Error, StopId, Time, TripId};

/// Raw row of a connections CSV.
///
/// Header: `from_stop_I,to_stop_I,dep_time_ut,arr_time_ut,route_type,trip_I,seq,route_I`;
/// `route_type` and `route_I` are not consumed.
#[derive(Debug, Deserialize)]
struct RawConnection {
    #[serde(rename = "from_stop_I")]
    from_stop: StopId,
    #[serde(rename = "to_stop_I")]
    to_stop: StopId,
    dep_time_ut: Time,
    arr_time_ut: Time,
    #[serde(rename = "trip_I")]
    trip: TripId,
    seq: u32,
}

/// Reads timetabled connections departing inside `window` (inclusive on
/// both bounds) and returns them in scan order: departure time descending,
/// input order on ties.
///
/// # Errors
///
/// Fails on a missing file or on the first malformed row; there is no
/// partial-row recovery. An empty result is valid.
pub fn read_connections(path: &Path, window: TimeWindow) -> Result<Vec<Connection>, Error> {
    let file = File::open(path)?;
    let connections = read_connections_from_reader(file, window)?;
    info!(
        "Read {} connections from '{}' within window [{}, {}]",
        connections.len(),
        path.display(),
        window.start,
        window.end
    );
    Ok(connections)
}

pub fn read_connections_from_reader<R: Read>(
    reader: R,
    window: TimeWindow,
) -> Result<Vec<Connection>, Error> {
    let mut connections = Vec::new();
    for record in csv::Reader::from_reader(reader).deserialize() {
        let raw: RawConnection = record?;
        if window.contains(raw.dep_time_ut) {
            connections.push(Connection {
                dep_stop: raw.from_stop,
                arr_stop: raw.to_stop,
                dep_time: raw.dep_time_ut,
                arr_time: raw.arr_time_ut,
                trip: raw.trip,
                seq: raw.seq,
            });
        }
    }
    sort_for_scan(&mut connections);
    Ok(connections)
}
