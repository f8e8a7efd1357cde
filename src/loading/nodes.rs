use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{Error, StopId};

#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(rename = "stop_I")]
    stop: StopId,
}

/// Reads the node table and returns all stop ids in file order.
///
/// This ordering is canonical: it fixes the row order of observable tables
/// and enumerates the target universe for all-to-all batches. Extra
/// columns in the table are ignored.
pub fn read_stop_ids(path: &Path, delimiter: u8) -> Result<Vec<StopId>, Error> {
    let file = File::open(path)?;
    read_stop_ids_from_reader(file, delimiter)
}

pub fn read_stop_ids_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Vec<StopId>, Error> {
    let mut stops = Vec::new();
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(reader);
    for record in csv_reader.deserialize() {
        let raw: RawNode = record?;
        stops.push(raw.stop);
    }
    Ok(stops)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_stop_ids_in_file_order() {
        let data = "stop_I;lat;lon;name\n115;60.1;24.9;Central\n3;60.2;24.8;Harbor\n42;60.3;25.0;Depot\n";
        let stops = read_stop_ids_from_reader(data.as_bytes(), b';').unwrap();
        assert_eq!(stops, vec![115, 3, 42]);
    }

    #[test]
    fn malformed_stop_id_aborts() {
        let data = "stop_I;name\nxyz;Bad\n";
        let err = read_stop_ids_from_reader(data.as_bytes(), b';').unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }
}
