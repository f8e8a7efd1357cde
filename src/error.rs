use thiserror::Error;

use crate::StopId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("cache codec error: {0}")]
    CacheCodec(#[from] serde_json::Error),
    #[error("cache blob '{path}' has schema version {found}, expected {expected}")]
    CacheSchema {
        path: String,
        found: u32,
        expected: u32,
    },
    #[error("timetable contains no connections in the routing window")]
    EmptyTimetable,
    #[error("observable '{observable}' for stop {stop} is negative: {value}")]
    NegativeObservable {
        observable: &'static str,
        stop: StopId,
        value: f64,
    },
    #[error("profile engine error: {0}")]
    Engine(String),
}
