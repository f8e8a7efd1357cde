use serde::{Deserialize, Serialize};

use crate::{StopId, Time, TripId};

/// One scheduled vehicle-trip hop between two stops.
///
/// Immutable once constructed. Collections handed to the profile engine
/// must be ordered by departure time descending (latest departure first);
/// the backward connection scan relies on that ordering for correctness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub dep_stop: StopId,
    pub arr_stop: StopId,
    pub dep_time: Time,
    /// Arrival time, expected to be at or after `dep_time`.
    pub arr_time: Time,
    pub trip: TripId,
    /// Position of this hop within its trip.
    pub seq: u32,
}

/// Sorts connections into scan order: departure time descending,
/// ties kept in input order.
pub fn sort_for_scan(connections: &mut [Connection]) {
    connections.sort_by(|a, b| b.dep_time.cmp(&a.dep_time));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn(dep_stop: StopId, arr_stop: StopId, dep: Time, arr: Time) -> Connection {
        Connection {
            dep_stop,
            arr_stop,
            dep_time: dep,
            arr_time: arr,
            trip: 1,
            seq: 0,
        }
    }

    #[test]
    fn scan_order_is_departure_descending() {
        let mut conns = vec![conn(1, 2, 100, 200), conn(2, 3, 210, 300), conn(1, 3, 50, 400)];
        sort_for_scan(&mut conns);
        let deps: Vec<Time> = conns.iter().map(|c| c.dep_time).collect();
        assert_eq!(deps, vec![210, 100, 50]);
    }

    #[test]
    fn scan_order_ties_are_stable() {
        let mut conns = vec![conn(1, 2, 100, 200), conn(5, 6, 100, 150), conn(7, 8, 100, 110)];
        sort_for_scan(&mut conns);
        let origins: Vec<StopId> = conns.iter().map(|c| c.dep_stop).collect();
        assert_eq!(origins, vec![1, 5, 7]);
    }
}
