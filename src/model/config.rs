//! Routing parameter resolution
//!
//! The profile computation accepts a partially-specified parameter bag;
//! every unset option is filled from the defaults below before any data is
//! read. Resolution is pure: it returns a fully-populated immutable config
//! together with the names of the fields that were defaulted, and logs each
//! fill so the effective parameters of a run are visible in the output.

use log::info;
use serde::{Deserialize, Serialize};

use crate::Time;

pub const DEFAULT_MAX_WALK_DISTANCE: u32 = 1000;
pub const DEFAULT_TRANSFER_MARGIN: Time = 180;
pub const DEFAULT_WALKING_SPEED: f64 = 70.0 / 60.0;

/// Inclusive time interval, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: Time,
    pub end: Time,
}

impl TimeWindow {
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, t: Time) -> bool {
        self.start <= t && t <= self.end
    }
}

/// Fully resolved routing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Departure-time window for connections fed to the engine, inclusive.
    pub routing_start_time_dep: Time,
    pub routing_end_time_dep: Time,
    /// Walking edges longer than this are dropped, meters.
    pub max_walk_distance: u32,
    /// Track arrival times as a Pareto objective.
    pub track_time: bool,
    /// Track the number of vehicle boardings as a Pareto objective.
    pub track_vehicle_legs: bool,
    /// Minimum buffer between an arriving and a departing leg, seconds.
    pub transfer_margin: Time,
    /// Walking speed on transfer edges, meters per second.
    pub walking_speed: f64,
}

impl RoutingConfig {
    pub fn routing_window(&self) -> TimeWindow {
        TimeWindow::new(self.routing_start_time_dep, self.routing_end_time_dep)
    }
}

/// Partially-specified routing parameters, as accepted from callers.
#[derive(Debug, Clone, Default)]
pub struct PartialRoutingConfig {
    pub routing_start_time_dep: Option<Time>,
    pub routing_end_time_dep: Option<Time>,
    pub max_walk_distance: Option<u32>,
    pub track_time: Option<bool>,
    pub track_vehicle_legs: Option<bool>,
    pub transfer_margin: Option<Time>,
    pub walking_speed: Option<f64>,
}

impl PartialRoutingConfig {
    /// Fills every unset option with its default, logging each fill.
    ///
    /// The window bounds have no fixed default; absent bounds fall back to
    /// `default_window`, typically the full span covered by the timetable.
    /// Returns the resolved config plus the names of the defaulted fields.
    pub fn resolve(self, default_window: TimeWindow) -> (RoutingConfig, Vec<&'static str>) {
        let mut defaulted = Vec::new();
        let mut fill = |name: &'static str| defaulted.push(name);

        let routing_start_time_dep = self.routing_start_time_dep.unwrap_or_else(|| {
            info!("routing window start not set, using {}", default_window.start);
            fill("routing_start_time_dep");
            default_window.start
        });
        let routing_end_time_dep = self.routing_end_time_dep.unwrap_or_else(|| {
            info!("routing window end not set, using {}", default_window.end);
            fill("routing_end_time_dep");
            default_window.end
        });
        let max_walk_distance = self.max_walk_distance.unwrap_or_else(|| {
            info!("resetting max walk distance to default ({DEFAULT_MAX_WALK_DISTANCE}m)");
            fill("max_walk_distance");
            DEFAULT_MAX_WALK_DISTANCE
        });
        let track_time = self.track_time.unwrap_or_else(|| {
            info!("setting time tracking on");
            fill("track_time");
            true
        });
        let track_vehicle_legs = self.track_vehicle_legs.unwrap_or_else(|| {
            info!("setting vehicle boarding counting on");
            fill("track_vehicle_legs");
            true
        });
        let transfer_margin = self.transfer_margin.unwrap_or_else(|| {
            info!("resetting transfer margin to {DEFAULT_TRANSFER_MARGIN} seconds");
            fill("transfer_margin");
            DEFAULT_TRANSFER_MARGIN
        });
        let walking_speed = self.walking_speed.unwrap_or_else(|| {
            info!("resetting walking speed to default value of 70m/60s");
            fill("walking_speed");
            DEFAULT_WALKING_SPEED
        });

        let config = RoutingConfig {
            routing_start_time_dep,
            routing_end_time_dep,
            max_walk_distance,
            track_time,
            track_vehicle_legs,
            transfer_margin,
            walking_speed,
        };
        (config, defaulted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_fills_all_defaults() {
        let (config, defaulted) =
            PartialRoutingConfig::default().resolve(TimeWindow::new(0, 86400));
        assert_eq!(config.routing_start_time_dep, 0);
        assert_eq!(config.routing_end_time_dep, 86400);
        assert_eq!(config.max_walk_distance, 1000);
        assert!(config.track_time);
        assert!(config.track_vehicle_legs);
        assert_eq!(config.transfer_margin, 180);
        assert!((config.walking_speed - 70.0 / 60.0).abs() < 1e-12);
        assert_eq!(defaulted.len(), 7);
    }

    #[test]
    fn resolve_keeps_explicit_values() {
        let partial = PartialRoutingConfig {
            routing_start_time_dep: Some(3600),
            max_walk_distance: Some(500),
            transfer_margin: Some(60),
            ..Default::default()
        };
        let (config, defaulted) = partial.resolve(TimeWindow::new(0, 86400));
        assert_eq!(config.routing_start_time_dep, 3600);
        assert_eq!(config.routing_end_time_dep, 86400);
        assert_eq!(config.max_walk_distance, 500);
        assert_eq!(config.transfer_margin, 60);
        assert!(!defaulted.contains(&"max_walk_distance"));
        assert!(defaulted.contains(&"routing_end_time_dep"));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = TimeWindow::new(10, 20);
        assert!(window.contains(10));
        assert!(window.contains(20));
        assert!(!window.contains(9));
        assert!(!window.contains(21));
    }
}
