//! Data model for transit profile computation
//!
//! Contains the timetable, walking-network and configuration types fed to
//! the profile engine, plus the per-stop profile type it produces.

pub mod config;
pub mod connection;
pub mod profile;
pub mod walk_graph;

pub use config::{PartialRoutingConfig, RoutingConfig, TimeWindow};
pub use connection::Connection;
pub use profile::{JourneyAlternative, StopProfile, StopProfiles};
pub use walk_graph::WalkGraph;
