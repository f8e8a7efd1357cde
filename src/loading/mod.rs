//! This module is responsible for loading timetable, transfer and node
//! data from CSV sources and preparing it for the profile engine.

mod connections;
mod nodes;
mod transfers;

pub use connections::{read_connections, read_connections_from_reader};
pub use nodes::{read_stop_ids, read_stop_ids_from_reader};
pub use transfers::{read_transfer_graph, read_transfer_graph_from_reader};
