//! Undirected walking-transfer network between stops

use hashbrown::HashMap;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::StopId;

/// Undirected graph of walkable transfers, edge weight is the walking
/// distance in meters.
///
/// Parallel edges between the same stop pair collapse to one, keeping the
/// last distance seen. Self-loops are stored as-is.
#[derive(Debug, Clone, Default)]
pub struct WalkGraph {
    graph: UnGraph<StopId, u32>,
    stop_index: HashMap<StopId, NodeIndex>,
}

impl WalkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&mut self, stop: StopId) -> NodeIndex {
        *self
            .stop_index
            .entry(stop)
            .or_insert_with(|| self.graph.add_node(stop))
    }

    /// Inserts or updates the edge between `a` and `b`.
    pub fn add_edge(&mut self, a: StopId, b: StopId, distance: u32) {
        let (a, b) = (self.node(a), self.node(b));
        self.graph.update_edge(a, b, distance);
    }

    /// Walking distance between two stops, if they are directly connected.
    pub fn distance(&self, a: StopId, b: StopId) -> Option<u32> {
        let a = *self.stop_index.get(&a)?;
        let b = *self.stop_index.get(&b)?;
        self.graph
            .find_edge(a, b)
            .map(|edge| *self.graph.edge_weight(edge).unwrap_or(&u32::MAX))
    }

    /// Stops directly reachable on foot from `stop`, with distances.
    pub fn neighbors(&self, stop: StopId) -> Vec<(StopId, u32)> {
        let Some(&node) = self.stop_index.get(&stop) else {
            return Vec::new();
        };
        self.graph
            .edges(node)
            .map(|edge| {
                let other = if edge.source() == node {
                    edge.target()
                } else {
                    edge.source()
                };
                (self.graph[other], *edge.weight())
            })
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_edges_collapse_last_write_wins() {
        let mut graph = WalkGraph::new();
        graph.add_edge(1, 2, 300);
        graph.add_edge(2, 1, 450);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.distance(1, 2), Some(450));
        assert_eq!(graph.distance(2, 1), Some(450));
    }

    #[test]
    fn neighbors_are_symmetric() {
        let mut graph = WalkGraph::new();
        graph.add_edge(1, 2, 100);
        graph.add_edge(1, 3, 200);
        let mut from_one = graph.neighbors(1);
        from_one.sort_unstable();
        assert_eq!(from_one, vec![(2, 100), (3, 200)]);
        assert_eq!(graph.neighbors(2), vec![(1, 100)]);
    }

    #[test]
    fn unknown_stops_have_no_edges() {
        let graph = WalkGraph::new();
        assert_eq!(graph.distance(1, 2), None);
        assert!(graph.neighbors(9).is_empty());
    }
}
