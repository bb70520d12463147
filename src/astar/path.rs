// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::geo::NodeIndex;
use crate::{GeoIndex, Position};

/// Result of a route search.
///
/// If no route exists, all vectors are empty and `cost` is [f64::INFINITY].
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Identifiers of the nodes along the route, from start to end.
    pub nodes: Vec<String>,

    /// Positions of the nodes along the route, from start to end.
    pub path: Vec<Position>,

    /// Total distance of the route, in kilometers.
    pub cost: f64,
}

impl Route {
    /// Creates the result representing the lack of a route.
    pub fn not_found() -> Self {
        Self {
            nodes: Vec::default(),
            path: Vec::default(),
            cost: f64::INFINITY,
        }
    }

    pub fn is_found(&self) -> bool {
        !self.nodes.is_empty()
    }
}

/// Per-search state: known costs from the start (g-scores) and the
/// predecessor of every reached node. Discarded once the search returns.
#[derive(Debug, Default)]
pub(super) struct SearchRecord {
    pub(super) g_score: HashMap<NodeIndex, f64>,
    pub(super) came_from: HashMap<NodeIndex, NodeIndex>,
}

impl SearchRecord {
    pub(super) fn new(start: NodeIndex) -> Self {
        let mut record = Self::default();
        record.g_score.insert(start, 0.0);
        record
    }

    /// Returns the best known cost to reach a node, [f64::INFINITY] if it wasn't reached yet.
    #[inline]
    pub(super) fn cost(&self, node: NodeIndex) -> f64 {
        self.g_score.get(&node).copied().unwrap_or(f64::INFINITY)
    }

    /// Records a cheaper way of reaching `node` through `via`.
    #[inline]
    pub(super) fn improve(&mut self, node: NodeIndex, via: NodeIndex, cost: f64) {
        self.came_from.insert(node, via);
        self.g_score.insert(node, cost);
    }

    /// Builds the [Route] ending at `goal` by walking predecessors backwards.
    ///
    /// The total cost is the recorded g-score of the goal, not a sum re-derived
    /// from edge lookups - with parallel edges the two could differ.
    pub(super) fn into_route(self, geo: &GeoIndex, goal: NodeIndex) -> Route {
        let cost = self.cost(goal);
        let indices = self.path_to(goal);

        let mut nodes = Vec::with_capacity(indices.len());
        let mut path = Vec::with_capacity(indices.len());
        for idx in indices {
            let node = geo.node(idx);
            nodes.push(node.id.clone());
            path.push(node.position());
        }

        Route { nodes, path, cost }
    }

    fn path_to(&self, mut last: NodeIndex) -> Vec<NodeIndex> {
        let mut path = vec![last];

        while let Some(&nd) = self.came_from.get(&last) {
            path.push(nd);
            last = nd;
        }

        path.reverse();
        return path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Node;

    fn geo() -> GeoIndex {
        GeoIndex::from_nodes([
            Node::new("a", 1.0, 1.0),
            Node::new("b", 2.0, 2.0),
            Node::new("c", 3.0, 3.0),
        ])
    }

    #[test]
    fn into_route() {
        let mut record = SearchRecord::new(0);
        record.improve(1, 0, 1.5);
        record.improve(2, 1, 4.25);

        let route = record.into_route(&geo(), 2);
        assert_eq!(route.nodes, vec!["a", "b", "c"]);
        assert_eq!(
            route.path,
            vec![
                Position::new(1.0, 1.0),
                Position::new(2.0, 2.0),
                Position::new(3.0, 3.0),
            ]
        );
        assert_eq!(route.cost, 4.25);
        assert!(route.is_found());
    }

    #[test]
    fn into_route_single_node() {
        let route = SearchRecord::new(1).into_route(&geo(), 1);
        assert_eq!(route.nodes, vec!["b"]);
        assert_eq!(route.path, vec![Position::new(2.0, 2.0)]);
        assert_eq!(route.cost, 0.0);
    }

    #[test]
    fn cost_trusts_record() {
        let mut record = SearchRecord::new(0);
        record.improve(1, 0, 7.0);
        assert_eq!(record.cost(1), 7.0);
        assert_eq!(record.cost(2), f64::INFINITY);
        assert_eq!(record.into_route(&geo(), 1).cost, 7.0);
    }

    #[test]
    fn not_found() {
        let route = Route::not_found();
        assert!(!route.is_found());
        assert!(route.path.is_empty());
        assert!(route.cost.is_infinite());
    }
}
