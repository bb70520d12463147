// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::{planar_distance_squared, Node, Position, RouteError};

/// Dense, load-order index of a [Node] inside a [GeoIndex].
pub(crate) type NodeIndex = usize;

/// Owns all [Nodes](Node) of a road network and answers
/// position-based queries about them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GeoIndex {
    nodes: Vec<Node>,
    by_id: HashMap<String, NodeIndex>,
}

impl GeoIndex {
    /// Creates an index over the provided nodes. Iteration order
    /// (and thus tie-breaking in [GeoIndex::nearest_node]) follows the input order.
    ///
    /// If an id repeats, the later node replaces the earlier one in place.
    pub fn from_nodes<I: IntoIterator<Item = Node>>(nodes: I) -> Self {
        let mut index = Self::default();
        for node in nodes {
            match index.by_id.get(&node.id) {
                Some(&idx) => index.nodes[idx] = node,
                None => {
                    index.by_id.insert(node.id.clone(), index.nodes.len());
                    index.nodes.push(node);
                }
            }
        }
        index
    }

    /// Returns the number of nodes in the index.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over all [Nodes](Node) in the index.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Retrieves a [Node] with the provided id.
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.by_id.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Finds the [Node] closest to the given position, comparing raw degrees
    /// as if they were planar coordinates.
    ///
    /// On ties, the node encountered first in iteration order wins.
    /// Nodes with NaN coordinates never win over nodes with valid ones.
    /// This function requires computing the distance to every [Node],
    /// see [KDTree](crate::KDTree) for large graphs.
    pub fn nearest_node(&self, pos: Position) -> Result<&Node, RouteError> {
        self.nearest_index(pos).map(|idx| &self.nodes[idx])
    }

    pub(crate) fn nearest_index(&self, pos: Position) -> Result<NodeIndex, RouteError> {
        let mut best: Option<(NodeIndex, f64)> = None;

        for (idx, nd) in self.nodes.iter().enumerate() {
            let dist = planar_distance_squared(pos.lat, pos.lon, nd.lat, nd.lon);
            match best {
                Some((_, best_dist))
                    if !(dist < best_dist || (best_dist.is_nan() && !dist.is_nan())) => {}
                _ => best = Some((idx, dist)),
            }
        }

        best.map(|(idx, _)| idx).ok_or(RouteError::EmptyIndex)
    }

    #[inline]
    pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.by_id.get(id).copied()
    }

    #[inline]
    pub(crate) fn node(&self, idx: NodeIndex) -> &Node {
        &self.nodes[idx]
    }

    #[inline]
    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GeoIndex {
        GeoIndex::from_nodes([
            Node::new("a", 0.01, 0.01),
            Node::new("b", 0.01, 0.05),
            Node::new("c", 0.03, 0.09),
            Node::new("d", 0.04, 0.03),
        ])
    }

    #[test]
    fn lookup() {
        let index = sample();
        assert_eq!(index.len(), 4);
        assert_eq!(index.get("c"), Some(&Node::new("c", 0.03, 0.09)));
        assert!(index.get("z").is_none());
        assert!(index.contains("a"));
        assert!(!index.contains("z"));
    }

    #[test]
    fn nearest_node() {
        let index = sample();
        assert_eq!(index.nearest_node(Position::new(0.02, 0.02)).unwrap().id, "a");
        assert_eq!(index.nearest_node(Position::new(0.05, 0.03)).unwrap().id, "d");
        assert_eq!(index.nearest_node(Position::new(0.0, 0.1)).unwrap().id, "c");
    }

    #[test]
    fn nearest_node_tie_picks_first() {
        let index = GeoIndex::from_nodes([
            Node::new("left", 0.0, -1.0),
            Node::new("right", 0.0, 1.0),
        ]);
        assert_eq!(index.nearest_node(Position::new(0.0, 0.0)).unwrap().id, "left");
    }

    #[test]
    fn nearest_node_out_of_range_position() {
        let index = sample();
        assert_eq!(index.nearest_node(Position::new(500.0, -720.0)).unwrap().id, "d");
    }

    #[test]
    fn nearest_node_skips_nan_nodes() {
        let index = GeoIndex::from_nodes([
            Node::new("0bad", f64::NAN, 0.0),
            Node::new("a", 0.0, 0.0),
            Node::new("b", 0.0, 0.01),
            Node::new("1bad", 0.0, f64::NAN),
        ]);
        assert_eq!(index.nearest_node(Position::new(0.0, 0.0)).unwrap().id, "a");
        assert_eq!(index.nearest_node(Position::new(0.0, 0.01)).unwrap().id, "b");

        // Nothing is comparable to a NaN position - fall back to the first node
        assert_eq!(index.nearest_node(Position::new(f64::NAN, 0.0)).unwrap().id, "0bad");
    }

    #[test]
    fn nearest_node_empty() {
        let index = GeoIndex::default();
        assert_eq!(
            index.nearest_node(Position::new(0.0, 0.0)),
            Err(RouteError::EmptyIndex)
        );
    }

    #[test]
    fn duplicate_ids_replace() {
        let index = GeoIndex::from_nodes([
            Node::new("a", 1.0, 1.0),
            Node::new("b", 2.0, 2.0),
            Node::new("a", 3.0, 3.0),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("a").unwrap().lat, 3.0);
        assert_eq!(index.iter().next().unwrap().id, "a");
    }
}
