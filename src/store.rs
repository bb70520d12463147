// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::geo::NodeIndex;
use crate::Edge;

/// An [Edge] with both endpoints resolved to [NodeIndices](NodeIndex).
#[derive(Debug, Clone, PartialEq)]
struct StoredEdge {
    edge: Edge,
    from: NodeIndex,
    to: NodeIndex,
}

/// A single traversal step over an edge, as seen from one of its endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Hop {
    pub(crate) to: NodeIndex,
    pub(crate) distance: f64,
}

/// Flat collection of [Edges](Edge) with a precomputed adjacency list.
///
/// Edges are undirected unless marked as [oneway](Edge::oneway): an edge (A, B)
/// is traversable from both A and B, a oneway edge only from A.
/// Nodes are referenced by index only - they are owned by a [GeoIndex](crate::GeoIndex).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GraphStore {
    edges: Vec<StoredEdge>,
    adjacency: Vec<Vec<usize>>,
}

impl GraphStore {
    pub(crate) fn with_node_count(node_count: usize) -> Self {
        Self {
            edges: Vec::default(),
            adjacency: vec![Vec::default(); node_count],
        }
    }

    /// Appends an edge. Both endpoints must be valid indices.
    pub(crate) fn push(&mut self, edge: Edge, from: NodeIndex, to: NodeIndex) {
        let edge_idx = self.edges.len();
        self.adjacency[from].push(edge_idx);
        if !edge.oneway && from != to {
            self.adjacency[to].push(edge_idx);
        }
        self.edges.push(StoredEdge { edge, from, to });
    }

    /// Returns the number of edges in the store.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns an iterator over all [Edges](Edge), in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().map(|e| &e.edge)
    }

    /// Gets all [Edges](Edge) traversable from a node, in insertion order.
    pub(crate) fn edges_from(&self, node: NodeIndex) -> impl Iterator<Item = &Edge> + '_ {
        self.incident(node).map(|e| &e.edge)
    }

    /// Gets all steps which can be taken from a node, in insertion order of their edges.
    pub(crate) fn hops(&self, node: NodeIndex) -> impl Iterator<Item = Hop> + '_ {
        self.incident(node).map(move |e| Hop {
            to: if e.from == node { e.to } else { e.from },
            distance: e.edge.distance,
        })
    }

    /// Gets the distance of the first traversable edge between two nodes.
    pub(crate) fn edge_cost(&self, from: NodeIndex, to: NodeIndex) -> Option<f64> {
        self.hops(from)
            .find(|hop| hop.to == to)
            .map(|hop| hop.distance)
    }

    /// Iterates over all edges with their resolved endpoints.
    pub(crate) fn resolved(&self) -> impl Iterator<Item = (&Edge, NodeIndex, NodeIndex)> {
        self.edges.iter().map(|e| (&e.edge, e.from, e.to))
    }

    fn incident(&self, node: NodeIndex) -> impl Iterator<Item = &StoredEdge> + '_ {
        self.adjacency
            .get(node)
            .map(|v| v.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&edge_idx| &self.edges[edge_idx])
    }
}
