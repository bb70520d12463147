// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::geo::NodeIndex;
use crate::{Edge, GeoIndex, GraphData, GraphStore, GreatCircle, Heuristic, Node};

/// Reason why an [Edge] was rejected by [Graph::load].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EdgeDefect {
    #[error("reference to unknown node {0:?}")]
    UnknownNode(String),

    #[error("negative distance: {0}")]
    NegativeDistance(f64),

    #[error("non-finite distance: {0}")]
    NonFiniteDistance(f64),
}

/// Error conditions which may occur during [Graph::load].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("malformed edge #{index}: {defect}")]
    MalformedGraph { index: usize, defect: EdgeDefect },

    #[error("node {id:?} has non-finite coordinates: ({lat}, {lon})")]
    MalformedNode { id: String, lat: f64, lon: f64 },
}

/// Represents a validated road network: a [GeoIndex] owning the [Nodes](Node)
/// and a [GraphStore] with [Edges](Edge) between them.
///
/// Graphs are immutable after [loading](Graph::load) and may be freely
/// shared between threads running independent searches.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    geo: GeoIndex,
    store: GraphStore,
}

impl Graph {
    /// Validates [GraphData] and converts it into a [Graph].
    ///
    /// Fails with [GraphError::EmptyGraph] if there are no nodes,
    /// with [GraphError::MalformedNode] on the first node with a NaN or infinite
    /// coordinate, or with [GraphError::MalformedGraph] on the first edge referencing
    /// an unknown node or carrying a negative or non-finite distance.
    ///
    /// Edges shorter than the great-circle distance between their endpoints
    /// are accepted, but reported with a warning - see [Graph::inadmissible_edges].
    pub fn load(data: GraphData) -> Result<Self, GraphError> {
        if data.nodes.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        if let Some((id, pos)) = data
            .nodes
            .iter()
            .find(|(_, pos)| !pos.lat.is_finite() || !pos.lon.is_finite())
        {
            return Err(GraphError::MalformedNode {
                id: id.clone(),
                lat: pos.lat,
                lon: pos.lon,
            });
        }

        let geo = GeoIndex::from_nodes(
            data.nodes
                .into_iter()
                .map(|(id, pos)| Node::new(id, pos.lat, pos.lon)),
        );
        let mut store = GraphStore::with_node_count(geo.len());

        for (index, edge) in data.edges.into_iter().enumerate() {
            let (from, to) = Self::validate_edge(&geo, &edge)
                .map_err(|defect| GraphError::MalformedGraph { index, defect })?;
            store.push(edge, from, to);
        }

        let g = Self { geo, store };
        log::info!(
            "loaded graph with {} nodes and {} edges",
            g.geo.len(),
            g.store.len()
        );

        for edge in g.inadmissible_edges() {
            log::warn!(
                "edge {:?} - {:?} is shorter ({} km) than the great-circle distance \
                 between its nodes; routes using it might not be optimal",
                edge.from,
                edge.to,
                edge.distance,
            );
        }

        Ok(g)
    }

    fn validate_edge(geo: &GeoIndex, edge: &Edge) -> Result<(NodeIndex, NodeIndex), EdgeDefect> {
        if !edge.distance.is_finite() {
            return Err(EdgeDefect::NonFiniteDistance(edge.distance));
        } else if edge.distance < 0.0 {
            return Err(EdgeDefect::NegativeDistance(edge.distance));
        }

        let from = geo
            .index_of(&edge.from)
            .ok_or_else(|| EdgeDefect::UnknownNode(edge.from.clone()))?;
        let to = geo
            .index_of(&edge.to)
            .ok_or_else(|| EdgeDefect::UnknownNode(edge.to.clone()))?;
        Ok((from, to))
    }

    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.geo.len()
    }

    /// Always false for a loaded graph; provided for API symmetry with [Graph::len].
    pub fn is_empty(&self) -> bool {
        self.geo.is_empty()
    }

    pub fn geo(&self) -> &GeoIndex {
        &self.geo
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Retrieves a [Node] with the provided id.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.geo.get(id)
    }

    /// Gets all [Edges](Edge) traversable from a node with a given id,
    /// regardless of which endpoint the node is.
    ///
    /// Returns an empty iterator for unknown or isolated nodes.
    pub fn neighbors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.geo
            .index_of(id)
            .into_iter()
            .flat_map(move |idx| self.store.edges_from(idx))
    }

    /// Gets the distance of an [Edge] traversable from one node to another.
    /// If multiple such edges exist, the first one (in load order) is used.
    pub fn edge_cost(&self, from_id: &str, to_id: &str) -> Option<f64> {
        let from = self.geo.index_of(from_id)?;
        let to = self.geo.index_of(to_id)?;
        self.store.edge_cost(from, to)
    }

    /// Lists [Edges](Edge) whose distance is shorter than the [GreatCircle]
    /// distance between their endpoints. Such edges make the heuristic
    /// overestimate, so A* might return suboptimal routes.
    pub fn inadmissible_edges(&self) -> Vec<&Edge> {
        self.store
            .resolved()
            .filter(|&(edge, from, to)| {
                GreatCircle.estimate(self.geo.node(from), self.geo.node(to)) > edge.distance
            })
            .map(|(edge, _, _)| edge)
            .collect()
    }
}
