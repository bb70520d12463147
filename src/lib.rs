// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shortest paths between geographic points over a road network.
//!
//! A road network is a set of [Nodes](Node) with geographic positions and
//! [Edges](Edge) with real-world distances between them. Routes are found with A*,
//! using the great-circle distance as the heuristic. Edges are undirected,
//! unless explicitly marked as [oneway](Edge::oneway).
//!
//! # Example
//!
//! ```no_run
//! let data = roadpath::loader::read_graph_from_file(
//!     "path/to/roads.json",
//!     roadpath::loader::FileFormat::Unknown,
//! ).expect("failed to read roads.json");
//!
//! let router = roadpath::Router::load(data).expect("invalid graph");
//! let route = router
//!     .find_path(
//!         roadpath::Position::new(4.1755, 73.5093),
//!         roadpath::Position::new(4.1712, 73.5158),
//!     )
//!     .expect("failed to find route");
//!
//! if route.is_found() {
//!     println!("{:.2} km: {:?}", route.cost, route.path);
//! }
//! ```

mod astar;
mod distance;
mod geo;
mod graph;
mod heuristic;
mod kd;
pub mod loader;
mod router;
mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use astar::{
    find_route, find_route_with, FrontierKind, Route, RouteError, SearchOptions,
    DEFAULT_STEP_LIMIT,
};
pub use distance::{earth_distance, planar_distance_squared};
pub use geo::GeoIndex;
pub use graph::{EdgeDefect, Graph, GraphError};
pub use heuristic::{GreatCircle, Heuristic, Zero};
pub use kd::KDTree;
pub use router::{NearestStrategy, Router, RouterOptions};
pub use store::GraphStore;

/// A latitude-longitude pair, in degrees.
///
/// No bounds validation is performed - out-of-range values are accepted
/// and simply produce mathematically meaningful (if geographically odd) distances.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Represents a point of the road network.
///
/// Nodes are immutable once loaded into a [GeoIndex].
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
}

impl Node {
    pub fn new(id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lon,
        }
    }

    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.lat, self.lon)
    }
}

/// Represents a traversable connection between two [Nodes](Node).
///
/// `distance` is expressed in kilometers and must be non-negative.
/// For optimal routes, it should also be no shorter than the great-circle distance
/// between the two nodes - see [Graph::inadmissible_edges].
///
/// Multiple edges between the same pair of nodes are allowed and independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub distance: f64,

    /// If set, the edge may only be traversed from `from` to `to`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub oneway: bool,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance,
            oneway: false,
        }
    }

    pub fn oneway(from: impl Into<String>, to: impl Into<String>, distance: f64) -> Self {
        Self {
            oneway: true,
            ..Self::new(from, to, distance)
        }
    }
}

/// Parsed, but not yet validated, road network.
///
/// The serialized form is a JSON object with a `nodes` mapping from identifiers
/// to `{"lat": ..., "lon": ...}` and an `edges` array of
/// `{"from": ..., "to": ..., "distance": ...}`. See [loader] for reading it.
/// Use [Graph::load] to validate it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: BTreeMap<String, Position>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}
