// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::astar::find_route_between;
use crate::geo::NodeIndex;
use crate::{Graph, GraphData, GraphError, GreatCircle, KDTree, Position, Route, RouteError, SearchOptions};

/// Selects how positions are snapped to graph nodes by a [Router].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NearestStrategy {
    /// Compare the position against every node, see [GeoIndex::nearest_node](crate::GeoIndex::nearest_node).
    #[default]
    Linear,

    /// Build a [KDTree] when creating the router.
    /// Trades memory and set-up time for much faster lookups on large graphs.
    KdTree,
}

/// Additional controls for a [Router].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouterOptions {
    pub nearest: NearestStrategy,
    pub search: SearchOptions,
}

/// Finds routes between arbitrary positions over a [Graph]:
/// both positions are snapped to their nearest nodes, and then
/// the shortest route between those nodes is looked for.
#[derive(Debug, Clone)]
pub struct Router {
    graph: Graph,
    tree: Option<KDTree>,
    options: RouterOptions,
}

impl Router {
    /// Creates a [Router] with default [RouterOptions].
    pub fn new(graph: Graph) -> Self {
        Self::with_options(graph, RouterOptions::default())
    }

    pub fn with_options(graph: Graph, options: RouterOptions) -> Self {
        let tree = match options.nearest {
            NearestStrategy::Linear => None,
            NearestStrategy::KdTree => KDTree::build(graph.geo()),
        };
        Self {
            graph,
            tree,
            options,
        }
    }

    /// Validates [GraphData] (see [Graph::load]) and creates a [Router] over it.
    pub fn load(data: GraphData) -> Result<Self, GraphError> {
        Graph::load(data).map(Self::new)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Finds the shortest route between the nodes nearest to `start` and `end`.
    ///
    /// If the nodes aren't connected, returns [Route::not_found].
    pub fn find_path(&self, start: Position, end: Position) -> Result<Route, RouteError> {
        let from = self.snap(start)?;
        let to = self.snap(end)?;

        log::debug!(
            "snapped {:?} to {:?} and {:?} to {:?}",
            start,
            self.graph.geo().node(from).id,
            end,
            self.graph.geo().node(to).id,
        );

        find_route_between(&self.graph, from, to, &self.options.search, GreatCircle)
    }

    fn snap(&self, pos: Position) -> Result<NodeIndex, RouteError> {
        match self.tree {
            Some(ref tree) => Ok(tree.find_nearest_index(pos)),
            None => self.graph.geo().nearest_index(pos),
        }
    }
}
