// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::frontier::{Frontier, FrontierKind, HeapFrontier, LinearFrontier};
use super::path::{Route, SearchRecord};
use crate::geo::NodeIndex;
use crate::{Graph, GreatCircle, Heuristic, RouteError, DEFAULT_STEP_LIMIT};

/// Additional controls for [find_route] and [find_route_with].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Data structure holding the open set.
    pub frontier: FrontierKind,

    /// How many nodes may be expanded before [RouteError::StepLimitExceeded]
    /// is returned. Use [usize::MAX] to search until the frontier is exhausted.
    pub step_limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            frontier: FrontierKind::default(),
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }
}

/// Uses the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// with the [GreatCircle] heuristic to find the shortest route between two nodes.
///
/// Returns [Route::not_found] if there is no route between the two nodes,
/// and [RouteError::UnknownNode] if either of them isn't in the graph.
pub fn find_route(
    g: &Graph,
    from_id: &str,
    to_id: &str,
    options: &SearchOptions,
) -> Result<Route, RouteError> {
    find_route_with(g, from_id, to_id, options, GreatCircle)
}

/// Same as [find_route], but with a custom [Heuristic].
pub fn find_route_with<H: Heuristic>(
    g: &Graph,
    from_id: &str,
    to_id: &str,
    options: &SearchOptions,
    heuristic: H,
) -> Result<Route, RouteError> {
    let from = g
        .geo()
        .index_of(from_id)
        .ok_or_else(|| RouteError::UnknownNode(from_id.to_owned()))?;
    let to = g
        .geo()
        .index_of(to_id)
        .ok_or_else(|| RouteError::UnknownNode(to_id.to_owned()))?;

    find_route_between(g, from, to, options, heuristic)
}

pub(crate) fn find_route_between<H: Heuristic>(
    g: &Graph,
    from: NodeIndex,
    to: NodeIndex,
    options: &SearchOptions,
    heuristic: H,
) -> Result<Route, RouteError> {
    let search = AStar {
        g,
        goal: to,
        heuristic,
        step_limit: options.step_limit,
    };

    match options.frontier {
        FrontierKind::Linear => search.run(from, LinearFrontier::default()),
        FrontierKind::Heap => search.run(from, HeapFrontier::default()),
    }
}

struct AStar<'a, H: Heuristic> {
    g: &'a Graph,
    goal: NodeIndex,
    heuristic: H,
    step_limit: usize,
}

impl<H: Heuristic> AStar<'_, H> {
    fn estimate(&self, node: NodeIndex) -> f64 {
        let geo = self.g.geo();
        self.heuristic.estimate(geo.node(node), geo.node(self.goal))
    }

    fn run<F: Frontier>(&self, start: NodeIndex, mut frontier: F) -> Result<Route, RouteError> {
        let mut record = SearchRecord::new(start);
        let mut steps: usize = 0;

        log::debug!(
            "searching for route {:?} -> {:?}",
            self.g.geo().node(start).id,
            self.g.geo().node(self.goal).id,
        );

        frontier.push(start, self.estimate(start));

        while let Some(current) = frontier.pop_min() {
            if current == self.goal {
                let route = record.into_route(self.g.geo(), current);
                log::debug!(
                    "route found after {} steps: {} nodes, {} km",
                    steps,
                    route.nodes.len(),
                    route.cost,
                );
                return Ok(route);
            }

            steps += 1;
            if steps > self.step_limit {
                log::debug!("step limit of {} exceeded", self.step_limit);
                return Err(RouteError::StepLimitExceeded);
            }

            let current_cost = record.cost(current);
            log::trace!(
                "expanding {:?} (cost {})",
                self.g.geo().node(current).id,
                current_cost
            );

            for hop in self.g.store().hops(current) {
                // Check if this is the cheapest way to the neighbor
                let neighbor_cost = current_cost + hop.distance;
                if neighbor_cost >= record.cost(hop.to) {
                    continue;
                }

                record.improve(hop.to, current, neighbor_cost);
                frontier.push(hop.to, neighbor_cost + self.estimate(hop.to));
            }
        }

        log::debug!("no route found after {} steps", steps);
        return Ok(Route::not_found());
    }
}
