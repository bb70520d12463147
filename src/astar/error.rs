// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Recommended number of allowed node expansions in [find_route](crate::find_route)
/// before [RouteError::StepLimitExceeded] is returned.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Error conditions which may occur when looking for a route.
///
/// Not finding a route is not an error - see [Route::is_found](crate::Route::is_found).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// A nearest-node query was made against an index without any nodes.
    #[error("no nodes to snap to")]
    EmptyIndex,

    /// The start or end node doesn't exist in the graph.
    #[error("unknown node: {0:?}")]
    UnknownNode(String),

    /// Route search has exceeded its limit of steps.
    ///
    /// Concluding that no route exists requires traversing the whole connected
    /// component of the start node. The step limit protects against resource
    /// exhaustion on very large graphs.
    #[error("step limit exceeded")]
    StepLimitExceeded,
}
