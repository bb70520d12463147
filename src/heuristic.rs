// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{earth_distance, Node};

/// Estimates the remaining cost between two [Nodes](Node) during route search.
///
/// Implementations must never overestimate the cost of the cheapest route
/// between the nodes, otherwise [find_route_with](crate::find_route_with)
/// is not guaranteed to return optimal routes.
pub trait Heuristic {
    fn estimate(&self, a: &Node, b: &Node) -> f64;
}

/// Great-circle distance between two nodes, in kilometers. See [earth_distance].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreatCircle;

impl Heuristic for GreatCircle {
    #[inline]
    fn estimate(&self, a: &Node, b: &Node) -> f64 {
        earth_distance(a.lat, a.lon, b.lat, b.lon)
    }
}

/// Always estimates zero, turning A* into Dijkstra's algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Zero;

impl Heuristic for Zero {
    #[inline]
    fn estimate(&self, _: &Node, _: &Node) -> f64 {
        0.0
    }
}

impl<H: Heuristic + ?Sized> Heuristic for &H {
    #[inline]
    fn estimate(&self, a: &Node, b: &Node) -> f64 {
        (**self).estimate(a, b)
    }
}
