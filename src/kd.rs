// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::geo::NodeIndex;
use crate::{planar_distance_squared, GeoIndex, Node, Position};

/// KDTree implements the [k-d tree data structure](https://en.wikipedia.org/wiki/K-d_tree),
/// which can be used to speed up nearest-neighbor search for large datasets,
/// in place of the linear scan done by [GeoIndex::nearest_node].
///
/// Just like [GeoIndex::nearest_node], latitude and longitude degrees are
/// treated as planar coordinates. When multiple nodes are equally close,
/// the returned one may differ from the one chosen by the linear scan,
/// but the choice is stable for a given tree.
#[derive(Debug, Clone)]
pub struct KDTree {
    pivot: Node,
    pivot_idx: NodeIndex,
    left: Option<Box<KDTree>>,
    right: Option<Box<KDTree>>,
}

impl KDTree {
    /// Finds the [Node] closest to the given position.
    pub fn find_nearest_node(&self, pos: Position) -> &Node {
        let (nearest, _) = self.find_nearest_impl(pos, false);
        &nearest.pivot
    }

    pub(crate) fn find_nearest_index(&self, pos: Position) -> NodeIndex {
        self.find_nearest_impl(pos, false).0.pivot_idx
    }

    fn find_nearest_impl(&self, pos: Position, lon_divides: bool) -> (&KDTree, f64) {
        // Start by assuming that pivot is the closest
        let mut best = self;
        let mut best_dist = planar_distance_squared(pos.lat, pos.lon, self.pivot.lat, self.pivot.lon);

        // Select which branch to recurse into first
        let first_left = if lon_divides {
            pos.lon < self.pivot.lon
        } else {
            pos.lat < self.pivot.lat
        };
        let (first, second) = if first_left {
            (&self.left, &self.right)
        } else {
            (&self.right, &self.left)
        };

        // Recurse into the first branch
        if let Some(ref branch) = first {
            let (alt, alt_dist) = branch.find_nearest_impl(pos, !lon_divides);
            if alt_dist < best_dist {
                best = alt;
                best_dist = alt_dist;
            }
        }

        // (Optionally) recurse into the second branch
        if let Some(ref branch) = second {
            // A closer node is possible in the second branch if and only if
            // the splitting axis is closer than the current best candidate.
            let to_axis = if lon_divides {
                pos.lon - self.pivot.lon
            } else {
                pos.lat - self.pivot.lat
            };

            if to_axis * to_axis < best_dist {
                let (alt, alt_dist) = branch.find_nearest_impl(pos, !lon_divides);
                if alt_dist < best_dist {
                    best = alt;
                    best_dist = alt_dist;
                }
            }
        }

        return (best, best_dist);
    }

    /// Builds a k-d tree over all [Nodes](Node) of a [GeoIndex].
    /// Returns `None` if the index is empty.
    pub fn build(geo: &GeoIndex) -> Option<Self> {
        let mut nodes = geo.nodes().iter().cloned().enumerate().collect::<Vec<_>>();
        Self::build_impl(nodes.as_mut_slice(), false)
    }

    fn build_impl(nodes: &mut [(NodeIndex, Node)], lon_divides: bool) -> Option<Self> {
        match nodes.len() {
            0 => None,
            1 => {
                let (pivot_idx, pivot) = nodes[0].clone();
                Some(Self {
                    pivot,
                    pivot_idx,
                    left: None,
                    right: None,
                })
            }
            _ => {
                if lon_divides {
                    nodes.sort_by(|(_, a), (_, b)| a.lon.total_cmp(&b.lon));
                } else {
                    nodes.sort_by(|(_, a), (_, b)| a.lat.total_cmp(&b.lat));
                }
                let median = nodes.len() / 2;
                let (pivot_idx, pivot) = nodes[median].clone();
                let (left, right_and_pivot) = nodes.split_at_mut(median);
                let right = &mut right_and_pivot[1..];
                Some(Self {
                    pivot,
                    pivot_idx,
                    left: Self::build_impl(left, !lon_divides).map(Box::new),
                    right: Self::build_impl(right, !lon_divides).map(Box::new),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GeoIndex {
        GeoIndex::from_nodes([
            Node::new("1", 0.01, 0.01),
            Node::new("2", 0.01, 0.05),
            Node::new("3", 0.03, 0.09),
            Node::new("4", 0.04, 0.03),
            Node::new("5", 0.04, 0.07),
            Node::new("6", 0.07, 0.03),
            Node::new("7", 0.07, 0.01),
            Node::new("8", 0.08, 0.05),
            Node::new("9", 0.08, 0.09),
        ])
    }

    #[test]
    fn kd_tree() {
        let tree = KDTree::build(&grid()).expect("k-d tree from non-empty index must not be empty");

        assert_eq!(tree.find_nearest_node(Position::new(0.02, 0.02)).id, "1");
        assert_eq!(tree.find_nearest_node(Position::new(0.05, 0.03)).id, "4");
        assert_eq!(tree.find_nearest_node(Position::new(0.05, 0.08)).id, "5");
        assert_eq!(tree.find_nearest_node(Position::new(0.09, 0.06)).id, "8");
    }

    #[test]
    fn kd_tree_agrees_with_linear_scan() {
        let geo = grid();
        let tree = KDTree::build(&geo).unwrap();

        for i in 0..=20 {
            for j in 0..=20 {
                let pos = Position::new(i as f64 * 0.005 + 0.0013, j as f64 * 0.005 + 0.0007);
                let expected = geo.nearest_node(pos).unwrap();
                let got = tree.find_nearest_node(pos);
                assert_eq!(
                    planar_distance_squared(pos.lat, pos.lon, expected.lat, expected.lon),
                    planar_distance_squared(pos.lat, pos.lon, got.lat, got.lon),
                    "at {pos:?}: expected {}, got {}",
                    expected.id,
                    got.id,
                );
                assert_eq!(geo.index_of(&got.id), Some(tree.find_nearest_index(pos)));
            }
        }
    }

    #[test]
    fn kd_tree_empty() {
        assert!(KDTree::build(&GeoIndex::default()).is_none());
    }
}
