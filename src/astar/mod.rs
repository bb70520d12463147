// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod error;
mod frontier;
mod path;
mod search;

pub use error::{RouteError, DEFAULT_STEP_LIMIT};
pub use frontier::FrontierKind;
pub use path::Route;
pub use search::{find_route, find_route_with, SearchOptions};

pub(crate) use search::find_route_between;

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;
    use crate::{earth_distance, Edge, Graph, GraphData, Position};

    /// Relative tolerance for comparing costs summed in a different order.
    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    /// Generates small graphs where every edge is at least as long as
    /// the great-circle distance between its nodes.
    fn admissible_graph() -> impl Strategy<Value = Graph> {
        (2usize..8)
            .prop_flat_map(|n| {
                (
                    prop::collection::vec((0.0f64..0.05, 0.0f64..0.05), n),
                    prop::collection::vec((0..n, 0..n, 1.0f64..3.0), 0..16),
                )
            })
            .prop_map(|(positions, edges)| {
                let mut data = GraphData::default();
                for (i, &(lat, lon)) in positions.iter().enumerate() {
                    data.nodes.insert(i.to_string(), Position::new(lat, lon));
                }
                for (a, b, stretch) in edges {
                    let (pa, pb) = (positions[a], positions[b]);
                    let crow_flies = earth_distance(pa.0, pa.1, pb.0, pb.1);
                    data.edges
                        .push(Edge::new(a.to_string(), b.to_string(), crow_flies * stretch + 0.001));
                }
                Graph::load(data).unwrap()
            })
    }

    fn ids(g: &Graph) -> Vec<String> {
        g.geo().iter().map(|n| n.id.clone()).collect()
    }

    fn cost(g: &Graph, from: &str, to: &str, frontier: FrontierKind) -> f64 {
        let options = SearchOptions {
            frontier,
            step_limit: usize::MAX,
        };
        find_route(g, from, to, &options).unwrap().cost
    }

    proptest! {
        #[test]
        fn same_start_and_end(g in admissible_graph()) {
            for id in ids(&g) {
                let route = find_route(&g, &id, &id, &SearchOptions::default()).unwrap();
                prop_assert_eq!(route.nodes, vec![id.clone()]);
                prop_assert_eq!(route.cost, 0.0);
            }
        }

        #[test]
        fn cost_never_exceeds_direct_edge(g in admissible_graph()) {
            for edge in g.store().iter() {
                let c = cost(&g, &edge.from, &edge.to, FrontierKind::Linear);
                prop_assert!(c <= edge.distance + 1e-9, "{} > {}", c, edge.distance);
            }
        }

        #[test]
        fn symmetric(g in admissible_graph()) {
            let ids = ids(&g);
            for a in &ids {
                for b in &ids {
                    let there = cost(&g, a, b, FrontierKind::Linear);
                    let back = cost(&g, b, a, FrontierKind::Linear);
                    prop_assert_eq!(there.is_infinite(), back.is_infinite());
                    if there.is_finite() {
                        prop_assert!(close(there, back), "{} != {}", there, back);
                    }
                }
            }
        }

        #[test]
        fn frontiers_agree(g in admissible_graph()) {
            let ids = ids(&g);
            for a in &ids {
                for b in &ids {
                    let linear = cost(&g, a, b, FrontierKind::Linear);
                    let heap = cost(&g, a, b, FrontierKind::Heap);
                    prop_assert_eq!(linear.is_infinite(), heap.is_infinite());
                    if linear.is_finite() {
                        prop_assert!(close(linear, heap), "{} != {}", linear, heap);
                    }
                }
            }
        }

        #[test]
        fn route_follows_edges(g in admissible_graph()) {
            let ids = ids(&g);
            for a in &ids {
                for b in &ids {
                    let route = find_route(&g, a, b, &SearchOptions::default()).unwrap();
                    if !route.is_found() {
                        prop_assert!(route.path.is_empty());
                        prop_assert!(route.cost.is_infinite());
                        continue;
                    }

                    prop_assert_eq!(route.nodes.first(), Some(a));
                    prop_assert_eq!(route.nodes.last(), Some(b));
                    prop_assert_eq!(route.nodes.len(), route.path.len());

                    let mut total = 0.0;
                    for pair in route.nodes.windows(2) {
                        let step = g.edge_cost(&pair[0], &pair[1]);
                        prop_assert!(step.is_some(), "no edge {} - {}", pair[0], pair[1]);
                        total += step.unwrap_or_default();
                    }
                    prop_assert!(total + 1e-9 >= route.cost);
                }
            }
        }
    }
}
