// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BinaryHeap, HashMap};

use crate::geo::NodeIndex;

/// Selects the data structure used to hold the open set during route search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrontierKind {
    /// Unordered list, scanned in full to find the node with the lowest score.
    /// Among equal scores, the node which entered the frontier first wins.
    ///
    /// Each step is O(n) in the frontier size, which is fine for
    /// neighborhood- and city-sized graphs.
    #[default]
    Linear,

    /// Binary heap with lazy removal of outdated entries.
    /// Among equal scores, the entry pushed first wins.
    Heap,
}

/// Open set of an A* search: nodes discovered but not yet expanded,
/// keyed by their estimated total cost (f-score).
pub(super) trait Frontier {
    /// Adds a node to the frontier, or updates its score if it's already present.
    fn push(&mut self, node: NodeIndex, score: f64);

    /// Removes and returns the node with the lowest score.
    fn pop_min(&mut self) -> Option<NodeIndex>;
}

#[derive(Debug, Default)]
pub(super) struct LinearFrontier(Vec<(NodeIndex, f64)>);

impl Frontier for LinearFrontier {
    fn push(&mut self, node: NodeIndex, score: f64) {
        match self.0.iter_mut().find(|(n, _)| *n == node) {
            Some(entry) => entry.1 = score,
            None => self.0.push((node, score)),
        }
    }

    fn pop_min(&mut self) -> Option<NodeIndex> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &(_, score)) in self.0.iter().enumerate() {
            match best {
                Some((_, best_score)) if !(score < best_score) => {}
                _ => best = Some((i, score)),
            }
        }

        // Order must be preserved for tie-breaking, hence no swap_remove
        best.map(|(i, _)| self.0.remove(i).0)
    }
}

#[derive(Debug, Clone, Copy)]
struct HeapItem {
    node: NodeIndex,
    score: f64,
    seq: u64,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as lower scores (and earlier pushes) are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Default)]
pub(super) struct HeapFrontier {
    heap: BinaryHeap<HeapItem>,

    /// Sequence number of the live entry of every node in the frontier.
    /// Heap entries with any other sequence number are outdated.
    live: HashMap<NodeIndex, u64>,
    next_seq: u64,
}

impl Frontier for HeapFrontier {
    fn push(&mut self, node: NodeIndex, score: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.live.insert(node, seq);
        self.heap.push(HeapItem { node, score, seq });
    }

    fn pop_min(&mut self) -> Option<NodeIndex> {
        while let Some(item) = self.heap.pop() {
            if self.live.get(&item.node) == Some(&item.seq) {
                self.live.remove(&item.node);
                return Some(item.node);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<F: Frontier>(f: &mut F) -> Vec<NodeIndex> {
        std::iter::from_fn(|| f.pop_min()).collect()
    }

    fn check_ordering<F: Frontier + Default>() {
        let mut f = F::default();
        f.push(1, 5.0);
        f.push(2, 3.0);
        f.push(3, 4.0);
        f.push(1, 1.0);
        assert_eq!(drain(&mut f), vec![1, 2, 3]);
        assert_eq!(f.pop_min(), None);
    }

    fn check_ties<F: Frontier + Default>() {
        let mut f = F::default();
        f.push(7, 2.0);
        f.push(3, 1.0);
        f.push(5, 1.0);
        f.push(4, 1.0);
        assert_eq!(drain(&mut f), vec![3, 5, 4, 7]);
    }

    fn check_reinsert<F: Frontier + Default>() {
        let mut f = F::default();
        f.push(1, 1.0);
        f.push(2, 2.0);
        assert_eq!(f.pop_min(), Some(1));
        f.push(1, 0.5);
        assert_eq!(drain(&mut f), vec![1, 2]);
    }

    #[test]
    fn linear_ordering() {
        check_ordering::<LinearFrontier>();
    }

    #[test]
    fn linear_ties() {
        check_ties::<LinearFrontier>();
    }

    #[test]
    fn linear_reinsert() {
        check_reinsert::<LinearFrontier>();
    }

    #[test]
    fn linear_update_keeps_position() {
        let mut f = LinearFrontier::default();
        f.push(1, 3.0);
        f.push(2, 2.0);
        f.push(1, 2.0);
        assert_eq!(drain(&mut f), vec![1, 2]);
    }

    #[test]
    fn heap_ordering() {
        check_ordering::<HeapFrontier>();
    }

    #[test]
    fn heap_ties() {
        check_ties::<HeapFrontier>();
    }

    #[test]
    fn heap_reinsert() {
        check_reinsert::<HeapFrontier>();
    }

    #[test]
    fn heap_skips_outdated_entries() {
        let mut f = HeapFrontier::default();
        f.push(1, 3.0);
        f.push(1, 2.0);
        f.push(1, 1.0);
        assert_eq!(f.pop_min(), Some(1));
        assert_eq!(f.pop_min(), None);
    }
}
