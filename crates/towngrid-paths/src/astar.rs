use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::hash::Hash;

use towngrid_core::Point;

use crate::distance::nearest_distance;
use crate::traits::SearchGraph;
use crate::WalkingPath;

/// Per-search bookkeeping of one node.
struct Record<N> {
    g: i32,
    h: i32,
    parent: Option<N>,
    /// Position the node first took in the open set.
    seq: u64,
    closed: bool,
}

/// Open-set entry ordered by lowest `f`, then lowest `h`, then earliest
/// first insertion.
#[derive(Clone, Copy, PartialEq, Eq)]
struct OpenEntry<N> {
    f: i32,
    h: i32,
    g: i32,
    seq: u64,
    node: N,
}

impl<N: Eq> Ord for OpenEntry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the best entry first.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<N: Eq> PartialOrd for OpenEntry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Open set plus per-node records for one search.
struct Search<N> {
    records: HashMap<N, Record<N>>,
    open: BinaryHeap<OpenEntry<N>>,
    seq: u64,
}

impl<N: Copy + Eq + Hash> Search<N> {
    fn new() -> Self {
        Self {
            records: HashMap::new(),
            open: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Open `node` with cost `g`. Keeps the node's original open-set
    /// position when it is already known.
    fn open(&mut self, node: N, g: i32, h: i32, parent: Option<N>) {
        let seq = match self.records.get_mut(&node) {
            Some(rec) => {
                rec.g = g;
                rec.h = h;
                rec.parent = parent;
                rec.seq
            }
            None => {
                let seq = self.seq;
                self.seq += 1;
                self.records.insert(
                    node,
                    Record {
                        g,
                        h,
                        parent,
                        seq,
                        closed: false,
                    },
                );
                seq
            }
        };
        self.open.push(OpenEntry {
            f: g.saturating_add(h),
            h,
            g,
            seq,
            node,
        });
    }

    /// Pop the best open node, skipping closed and superseded entries.
    fn pop(&mut self) -> Option<(N, i32)> {
        while let Some(entry) = self.open.pop() {
            let Some(rec) = self.records.get_mut(&entry.node) else {
                continue;
            };
            if rec.closed || rec.g != entry.g {
                continue;
            }
            rec.closed = true;
            return Some((entry.node, rec.g));
        }
        None
    }

    fn path_to<G: SearchGraph<Node = N>>(&self, graph: &G, goal: N) -> Vec<Point> {
        let mut points = Vec::new();
        let mut cur = Some(goal);
        while let Some(node) = cur {
            points.push(graph.point(node));
            cur = self.records.get(&node).and_then(|rec| rec.parent);
        }
        points.reverse();
        points
    }
}

/// Lowest-cost path from any of `starts` to any of `targets`.
///
/// Both sets must already be resolved to nodes of `graph`. A start that is
/// also a target yields a one-point path; an empty set yields `None`.
pub fn astar_path<G: SearchGraph>(
    graph: &G,
    starts: &[G::Node],
    targets: &[G::Node],
) -> Option<WalkingPath> {
    if let Some(&hit) = starts.iter().find(|s| targets.contains(s)) {
        return Some(WalkingPath::single(graph.point(hit)));
    }
    if starts.is_empty() || targets.is_empty() {
        return None;
    }

    let goal_set: HashSet<G::Node> = targets.iter().copied().collect();
    let goal_points: Vec<Point> = targets.iter().map(|&t| graph.point(t)).collect();
    let heuristic = |node: G::Node| nearest_distance(graph.point(node), &goal_points);

    let mut search = Search::new();
    for &start in starts {
        if !search.records.contains_key(&start) {
            search.open(start, 0, heuristic(start), None);
        }
    }

    let mut buf = Vec::with_capacity(8);
    while let Some((current, g)) = search.pop() {
        if goal_set.contains(&current) {
            let points = search.path_to(graph, current);
            return Some(WalkingPath::new(points, g));
        }

        buf.clear();
        graph.successors(current, &mut buf);
        for &(next, step) in &buf {
            let cost = g.saturating_add(step);
            match search.records.get(&next) {
                Some(rec) if rec.closed || cost >= rec.g => continue,
                _ => {}
            }
            search.open(next, cost, heuristic(next), Some(current));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tiny explicit graph over points for exercising the engine alone.
    struct Edges(Vec<(Point, Point, i32)>);

    impl SearchGraph for Edges {
        type Node = Point;

        fn point(&self, node: Point) -> Point {
            node
        }

        fn successors(&self, node: Point, buf: &mut Vec<(Point, i32)>) {
            buf.extend(
                self.0
                    .iter()
                    .filter(|(from, _, _)| *from == node)
                    .map(|&(_, to, cost)| (to, cost)),
            );
        }
    }

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn prefers_cheaper_detour() {
        let graph = Edges(vec![
            (p(0, 0), p(1, 0), 10),
            (p(1, 0), p(2, 0), 100),
            (p(0, 0), p(0, 1), 10),
            (p(0, 1), p(1, 1), 10),
            (p(1, 1), p(2, 0), 14),
        ]);
        let path = astar_path(&graph, &[p(0, 0)], &[p(2, 0)]).unwrap();
        assert_eq!(path.points(), &[p(0, 0), p(0, 1), p(1, 1), p(2, 0)]);
        assert_eq!(path.cost(), 34);
    }

    #[test]
    fn reaches_nearest_of_several_targets() {
        let graph = Edges(vec![
            (p(0, 0), p(1, 0), 10),
            (p(1, 0), p(2, 0), 10),
            (p(2, 0), p(3, 0), 10),
        ]);
        let path = astar_path(&graph, &[p(0, 0)], &[p(3, 0), p(1, 0)]).unwrap();
        assert_eq!(path.points(), &[p(0, 0), p(1, 0)]);
    }

    #[test]
    fn starts_from_best_of_several_starts() {
        let graph = Edges(vec![(p(0, 0), p(5, 0), 50), (p(4, 0), p(5, 0), 10)]);
        let path = astar_path(&graph, &[p(0, 0), p(4, 0)], &[p(5, 0)]).unwrap();
        assert_eq!(path.start(), p(4, 0));
        assert_eq!(path.cost(), 10);
    }

    #[test]
    fn start_that_is_a_target_short_circuits() {
        let graph = Edges(vec![]);
        let path = astar_path(&graph, &[p(1, 1), p(2, 2)], &[p(2, 2)]).unwrap();
        assert_eq!(path.points(), &[p(2, 2)]);
        assert_eq!(path.cost(), 0);
    }

    #[test]
    fn empty_sets_and_exhaustion_return_none() {
        let graph = Edges(vec![(p(0, 0), p(1, 0), 10)]);
        assert!(astar_path(&graph, &[], &[p(1, 0)]).is_none());
        assert!(astar_path(&graph, &[p(0, 0)], &[]).is_none());
        assert!(astar_path(&graph, &[p(1, 0)], &[p(0, 0)]).is_none());
    }

    #[test]
    fn huge_step_costs_saturate() {
        let graph = Edges(vec![(p(0, 0), p(1, 0), i32::MAX), (p(1, 0), p(2, 0), 10)]);
        let path = astar_path(&graph, &[p(0, 0)], &[p(2, 0)]).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.cost(), i32::MAX);
    }

    #[test]
    fn equal_cost_ties_resolve_by_open_order() {
        // Two equally good routes around a square; the neighbor opened first
        // wins every tie.
        let graph = Edges(vec![
            (p(0, 0), p(1, 0), 10),
            (p(0, 0), p(0, 1), 10),
            (p(1, 0), p(1, 1), 10),
            (p(0, 1), p(1, 1), 10),
        ]);
        let path = astar_path(&graph, &[p(0, 0)], &[p(1, 1)]).unwrap();
        assert_eq!(path.points(), &[p(0, 0), p(1, 0), p(1, 1)]);
    }
}
