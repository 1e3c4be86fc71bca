use towngrid_core::{GridLayout, Point};

use crate::distance::node_distance;
use crate::node::{GridId, NodeKind, NodeRef};
use crate::traits::{GridLookup, SearchGraph};
use crate::{GridPathfinding, Tag};

/// A grid seen from one search: the origin grid, the grids its switches may
/// lead into, and the tag of the walker.
pub(crate) struct GridGraph<'a, L: ?Sized> {
    origin: &'a GridPathfinding,
    lookup: &'a L,
    tag: Option<&'a Tag>,
}

impl<'a, L: GridLookup + ?Sized> GridGraph<'a, L> {
    pub(crate) fn new(origin: &'a GridPathfinding, lookup: &'a L, tag: Option<&'a Tag>) -> Self {
        Self {
            origin,
            lookup,
            tag,
        }
    }

    pub(crate) fn resolve(&self, id: GridId) -> Option<&'a GridPathfinding> {
        self.origin.exit_grid(self.lookup, id)
    }

    #[inline]
    pub(crate) fn tag(&self) -> Option<&'a Tag> {
        self.tag
    }

    /// One-step neighbors of `from` through adjacency or its switch, links
    /// excluded.
    fn push_neighbours(&self, grid: &GridPathfinding, from: Point, buf: &mut Vec<(NodeRef, i32)>) {
        let Some(kind) = grid.node(from) else {
            return;
        };
        match *kind {
            NodeKind::Plain => self.push_adjacent(grid, from, grid.layout(), buf),
            // Switches bridge on square adjacency only, even on hex maps.
            NodeKind::Switch { exit } => {
                self.push_adjacent(grid, from, GridLayout::Square, buf);
                if let Some(exit) = self.resolve(exit) {
                    self.push_adjacent(exit, from, GridLayout::Square, buf);
                }
            }
            NodeKind::DirectionalSwitch {
                entry,
                exit_point,
                exit,
            } => {
                self.push_candidate(grid, from, entry, buf);
                if let Some(exit) = self.resolve(exit) {
                    self.push_candidate(exit, from, exit_point, buf);
                }
            }
        }
    }

    fn push_adjacent(
        &self,
        grid: &GridPathfinding,
        from: Point,
        layout: GridLayout,
        buf: &mut Vec<(NodeRef, i32)>,
    ) {
        for to in layout.adjacent(from) {
            self.push_candidate(grid, from, to, buf);
        }
    }

    fn push_candidate(
        &self,
        grid: &GridPathfinding,
        from: Point,
        to: Point,
        buf: &mut Vec<(NodeRef, i32)>,
    ) {
        if to == from || !grid.has_point(to, self.tag) {
            return;
        }
        if grid.node(to).is_some_and(|kind| kind.is_valid_neighbour(from)) {
            buf.push((NodeRef::new(grid.id(), to), node_distance(from, to)));
        }
    }
}

impl<L: GridLookup + ?Sized> SearchGraph for GridGraph<'_, L> {
    type Node = NodeRef;

    #[inline]
    fn point(&self, node: NodeRef) -> Point {
        node.point
    }

    /// Adjacency (or the switch override) first, then links leaving the tile.
    fn successors(&self, node: NodeRef, buf: &mut Vec<(NodeRef, i32)>) {
        let Some(grid) = self.resolve(node.grid) else {
            return;
        };
        let from = node.point;
        self.push_neighbours(grid, from, buf);

        for link in grid.links_from(from) {
            if !grid.has_point(link.end, self.tag) {
                continue;
            }
            if grid.node(link.end).is_some_and(|kind| kind.is_valid_neighbour(from)) {
                buf.push((NodeRef::new(grid.id(), link.end), link.cost));
            }
        }
    }
}

impl GridPathfinding {
    /// Tiles directly reachable from `point` in one step, links excluded.
    ///
    /// Square grids yield up to four axis-aligned tiles, hex grids up to six
    /// with row-parity dependent offsets. Tiles blocked for `tag` are
    /// skipped. Switch tiles yield their override; exit grids other than this
    /// one are only visible through [`neighbours_in`](Self::neighbours_in).
    pub fn neighbours(&self, point: Point, tag: Option<&Tag>) -> Vec<Point> {
        self.neighbours_in(self, point, tag)
            .into_iter()
            .map(|n| n.point)
            .collect()
    }

    /// Like [`neighbours`](Self::neighbours), resolving switch exits through
    /// `lookup`.
    pub fn neighbours_in<L: GridLookup + ?Sized>(
        &self,
        lookup: &L,
        point: Point,
        tag: Option<&Tag>,
    ) -> Vec<NodeRef> {
        let graph = GridGraph::new(self, lookup, tag);
        let mut buf = Vec::with_capacity(6);
        graph.push_neighbours(self, point, &mut buf);
        buf.into_iter().map(|(n, _)| n).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Link;
    use std::collections::HashSet;
    use towngrid_core::Range;

    fn set(points: Vec<Point>) -> HashSet<Point> {
        points.into_iter().collect()
    }

    fn filled(layout: GridLayout, range: Range) -> GridPathfinding {
        let mut grid = GridPathfinding::new(layout);
        grid.add_all(range);
        grid
    }

    #[test]
    fn square_neighbours_skip_missing_and_blocked() {
        let mut grid = GridPathfinding::with_points([
            Point::new(1, 1),
            Point::new(0, 1),
            Point::new(2, 1),
            Point::new(1, 0),
        ]);
        assert_eq!(
            set(grid.neighbours(Point::new(1, 1), None)),
            set(vec![Point::new(0, 1), Point::new(2, 1), Point::new(1, 0)])
        );

        let cart = Tag::new("cart");
        grid.block_tags(&[Point::new(2, 1)], &[cart.clone()]);
        assert_eq!(grid.neighbours(Point::new(1, 1), Some(&cart)).len(), 2);
        assert_eq!(grid.neighbours(Point::new(1, 1), None).len(), 3);
    }

    #[test]
    fn hex_neighbours_follow_row_parity() {
        let grid = filled(GridLayout::Hex, Range::new(-2, -2, 8, 8));

        let even = set(grid.neighbours(Point::new(3, 0), None));
        assert_eq!(
            even,
            set(vec![
                Point::new(4, 0),
                Point::new(2, 1),
                Point::new(3, 1),
                Point::new(2, 0),
                Point::new(2, -1),
                Point::new(3, -1),
            ])
        );

        let odd = set(grid.neighbours(Point::new(3, 1), None));
        assert_eq!(
            odd,
            set(vec![
                Point::new(4, 1),
                Point::new(4, 2),
                Point::new(3, 2),
                Point::new(2, 1),
                Point::new(3, 0),
                Point::new(4, 0),
            ])
        );
        assert_ne!(even, odd);
    }

    #[test]
    fn hex_neighbours_are_symmetric() {
        let grid = filled(GridLayout::Hex, Range::new(0, 0, 6, 6));
        for a in Range::new(1, 1, 5, 5) {
            for b in grid.neighbours(a, None) {
                assert!(grid.neighbours(b, None).contains(&a), "{a} -> {b}");
            }
        }
    }

    #[test]
    fn omni_switch_yields_square_neighbours_of_both_grids() {
        let mut bridge = GridPathfinding::with_points([Point::new(1, 0), Point::new(1, 2)]);
        let mut road = GridPathfinding::with_points([Point::new(0, 1), Point::new(2, 1)]);
        road.add_switch(Point::new(1, 1), bridge.id());
        bridge.add(Point::new(5, 5));

        let grids = [&road, &bridge];
        let found: HashSet<NodeRef> = road
            .neighbours_in(&grids[..], Point::new(1, 1), None)
            .into_iter()
            .collect();
        assert_eq!(found.len(), 4);
        assert!(found.contains(&NodeRef::new(bridge.id(), Point::new(1, 0))));
        assert!(found.contains(&NodeRef::new(road.id(), Point::new(2, 1))));

        // Without the bridge grid in reach only the owning grid answers.
        assert_eq!(road.neighbours(Point::new(1, 1), None).len(), 2);
    }

    #[test]
    fn directional_switch_only_entered_from_entry() {
        let upper = GridPathfinding::with_points([Point::new(1, 2)]);
        let mut lower = GridPathfinding::with_points([Point::new(0, 1), Point::new(1, 0), Point::new(2, 1)]);
        lower.add_directional_switch(Point::new(0, 1), Point::new(1, 1), Point::new(1, 2), upper.id());

        assert!(lower.neighbours(Point::new(0, 1), None).contains(&Point::new(1, 1)));
        assert!(!lower.neighbours(Point::new(1, 0), None).contains(&Point::new(1, 1)));
        assert!(!lower.neighbours(Point::new(2, 1), None).contains(&Point::new(1, 1)));

        let grids = [&lower, &upper];
        let out = lower.neighbours_in(&grids[..], Point::new(1, 1), None);
        assert_eq!(
            out,
            vec![
                NodeRef::new(lower.id(), Point::new(0, 1)),
                NodeRef::new(upper.id(), Point::new(1, 2)),
            ]
        );
    }

    #[test]
    fn successors_list_links_after_adjacency() {
        let mut grid = GridPathfinding::with_points([Point::new(0, 0), Point::new(1, 0), Point::new(9, 9)]);
        grid.add_link(Link::new(Point::new(0, 0), Point::new(9, 9), 25));
        grid.add_link(Link::new(Point::new(0, 0), Point::new(7, 7), 3));

        let graph = GridGraph::new(&grid, &grid, None);
        let mut buf = Vec::new();
        graph.successors(NodeRef::new(grid.id(), Point::new(0, 0)), &mut buf);
        assert_eq!(
            buf,
            vec![
                (NodeRef::new(grid.id(), Point::new(1, 0)), 10),
                (NodeRef::new(grid.id(), Point::new(9, 9)), 25),
            ]
        );
    }
}
