use towngrid_core::Point;

use crate::astar;
use crate::neighbors::GridGraph;
use crate::node::NodeRef;
use crate::traits::{GridLookup, Pathfinder};
use crate::{GridPathfinding, Tag, WalkingPath};

impl GridPathfinding {
    /// Cheapest path from any of `starts` to any of `targets` within this
    /// grid. Switches leading into other grids are not followed; use
    /// [`find_path_in`](Self::find_path_in) for that.
    pub fn find_path(
        &self,
        starts: &[Point],
        targets: &[Point],
        tag: Option<&Tag>,
    ) -> Option<WalkingPath> {
        self.find_path_in(self, starts, targets, tag)
    }

    /// Cheapest path starting in this grid, following switches into the
    /// grids `lookup` knows about.
    ///
    /// Starts are resolved in this grid, targets in every grid of `lookup`
    /// (and this one). Points no grid holds are dropped.
    pub fn find_path_in<L: GridLookup + ?Sized>(
        &self,
        lookup: &L,
        starts: &[Point],
        targets: &[Point],
        tag: Option<&Tag>,
    ) -> Option<WalkingPath> {
        let start_nodes: Vec<NodeRef> = starts
            .iter()
            .filter(|&&p| self.contains(p))
            .map(|&p| NodeRef::new(self.id(), p))
            .collect();

        let mut target_nodes: Vec<NodeRef> = targets
            .iter()
            .filter(|&&p| self.contains(p))
            .map(|&p| NodeRef::new(self.id(), p))
            .collect();
        let resolved_here = target_nodes.len();
        for grid in lookup.grids().filter(|g| g.id() != self.id()) {
            target_nodes.extend(
                targets
                    .iter()
                    .filter(|&&p| grid.contains(p))
                    .map(|&p| NodeRef::new(grid.id(), p)),
            );
        }

        let dropped_starts = starts.len() - start_nodes.len();
        let dropped_targets = targets
            .iter()
            .filter(|&&p| !target_nodes.iter().any(|n| n.point == p))
            .count();
        if dropped_starts > 0 || dropped_targets > 0 {
            log::debug!(
                "{}: dropped {} unregistered starts and {} targets",
                self.id(),
                dropped_starts,
                dropped_targets
            );
        }

        let graph = GridGraph::new(self, lookup, tag);
        let path = astar::astar_path(&graph, &start_nodes, &target_nodes);
        match &path {
            Some(path) => log::debug!(
                "{}: path of {} tiles, cost {} (tag {:?})",
                self.id(),
                path.len(),
                path.cost(),
                graph.tag()
            ),
            None => log::debug!(
                "{}: no path from {} starts to {} targets ({} in origin grid)",
                self.id(),
                start_nodes.len(),
                target_nodes.len(),
                resolved_here
            ),
        }
        path
    }
}

impl Pathfinder for GridPathfinding {
    fn has_point(&self, point: Point, tag: Option<&Tag>) -> bool {
        GridPathfinding::has_point(self, point, tag)
    }

    fn find_path(
        &self,
        starts: &[Point],
        targets: &[Point],
        tag: Option<&Tag>,
    ) -> Option<WalkingPath> {
        GridPathfinding::find_path(self, starts, targets, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Link;
    use towngrid_core::{GridLayout, Range};

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn line() -> GridPathfinding {
        GridPathfinding::with_points([p(0, 0), p(1, 0), p(2, 0), p(3, 0)])
    }

    #[test]
    fn straight_line_costs_ten_per_step() {
        let grid = line();
        let path = grid.find_path(&[p(0, 0)], &[p(3, 0)], None).unwrap();
        assert_eq!(path.points(), &[p(0, 0), p(1, 0), p(2, 0), p(3, 0)]);
        assert_eq!(path.cost(), 30);
    }

    #[test]
    fn gap_in_line_means_no_path() {
        let mut grid = line();
        grid.remove(p(2, 0));
        assert!(grid.find_path(&[p(0, 0)], &[p(3, 0)], None).is_none());
    }

    #[test]
    fn one_way_link_is_not_reversed() {
        let mut grid = line();
        grid.add_link(Link::new(p(0, 0), p(3, 0), 5));

        let there = grid.find_path(&[p(0, 0)], &[p(3, 0)], None).unwrap();
        assert_eq!(there.points(), &[p(0, 0), p(3, 0)]);
        assert_eq!(there.cost(), 5);

        let back = grid.find_path(&[p(3, 0)], &[p(0, 0)], None).unwrap();
        assert_eq!(back.len(), 4);
        assert_eq!(back.cost(), 30);
    }

    #[test]
    fn bidirectional_link_is_symmetric_and_removable() {
        let mut grid = GridPathfinding::with_points([p(0, 0), p(9, 0)]);
        let link = Link::bidirectional(p(0, 0), p(9, 0), 12);
        grid.add_link(link);

        let there = grid.find_path(&[p(0, 0)], &[p(9, 0)], None).unwrap();
        let back = grid.find_path(&[p(9, 0)], &[p(0, 0)], None).unwrap();
        assert_eq!(there.cost(), 12);
        assert!(back.cost() <= there.cost());

        grid.remove_link(link);
        assert!(grid.find_path(&[p(0, 0)], &[p(9, 0)], None).is_none());
        assert!(grid.find_path(&[p(9, 0)], &[p(0, 0)], None).is_none());
    }

    #[test]
    fn trivial_and_unregistered_requests() {
        let grid = line();
        let path = grid.find_path(&[p(2, 0)], &[p(2, 0)], None).unwrap();
        assert_eq!(path.points(), &[p(2, 0)]);

        assert!(grid.find_path(&[p(7, 7)], &[p(3, 0)], None).is_none());
        assert!(grid.find_path(&[p(0, 0)], &[p(7, 7)], None).is_none());
        let path = grid.find_path(&[p(7, 7), p(0, 0)], &[p(7, 8), p(1, 0)], None);
        assert_eq!(path.unwrap().points(), &[p(0, 0), p(1, 0)]);
    }

    #[test]
    fn disconnected_single_point_grids_have_no_path() {
        let a = GridPathfinding::with_points([p(0, 0)]);
        let b = GridPathfinding::with_points([p(5, 5)]);
        assert!(a.find_path(&[p(0, 0)], &[p(5, 5)], None).is_none());
        assert!(a.find_path_in(&[&a, &b][..], &[p(0, 0)], &[p(5, 5)], None).is_none());
    }

    #[test]
    fn tag_block_forces_detour_for_that_tag_only() {
        let mut grid = GridPathfinding::default();
        grid.add_all(Range::new(0, 0, 3, 2));
        let cart = Tag::new("cart");
        grid.block_tags(&[p(1, 0)], &[cart.clone()]);

        let free = grid.find_path(&[p(0, 0)], &[p(2, 0)], None).unwrap();
        assert_eq!(free.cost(), 20);

        let detour = grid.find_path(&[p(0, 0)], &[p(2, 0)], Some(&cart)).unwrap();
        assert_eq!(detour.cost(), 40);
        assert!(!detour.contains(p(1, 0)));
    }

    #[test]
    fn hex_grid_walks_diagonal_rows() {
        let mut grid = GridPathfinding::new(GridLayout::Hex);
        // (0,0) -> (0,1) -> (1,2) runs down a hex diagonal.
        grid.add_all([p(0, 0), p(0, 1), p(1, 2)]);
        let path = grid.find_path(&[p(0, 0)], &[p(1, 2)], None).unwrap();
        assert_eq!(path.points(), &[p(0, 0), p(0, 1), p(1, 2)]);
        assert_eq!(path.cost(), 10 + 14);
    }

    #[test]
    fn omni_switch_crosses_into_other_grid() {
        let mut road = GridPathfinding::with_points([p(0, 0)]);
        let mut rail = GridPathfinding::with_points([p(2, 0), p(3, 0)]);
        road.add_switch(p(1, 0), rail.id());
        rail.add_switch(p(1, 0), road.id());

        let grids = [&road, &rail];
        let there = road
            .find_path_in(&grids[..], &[p(0, 0)], &[p(3, 0)], None)
            .unwrap();
        assert_eq!(there.points(), &[p(0, 0), p(1, 0), p(2, 0), p(3, 0)]);

        let back = rail
            .find_path_in(&grids[..], &[p(3, 0)], &[p(0, 0)], None)
            .unwrap();
        assert_eq!(back.points(), &[p(3, 0), p(2, 0), p(1, 0), p(0, 0)]);

        // Standalone the road grid cannot see past the switch.
        assert!(road.find_path(&[p(0, 0)], &[p(3, 0)], None).is_none());
    }

    #[test]
    fn directional_switch_is_a_one_way_gate() {
        // Lower road runs along y = 1; the ramp at (2,1) is entered from
        // (1,1) and lets out onto the upper road at (2,0).
        let mut upper = GridPathfinding::with_points([p(2, 0), p(3, 0)]);
        let mut lower = GridPathfinding::with_points([p(0, 1), p(1, 1), p(3, 1), p(2, 2)]);
        lower.add_directional_switch(p(1, 1), p(2, 1), p(2, 0), upper.id());
        upper.add(p(4, 0));

        let grids = [&lower, &upper];
        let up = lower
            .find_path_in(&grids[..], &[p(0, 1)], &[p(4, 0)], None)
            .unwrap();
        assert_eq!(up.points(), &[p(0, 1), p(1, 1), p(2, 1), p(2, 0), p(3, 0), p(4, 0)]);

        // Approaching the ramp from the other side or from below fails.
        assert!(lower.find_path_in(&grids[..], &[p(3, 1)], &[p(4, 0)], None).is_none());
        assert!(lower.find_path_in(&grids[..], &[p(2, 2)], &[p(4, 0)], None).is_none());

        // The gate does not let walkers through along the lower road either.
        assert!(lower.find_path_in(&grids[..], &[p(1, 1)], &[p(3, 1)], None).is_none());
    }

    #[test]
    fn directional_switch_routes_around_when_entry_is_reachable() {
        let mut upper = GridPathfinding::with_points([p(2, 0)]);
        let mut lower = GridPathfinding::default();
        lower.add_all([p(3, 1), p(3, 2), p(2, 2), p(1, 2), p(1, 1)]);
        lower.add_directional_switch(p(1, 1), p(2, 1), p(2, 0), upper.id());
        upper.add(p(2, -1));

        let grids = [&lower, &upper];
        let path = lower
            .find_path_in(&grids[..], &[p(3, 1)], &[p(2, -1)], None)
            .unwrap();
        assert_eq!(
            path.points(),
            &[p(3, 1), p(3, 2), p(2, 2), p(1, 2), p(1, 1), p(2, 1), p(2, 0), p(2, -1)]
        );
    }

    #[test]
    fn pathfinder_contract_matches_inherent_methods() {
        let grid = line();
        let pf: &dyn Pathfinder = &grid;
        assert!(pf.has_point(p(1, 0), None));
        assert!(!pf.has_point(p(1, 1), None));
        assert_eq!(pf.find_path(&[p(0, 0)], &[p(3, 0)], None).unwrap().cost(), 30);
    }
}
