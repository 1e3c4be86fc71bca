use std::hash::Hash;

use towngrid_core::Point;

use crate::{GridId, GridPathfinding, Tag, WalkingPath};

/// Graph interface the A\* engine runs on.
pub trait SearchGraph {
    /// Search vertex. Must map to a single tile.
    type Node: Copy + Eq + Hash;

    /// Tile of `node`, used for the heuristic and the resulting path.
    fn point(&self, node: Self::Node) -> Point;

    /// Append `(neighbor, step cost)` pairs of `node` into `buf`. The caller
    /// clears `buf` before calling. Costs must be >= 0.
    fn successors(&self, node: Self::Node, buf: &mut Vec<(Self::Node, i32)>);
}

/// Resolves grid ids while a search crosses switches.
pub trait GridLookup {
    fn grid(&self, id: GridId) -> Option<&GridPathfinding>;

    /// Every grid that may hold a target tile.
    fn grids(&self) -> impl Iterator<Item = &GridPathfinding>;
}

/// What building placement and walkers ask of a network.
pub trait Pathfinder {
    /// Whether `point` can be walked by a walker carrying `tag`.
    fn has_point(&self, point: Point, tag: Option<&Tag>) -> bool;

    /// Cheapest path from any of `starts` to any of `targets`, or `None` when
    /// no path exists. Points the network does not hold are ignored.
    fn find_path(
        &self,
        starts: &[Point],
        targets: &[Point],
        tag: Option<&Tag>,
    ) -> Option<WalkingPath>;
}

impl GridLookup for GridPathfinding {
    fn grid(&self, id: GridId) -> Option<&GridPathfinding> {
        (self.id() == id).then_some(self)
    }

    fn grids(&self) -> impl Iterator<Item = &GridPathfinding> {
        std::iter::once(self)
    }
}

impl GridLookup for [&GridPathfinding] {
    fn grid(&self, id: GridId) -> Option<&GridPathfinding> {
        self.iter().copied().find(|g| g.id() == id)
    }

    fn grids(&self) -> impl Iterator<Item = &GridPathfinding> {
        self.iter().map(|g| &**g)
    }
}
