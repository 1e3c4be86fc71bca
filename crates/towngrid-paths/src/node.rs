use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use towngrid_core::Point;

static NEXT_GRID_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique identifier of a [`GridPathfinding`](crate::GridPathfinding).
///
/// Switches name the grid they lead into by id; a
/// [`GridLookup`](crate::GridLookup) resolves ids back to grids while
/// searching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridId(u32);

impl GridId {
    pub(crate) fn next() -> Self {
        Self(NEXT_GRID_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grid#{}", self.0)
    }
}

/// What a registered tile is within its grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Ordinary tile; neighbors come from the grid layout.
    Plain,
    /// Bridges into `exit` at the same point. Reachable from and leading to
    /// the four axis-aligned neighbors in both grids.
    Switch { exit: GridId },
    /// One-way gate: only enterable from `entry` in the owning grid and only
    /// left towards `exit_point` in `exit` (or back to `entry`).
    DirectionalSwitch {
        entry: Point,
        exit_point: Point,
        exit: GridId,
    },
}

impl NodeKind {
    /// Whether a walker standing on `from` may step onto a node of this kind.
    #[inline]
    pub fn is_valid_neighbour(&self, from: Point) -> bool {
        match *self {
            NodeKind::DirectionalSwitch { entry, .. } => from == entry,
            _ => true,
        }
    }

    #[inline]
    pub fn is_switch(&self) -> bool {
        !matches!(self, NodeKind::Plain)
    }
}

/// A search-graph vertex: a point within one particular grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub grid: GridId,
    pub point: Point,
}

impl NodeRef {
    pub const fn new(grid: GridId, point: Point) -> Self {
        Self { grid, point }
    }
}

/// A link or switch that points at something no longer registered.
///
/// Removing a tile never cascades into links or switches referencing it;
/// [`GridPathfinding::dangling`](crate::GridPathfinding::dangling) reports
/// what was left behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DanglingRef {
    /// A link whose end tile is not in the grid.
    LinkEnd { start: Point, end: Point },
    /// A switch leading into a grid the lookup does not know.
    SwitchGrid { point: Point, exit: GridId },
    /// A directional switch whose entry tile is not in the owning grid.
    SwitchEntry { point: Point, entry: Point },
    /// A directional switch whose exit tile is not in the exit grid.
    SwitchExit { point: Point, exit_point: Point },
}
