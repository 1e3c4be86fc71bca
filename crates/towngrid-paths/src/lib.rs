//! Grid pathfinding for road networks and walkers.
//!
//! The central type is [`GridPathfinding`]: a sparse set of traversable
//! tiles with per-tag blocking, weighted shortcut [`Link`]s and switch nodes
//! that bridge into other grids. Paths are found with A\* from any of
//! several starts to any of several targets.
//!
//! Callers usually go through the [`Pathfinder`] contract and pick an
//! implementation by [`PathType`] from a [`Pathfinders`] registry:
//!
//! | Path type | Implementation |
//! |---|---|
//! | `Road` / `RoadBlocked` | a road network's [`GridPathfinding`] (or [`CrossGridPathfinder`]) |
//! | `Map` | [`MapPathfinder`], searching the whole map |
//! | `MapGrid` | [`MapGridPathfinder`], an explicit grid of walkable tiles |
//! | `None` | [`StraightPathfinder`] |
//!
//! Search state lives in per-search tables, so a grid is only borrowed
//! immutably while a path is being found.

mod astar;
mod config;
mod distance;
mod grid;
mod link;
mod map;
mod neighbors;
mod node;
mod path;
mod pathfinder;
mod search;
mod tag;
mod traits;

pub use astar::astar_path;
pub use config::NavigationConfig;
pub use distance::{node_distance, DIAGONAL_COST, STRAIGHT_COST};
pub use grid::GridPathfinding;
pub use link::Link;
pub use map::{MapDescriptor, MapGridPathfinder, MapPathfinder};
pub use node::{DanglingRef, GridId, NodeKind, NodeRef};
pub use path::WalkingPath;
pub use pathfinder::{CrossGridPathfinder, PathType, Pathfinders, StraightPathfinder};
pub use tag::Tag;
pub use traits::{GridLookup, Pathfinder, SearchGraph};
