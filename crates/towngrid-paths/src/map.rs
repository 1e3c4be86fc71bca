//! Pathfinders over the whole map rather than a road network.

use towngrid_core::{GridLayout, Point, Range};

use crate::astar;
use crate::distance::node_distance;
use crate::traits::{Pathfinder, SearchGraph};
use crate::{GridPathfinding, Tag, WalkingPath};

/// What the pathfinding layer needs to know about the map.
pub trait MapDescriptor {
    /// Tiles that exist at all.
    fn bounds(&self) -> Range;

    fn layout(&self) -> GridLayout;

    /// Whether walkers may cross `point` (no water, no blocking structure).
    /// Only asked for points inside [`bounds`](Self::bounds).
    fn is_walkable(&self, point: Point) -> bool;
}

// ---------------------------------------------------------------------------
// MapPathfinder
// ---------------------------------------------------------------------------

/// Searches every walkable tile of the map on demand.
///
/// Nothing is cached, so long searches on big maps are slow; prefer
/// [`MapGridPathfinder`] when the walkable set changes rarely. Tags are
/// ignored.
pub struct MapPathfinder<M> {
    map: M,
}

impl<M: MapDescriptor> MapPathfinder<M> {
    pub fn new(map: M) -> Self {
        Self { map }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    fn walkable(&self, point: Point) -> bool {
        self.map.bounds().contains(point) && self.map.is_walkable(point)
    }
}

impl<M: MapDescriptor> SearchGraph for MapPathfinder<M> {
    type Node = Point;

    fn point(&self, node: Point) -> Point {
        node
    }

    fn successors(&self, node: Point, buf: &mut Vec<(Point, i32)>) {
        for next in self.map.layout().adjacent(node) {
            if self.walkable(next) {
                buf.push((next, node_distance(node, next)));
            }
        }
    }
}

impl<M: MapDescriptor> Pathfinder for MapPathfinder<M> {
    fn has_point(&self, point: Point, _tag: Option<&Tag>) -> bool {
        self.walkable(point)
    }

    fn find_path(
        &self,
        starts: &[Point],
        targets: &[Point],
        _tag: Option<&Tag>,
    ) -> Option<WalkingPath> {
        let starts: Vec<Point> = starts.iter().copied().filter(|&p| self.walkable(p)).collect();
        let targets: Vec<Point> = targets.iter().copied().filter(|&p| self.walkable(p)).collect();
        astar::astar_path(self, &starts, &targets)
    }
}

// ---------------------------------------------------------------------------
// MapGridPathfinder
// ---------------------------------------------------------------------------

/// Keeps the walkable tiles of the map as an explicit [`GridPathfinding`].
///
/// Built once from the map, then kept current by calling
/// [`refresh`](Self::refresh) with the tiles a structure change touched.
#[derive(Debug, Clone)]
pub struct MapGridPathfinder {
    grid: GridPathfinding,
}

impl MapGridPathfinder {
    pub fn new(map: &impl MapDescriptor) -> Self {
        let mut this = Self {
            grid: GridPathfinding::new(map.layout()),
        };
        this.rebuild(map);
        this
    }

    /// Re-read every tile of the map.
    pub fn rebuild(&mut self, map: &impl MapDescriptor) {
        self.grid.clear();
        let bounds = map.bounds();
        self.grid.add_all(bounds.iter().filter(|&p| map.is_walkable(p)));
        log::debug!("map grid rebuilt: {} of {} tiles walkable", self.grid.len(), bounds.len());
    }

    /// Re-read `points` only.
    pub fn refresh(&mut self, map: &impl MapDescriptor, points: &[Point]) {
        let bounds = map.bounds();
        for &p in points {
            if bounds.contains(p) && map.is_walkable(p) {
                self.grid.add(p);
            } else {
                self.grid.remove(p);
            }
        }
    }

    /// Re-read every tile of `area` that lies on the map, such as the
    /// footprint of a building that was placed or torn down.
    pub fn refresh_area(&mut self, map: &impl MapDescriptor, area: Range) {
        let area = map.bounds().intersect(area);
        for p in area {
            if map.is_walkable(p) {
                self.grid.add(p);
            } else {
                self.grid.remove(p);
            }
        }
    }

    pub fn grid(&self) -> &GridPathfinding {
        &self.grid
    }

    /// The underlying grid, for tag blocks and links.
    pub fn grid_mut(&mut self) -> &mut GridPathfinding {
        &mut self.grid
    }
}

impl Pathfinder for MapGridPathfinder {
    fn has_point(&self, point: Point, tag: Option<&Tag>) -> bool {
        self.grid.has_point(point, tag)
    }

    fn find_path(
        &self,
        starts: &[Point],
        targets: &[Point],
        tag: Option<&Tag>,
    ) -> Option<WalkingPath> {
        self.grid.find_path(starts, targets, tag)
    }
}
