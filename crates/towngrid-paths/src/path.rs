use towngrid_core::Point;

use crate::distance::node_distance;

/// A route found by a pathfinder: the tiles to walk, in order.
///
/// Never empty. "No path" is expressed as `None` by the pathfinders, not as
/// an empty route.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkingPath {
    points: Vec<Point>,
    cost: i32,
}

impl WalkingPath {
    /// Route over `points` with the search cost that produced it.
    ///
    /// # Panics
    ///
    /// Panics if `points` is empty.
    pub fn new(points: Vec<Point>, cost: i32) -> Self {
        assert!(!points.is_empty(), "a walking path needs at least one point");
        Self { points, cost }
    }

    /// Route that stays on `point`.
    pub fn single(point: Point) -> Self {
        Self {
            points: vec![point],
            cost: 0,
        }
    }

    /// Two-point route straight from `from` to `to`, ignoring everything in
    /// between.
    pub fn straight(from: Point, to: Point) -> Self {
        Self {
            points: vec![from, to],
            cost: node_distance(from, to),
        }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.points[0]
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Number of tiles on the route, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Total cost in fixed-point units (10 per axis-aligned step).
    #[inline]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    pub fn contains(&self, point: Point) -> bool {
        self.points.contains(&point)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// The same route walked backwards.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self {
            points,
            cost: self.cost,
        }
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl<'a> IntoIterator for &'a WalkingPath {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
