use towngrid_core::Point;

use crate::Road;

/// Tells a road network whether a tile is free to become road.
///
/// Implemented by whatever owns structure placement. Closures of the form
/// `Fn(Point, &Road) -> bool` implement it directly.
pub trait StructureAvailability {
    fn is_available(&self, point: Point, road: &Road) -> bool;
}

impl<F> StructureAvailability for F
where
    F: Fn(Point, &Road) -> bool,
{
    fn is_available(&self, point: Point, road: &Road) -> bool {
        self(point, road)
    }
}

/// Every tile is free.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysAvailable;

impl StructureAvailability for AlwaysAvailable {
    fn is_available(&self, _point: Point, _road: &Road) -> bool {
        true
    }
}
