//! Tile connectivity of a map.

use crate::Point;

/// Axis-aligned neighbors on a square grid, enumerated x-major.
const SQUARE: [Point; 4] = [
    Point::new(-1, 0),
    Point::new(0, -1),
    Point::new(0, 1),
    Point::new(1, 0),
];

/// Hex neighbors of a point on an even row (offset coordinates).
const HEX_EVEN: [Point; 6] = [
    Point::new(1, 0),
    Point::new(-1, 1),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(-1, -1),
    Point::new(0, -1),
];

/// Hex neighbors of a point on an odd row (offset coordinates).
const HEX_ODD: [Point; 6] = [
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(0, -1),
    Point::new(1, -1),
];

/// How tiles connect to each other.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridLayout {
    /// Four-directional square tiles.
    #[default]
    Square,
    /// Six-directional hex tiles in offset coordinates; odd rows are pushed
    /// half a tile to the right.
    Hex,
}

impl GridLayout {
    /// Neighbor offsets of `p`. Hex offsets depend on the row parity of `p`.
    #[inline]
    pub fn offsets(self, p: Point) -> &'static [Point] {
        match self {
            GridLayout::Square => &SQUARE,
            GridLayout::Hex if p.is_even_row() => &HEX_EVEN,
            GridLayout::Hex => &HEX_ODD,
        }
    }

    /// Iterate over the points adjacent to `p`.
    pub fn adjacent(self, p: Point) -> impl Iterator<Item = Point> {
        self.offsets(p)
            .iter()
            .filter(|d| **d != Point::ZERO)
            .map(move |d| p + *d)
    }

    #[inline]
    pub fn is_hex(self) -> bool {
        self == GridLayout::Hex
    }
}
