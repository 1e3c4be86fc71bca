use towngrid_core::Point;

/// A weighted shortcut between two tiles, independent of adjacency.
///
/// Used for bridges, tunnels and other connections where walkers skip the
/// tiles in between. A bidirectional link is stored as two table entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link {
    pub start: Point,
    pub end: Point,
    pub cost: i32,
    pub bidirectional: bool,
}

impl Link {
    /// One-way link from `start` to `end`.
    pub const fn new(start: Point, end: Point, cost: i32) -> Self {
        Self {
            start,
            end,
            cost,
            bidirectional: false,
        }
    }

    /// Link usable in both directions.
    pub const fn bidirectional(start: Point, end: Point, cost: i32) -> Self {
        Self {
            start,
            end,
            cost,
            bidirectional: true,
        }
    }

    /// The table entry for the opposite direction of a bidirectional link.
    pub const fn reversed(self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            cost: self.cost,
            bidirectional: self.bidirectional,
        }
    }
}
