use towngrid_core::Point;

/// Cost of one axis-aligned step.
pub const STRAIGHT_COST: i32 = 10;

/// Cost of one diagonal step.
pub const DIAGONAL_COST: i32 = 14;

/// Octile distance in fixed-point integers: `14 * min + 10 * (max - min)`.
///
/// Serves both as the A\* heuristic and as the step cost between adjacent
/// tiles, so an axis-aligned step costs 10 and a diagonal hex step 14.
#[inline]
pub fn node_distance(a: Point, b: Point) -> i32 {
    let (dx, dy) = a.delta(b);
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    DIAGONAL_COST * lo + STRAIGHT_COST * (hi - lo)
}

/// Smallest [`node_distance`] from `from` to any of `targets`.
///
/// Zero when `targets` is empty.
#[inline]
pub(crate) fn nearest_distance(from: Point, targets: &[Point]) -> i32 {
    targets
        .iter()
        .map(|&t| node_distance(from, t))
        .min()
        .unwrap_or(0)
}
