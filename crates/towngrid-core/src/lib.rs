//! **towngrid-core** — geometry shared by the *towngrid* crates.
//!
//! Provides the integer [`Point`] used as a key throughout the pathfinding
//! and road-network layers, the half-open [`Range`] used for map bounds and
//! the [`GridLayout`] that decides how tiles connect.

pub mod geom;
pub mod layout;

pub use geom::{Point, Range, RangeIter};
pub use layout::GridLayout;
