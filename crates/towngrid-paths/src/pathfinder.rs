use std::collections::HashMap;
use std::fmt;

use towngrid_core::Point;

use crate::traits::{GridLookup, Pathfinder};
use crate::{GridPathfinding, NavigationConfig, Tag, WalkingPath};

/// Which network a walker or placement check moves on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathType {
    /// Roads, ignoring road blockers.
    Road,
    /// Roads minus the tiles road blockers hold.
    RoadBlocked,
    /// Every walkable map tile, searched on demand.
    Map,
    /// Every walkable map tile, kept as an explicit grid.
    MapGrid,
    /// No pathfinding: walk straight to the target.
    None,
    /// Whatever the city is configured to use by default.
    Any,
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ---------------------------------------------------------------------------
// StraightPathfinder
// ---------------------------------------------------------------------------

/// Pathfinder for [`PathType::None`]: every point exists and every route is
/// a straight two-point hop from the first start to the first target.
#[derive(Clone, Copy, Debug, Default)]
pub struct StraightPathfinder;

impl Pathfinder for StraightPathfinder {
    fn has_point(&self, _point: Point, _tag: Option<&Tag>) -> bool {
        true
    }

    fn find_path(
        &self,
        starts: &[Point],
        targets: &[Point],
        _tag: Option<&Tag>,
    ) -> Option<WalkingPath> {
        let (&from, &to) = (starts.first()?, targets.first()?);
        Some(WalkingPath::straight(from, to))
    }
}

// ---------------------------------------------------------------------------
// CrossGridPathfinder
// ---------------------------------------------------------------------------

/// A grid that follows its switches into the grids of `lookup`.
pub struct CrossGridPathfinder<'a, L: ?Sized> {
    origin: &'a GridPathfinding,
    lookup: &'a L,
}

impl<'a, L: GridLookup + ?Sized> CrossGridPathfinder<'a, L> {
    pub fn new(origin: &'a GridPathfinding, lookup: &'a L) -> Self {
        Self { origin, lookup }
    }

    pub fn origin(&self) -> &'a GridPathfinding {
        self.origin
    }
}

impl<L: GridLookup + ?Sized> Pathfinder for CrossGridPathfinder<'_, L> {
    fn has_point(&self, point: Point, tag: Option<&Tag>) -> bool {
        self.origin.has_point(point, tag)
    }

    fn find_path(
        &self,
        starts: &[Point],
        targets: &[Point],
        tag: Option<&Tag>,
    ) -> Option<WalkingPath> {
        self.origin.find_path_in(self.lookup, starts, targets, tag)
    }
}

// ---------------------------------------------------------------------------
// Pathfinders registry
// ---------------------------------------------------------------------------

/// Resolves a [`PathType`] to the pathfinder that serves it.
///
/// [`PathType::None`] always resolves to [`StraightPathfinder`].
/// [`PathType::Any`] resolves to the configured default, falling back to
/// [`PathType::Road`].
#[derive(Default)]
pub struct Pathfinders<'a> {
    entries: HashMap<PathType, &'a dyn Pathfinder>,
    default: Option<PathType>,
}

impl<'a> Pathfinders<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose `Any` default comes from `config`.
    pub fn from_config(config: &NavigationConfig) -> Self {
        Self {
            entries: HashMap::new(),
            default: config.default_path_type,
        }
    }

    /// Serve `path_type` with `pathfinder`, replacing any earlier entry.
    ///
    /// Registering `None` or `Any` has no effect; both are resolved by the
    /// registry itself.
    pub fn register(&mut self, path_type: PathType, pathfinder: &'a dyn Pathfinder) -> &mut Self {
        match path_type {
            PathType::None | PathType::Any => {
                log::warn!("ignoring pathfinder registered for {path_type}");
            }
            _ => {
                self.entries.insert(path_type, pathfinder);
            }
        }
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, path_type: PathType, pathfinder: &'a dyn Pathfinder) -> Self {
        self.register(path_type, pathfinder);
        self
    }

    /// Path type `Any` stands for.
    pub fn set_default(&mut self, path_type: Option<PathType>) {
        self.default = path_type;
    }

    /// The concrete path type `path_type` stands for.
    pub fn resolve(&self, path_type: PathType) -> PathType {
        match path_type {
            PathType::Any => match self.default {
                Some(default) if default != PathType::Any && self.serves(default) => default,
                _ => PathType::Road,
            },
            other => other,
        }
    }

    fn serves(&self, path_type: PathType) -> bool {
        path_type == PathType::None || self.entries.contains_key(&path_type)
    }

    /// Pathfinder for `path_type`, if one is registered.
    pub fn get(&self, path_type: PathType) -> Option<&'a dyn Pathfinder> {
        match self.resolve(path_type) {
            PathType::None => Some(&StraightPathfinder),
            resolved => self.entries.get(&resolved).copied(),
        }
    }

    /// Whether `point` exists for `path_type`. False when nothing serves it.
    pub fn has_point(&self, path_type: PathType, point: Point, tag: Option<&Tag>) -> bool {
        self.get(path_type)
            .is_some_and(|pf| pf.has_point(point, tag))
    }

    /// Path on `path_type`; `None` when nothing serves it or no path exists.
    pub fn find_path(
        &self,
        path_type: PathType,
        starts: &[Point],
        targets: &[Point],
        tag: Option<&Tag>,
    ) -> Option<WalkingPath> {
        let Some(pathfinder) = self.get(path_type) else {
            log::warn!("no pathfinder registered for {path_type}");
            return None;
        };
        pathfinder.find_path(starts, targets, tag)
    }
}
