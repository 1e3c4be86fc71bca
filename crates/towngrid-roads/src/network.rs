use std::collections::HashMap;
use std::collections::hash_map::Entry;

use towngrid_core::Point;
use towngrid_paths::{
    GridId, GridPathfinding, Link, NavigationConfig, NodeKind, PathType, Pathfinder, Pathfinders,
    Tag, WalkingPath,
};

use crate::{NoVisuals, Road, RoadVisuals, StructureAvailability};

/// Road tiles that appeared or disappeared in one network change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PointsChanged {
    pub added: Vec<Point>,
    pub removed: Vec<Point>,
}

impl PointsChanged {
    pub fn added(points: Vec<Point>) -> Self {
        Self {
            added: points,
            removed: Vec::new(),
        }
    }

    pub fn removed(points: Vec<Point>) -> Self {
        Self {
            added: Vec::new(),
            removed: points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// One road network: its tiles, the blocked variant and the links.
///
/// The default grid holds every road tile. The blocked grid holds the same
/// tiles minus those road blockers hold; blocking is counted, so a tile
/// blocked twice needs two unblocks. Links are kept in a table of their own
/// and mirrored into the default grid. Switches into other networks are
/// registered in both grids, the blocked one leading into the other
/// network's blocked grid.
///
/// Topology changes made through [`add`](Self::add), [`remove`](Self::remove),
/// [`register`](Self::register), [`deregister`](Self::deregister) and
/// loading are queued as [`PointsChanged`] and handed out by
/// [`take_changes`](Self::take_changes).
#[derive(Debug, Clone)]
pub struct RoadNetwork<V = NoVisuals> {
    road: Road,
    default: GridPathfinding,
    blocked: GridPathfinding,
    blocked_points: HashMap<Point, u32>,
    /// Node kind each switch tile takes in the blocked grid.
    blocked_switches: HashMap<Point, NodeKind>,
    links: Vec<Link>,
    visuals: V,
    changes: Vec<PointsChanged>,
}

impl RoadNetwork<NoVisuals> {
    /// Empty network of `road` that draws nothing.
    pub fn new(road: Road, config: &NavigationConfig) -> Self {
        Self::with_visuals(road, config, NoVisuals)
    }
}

impl<V: RoadVisuals> RoadNetwork<V> {
    pub fn with_visuals(road: Road, config: &NavigationConfig, visuals: V) -> Self {
        Self {
            road,
            default: GridPathfinding::from_config(config),
            blocked: GridPathfinding::from_config(config),
            blocked_points: HashMap::new(),
            blocked_switches: HashMap::new(),
            links: Vec::new(),
            visuals,
            changes: Vec::new(),
        }
    }

    /// The road this network is made of.
    pub fn road(&self) -> &Road {
        &self.road
    }

    pub fn default_grid(&self) -> &GridPathfinding {
        &self.default
    }

    pub fn blocked_grid(&self) -> &GridPathfinding {
        &self.blocked
    }

    pub fn visuals(&self) -> &V {
        &self.visuals
    }

    pub fn visuals_mut(&mut self) -> &mut V {
        &mut self.visuals
    }

    /// Whether `point` is road, blocked or not.
    pub fn contains(&self, point: Point) -> bool {
        self.default.contains(point)
    }

    /// Whether some road blocker holds `point`.
    pub fn is_blocked(&self, point: Point) -> bool {
        self.blocked_points.contains_key(&point)
    }

    pub fn len(&self) -> usize {
        self.default.len()
    }

    pub fn is_empty(&self) -> bool {
        self.default.is_empty()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    // -----------------------------------------------------------------------
    // Road tiles
    // -----------------------------------------------------------------------

    /// Build `road` on every tile of `points` that is not road yet and that
    /// `availability` allows. Returns the tiles actually added.
    pub fn add(
        &mut self,
        points: &[Point],
        road: &Road,
        availability: &impl StructureAvailability,
    ) -> Vec<Point> {
        let mut added = Vec::new();
        for &p in points {
            if self.default.contains(p) || !availability.is_available(p, road) {
                continue;
            }
            self.visuals.set_point(p, road);
            self.insert(p);
            added.push(p);
        }
        log::trace!(
            "{}: built {} of {} tiles",
            self.road.key(),
            added.len(),
            points.len()
        );
        self.notify(PointsChanged::added(added.clone()));
        added
    }

    /// Tear down the road on `points`. Returns the tiles actually removed.
    ///
    /// Links and switches ending on removed tiles are left in place.
    pub fn remove(&mut self, points: &[Point]) -> Vec<Point> {
        let mut removed = Vec::new();
        for &p in points {
            if !self.default.contains(p) {
                continue;
            }
            self.visuals.clear_point(p);
            self.erase(p);
            removed.push(p);
        }
        #[cfg(debug_assertions)]
        if !removed.is_empty() {
            self.warn_dangling();
        }
        self.notify(PointsChanged::removed(removed.clone()));
        removed
    }

    /// Add tiles another system already placed and drew, such as the road
    /// under a bridge end. Visuals and availability are not consulted.
    pub fn register(&mut self, points: &[Point]) -> Vec<Point> {
        let mut added = Vec::new();
        for &p in points {
            if !self.default.contains(p) {
                self.insert(p);
                added.push(p);
            }
        }
        self.notify(PointsChanged::added(added.clone()));
        added
    }

    /// Counterpart of [`register`](Self::register). Tiles the visuals still
    /// show as road (see [`RoadVisuals::check_point`]) are kept.
    pub fn deregister(&mut self, points: &[Point]) -> Vec<Point> {
        let mut removed = Vec::new();
        for &p in points {
            if self.default.contains(p) && !self.visuals.check_point(p) {
                self.erase(p);
                removed.push(p);
            }
        }
        self.notify(PointsChanged::removed(removed.clone()));
        removed
    }

    // -----------------------------------------------------------------------
    // Blocking
    // -----------------------------------------------------------------------

    /// Take `points` out of the blocked grid. Tiles that are not road yet are
    /// remembered and stay out of the blocked grid once built.
    pub fn block(&mut self, points: &[Point]) {
        for &p in points {
            *self.blocked_points.entry(p).or_default() += 1;
            self.blocked.remove(p);
        }
    }

    /// Undo one [`block`](Self::block) of each of `points`.
    pub fn unblock(&mut self, points: &[Point]) {
        for &p in points {
            let Entry::Occupied(mut entry) = self.blocked_points.entry(p) else {
                log::warn!("{}: unblocking {p}, which is not blocked", self.road.key());
                continue;
            };
            *entry.get_mut() -= 1;
            if *entry.get() == 0 {
                entry.remove();
                if self.default.contains(p) {
                    self.restore_blocked(p);
                }
            }
        }
    }

    /// Block `points` of the blocked grid for walkers carrying any of `tags`.
    pub fn block_tags(&mut self, points: &[Point], tags: &[Tag]) {
        self.blocked.block_tags(points, tags);
    }

    pub fn unblock_tags(&mut self, points: &[Point], tags: &[Tag]) {
        self.blocked.unblock_tags(points, tags);
    }

    // -----------------------------------------------------------------------
    // Links
    // -----------------------------------------------------------------------

    pub fn add_link(&mut self, link: Link) {
        if !self.links.contains(&link) {
            self.links.push(link);
        }
        self.default.add_link(link);
    }

    pub fn remove_link(&mut self, link: Link) {
        self.links.retain(|l| *l != link);
        self.default.remove_link(link);
    }

    // -----------------------------------------------------------------------
    // Switches
    // -----------------------------------------------------------------------

    /// Register a switch at `point` into another network whose default grid
    /// is `exit` and whose blocked grid is `blocked_exit`.
    ///
    /// While `point` is blocked only the default grid holds the switch; it
    /// returns to the blocked grid on unblock. No-op if `point` is already
    /// registered.
    pub fn add_switch(&mut self, point: Point, exit: GridId, blocked_exit: GridId) -> bool {
        self.add_switch_node(
            point,
            NodeKind::Switch { exit },
            NodeKind::Switch { exit: blocked_exit },
        )
    }

    /// One-way gate at `point`, entered from `entry` and left towards
    /// `exit_point` in the network whose grids are `exit` and
    /// `blocked_exit`.
    pub fn add_directional_switch(
        &mut self,
        entry: Point,
        point: Point,
        exit_point: Point,
        exit: GridId,
        blocked_exit: GridId,
    ) -> bool {
        self.add_switch_node(
            point,
            NodeKind::DirectionalSwitch {
                entry,
                exit_point,
                exit,
            },
            NodeKind::DirectionalSwitch {
                entry,
                exit_point,
                exit: blocked_exit,
            },
        )
    }

    /// Remove the switch at `point` from both grids. Plain road tiles are
    /// left alone.
    pub fn remove_switch(&mut self, point: Point) -> bool {
        if !self.default.node(point).is_some_and(NodeKind::is_switch) {
            return false;
        }
        self.erase(point);
        true
    }

    fn add_switch_node(&mut self, point: Point, kind: NodeKind, blocked_kind: NodeKind) -> bool {
        if !self.default.add_node(point, kind) {
            return false;
        }
        self.blocked_switches.insert(point, blocked_kind);
        if !self.blocked_points.contains_key(&point) {
            self.blocked.add_node(point, blocked_kind);
        }
        true
    }

    // -----------------------------------------------------------------------
    // Pathfinding and notification
    // -----------------------------------------------------------------------

    /// Serve [`PathType::Road`] and [`PathType::RoadBlocked`] from this
    /// network.
    pub fn register_pathfinders<'a>(&'a self, registry: &mut Pathfinders<'a>) {
        registry
            .register(PathType::Road, &self.default)
            .register(PathType::RoadBlocked, &self.blocked);
    }

    /// Drain the queued topology changes, oldest first.
    pub fn take_changes(&mut self) -> Vec<PointsChanged> {
        std::mem::take(&mut self.changes)
    }

    /// Plain road tiles in row-major order; switch nodes are left out.
    pub(crate) fn road_points(&self) -> Vec<Point> {
        self.default
            .sorted_points()
            .into_iter()
            .filter(|&p| self.default.node(p).is_some_and(|node| !node.is_switch()))
            .collect()
    }

    pub(crate) fn insert(&mut self, point: Point) {
        self.default.add(point);
        if !self.blocked_points.contains_key(&point) {
            self.restore_blocked(point);
        }
    }

    pub(crate) fn erase(&mut self, point: Point) {
        self.default.remove(point);
        self.blocked.remove(point);
        self.blocked_switches.remove(&point);
    }

    /// Put `point` back into the blocked grid as the same kind of node the
    /// default grid holds.
    fn restore_blocked(&mut self, point: Point) {
        let kind = self
            .blocked_switches
            .get(&point)
            .copied()
            .unwrap_or(NodeKind::Plain);
        self.blocked.add_node(point, kind);
    }

    pub(crate) fn notify(&mut self, change: PointsChanged) {
        if !change.is_empty() {
            self.changes.push(change);
        }
    }

    #[cfg(debug_assertions)]
    fn warn_dangling(&self) {
        use towngrid_paths::DanglingRef;

        for dangling in self.default.dangling(&self.default) {
            // Switch exits live in other networks and cannot be checked here.
            if !matches!(dangling, DanglingRef::SwitchGrid { .. }) {
                log::warn!("{}: dangling {:?}", self.road.key(), dangling);
            }
        }
    }
}

impl<V> Pathfinder for RoadNetwork<V> {
    fn has_point(&self, point: Point, tag: Option<&Tag>) -> bool {
        self.default.has_point(point, tag)
    }

    fn find_path(
        &self,
        starts: &[Point],
        targets: &[Point],
        tag: Option<&Tag>,
    ) -> Option<WalkingPath> {
        self.default.find_path(starts, targets, tag)
    }
}

/// Both grids hold the same tiles as the same kind of node, apart from
/// blocked tiles, which only the default grid holds.
#[cfg(test)]
pub(crate) fn assert_consistent<V: RoadVisuals>(network: &RoadNetwork<V>) {
    for p in network.default_grid().points() {
        assert!(
            network.blocked_grid().contains(p) || network.is_blocked(p),
            "{p} missing from the blocked grid"
        );
    }
    for p in network.blocked_grid().points() {
        let default = network.default_grid().node(p);
        let blocked = network.blocked_grid().node(p);
        assert!(default.is_some(), "{p} only in the blocked grid");
        assert!(!network.is_blocked(p), "{p} blocked but present");
        assert_eq!(
            default.map(NodeKind::is_switch),
            blocked.map(NodeKind::is_switch),
            "{p} differs in kind between the grids"
        );
    }
}
