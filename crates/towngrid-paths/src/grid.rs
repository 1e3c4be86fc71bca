use std::collections::HashMap;

use towngrid_core::{GridLayout, Point};

use crate::node::{DanglingRef, GridId, NodeKind};
use crate::traits::GridLookup;
use crate::{Link, NavigationConfig, Tag};

/// A sparse set of traversable tiles for one logical network.
///
/// Holds the registered tiles (plain or switch nodes), outgoing weighted
/// links keyed by their start tile and, lazily, per-tile tag blocks. All
/// mutations are idempotent: adding a present tile or removing an absent one
/// is a no-op.
///
/// Removing a tile does not touch links or switches that reference it; see
/// [`dangling`](Self::dangling).
#[derive(Debug, Clone)]
pub struct GridPathfinding {
    id: GridId,
    layout: GridLayout,
    nodes: HashMap<Point, NodeKind>,
    links: HashMap<Point, Vec<Link>>,
    tag_blocks: Option<HashMap<Point, Vec<Tag>>>,
}

impl Default for GridPathfinding {
    fn default() -> Self {
        Self::new(GridLayout::default())
    }
}

impl GridPathfinding {
    /// Create an empty grid with a fresh id.
    pub fn new(layout: GridLayout) -> Self {
        Self {
            id: GridId::next(),
            layout,
            nodes: HashMap::new(),
            links: HashMap::new(),
            tag_blocks: None,
        }
    }

    /// Create an empty grid using the configured layout.
    pub fn from_config(config: &NavigationConfig) -> Self {
        Self::new(config.layout)
    }

    /// Create a square grid holding `points`.
    pub fn with_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut grid = Self::default();
        grid.add_all(points);
        grid
    }

    #[inline]
    pub fn id(&self) -> GridId {
        self.id
    }

    #[inline]
    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    // -----------------------------------------------------------------------
    // Point set
    // -----------------------------------------------------------------------

    /// Register `point`. Returns `true` if it was not present before.
    pub fn add(&mut self, point: Point) -> bool {
        if self.nodes.contains_key(&point) {
            return false;
        }
        self.nodes.insert(point, NodeKind::Plain);
        true
    }

    pub fn add_all(&mut self, points: impl IntoIterator<Item = Point>) {
        for p in points {
            self.add(p);
        }
    }

    /// Unregister `point` (plain or switch). Returns `true` if it was present.
    pub fn remove(&mut self, point: Point) -> bool {
        self.nodes.remove(&point).is_some()
    }

    pub fn remove_all(&mut self, points: impl IntoIterator<Item = Point>) {
        for p in points {
            self.remove(p);
        }
    }

    /// Drop every registered tile. Links and tag blocks are kept.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Whether `point` is registered, ignoring tag blocks.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        self.nodes.contains_key(&point)
    }

    /// Whether `point` is registered and not blocked for `tag`.
    #[inline]
    pub fn has_point(&self, point: Point, tag: Option<&Tag>) -> bool {
        self.nodes.contains_key(&point) && !self.is_blocked(point, tag)
    }

    /// Node registered at `point`, if any.
    #[inline]
    pub fn node(&self, point: Point) -> Option<&NodeKind> {
        self.nodes.get(&point)
    }

    /// All registered tiles, in no particular order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.nodes.keys().copied()
    }

    /// All registered tiles in row-major order.
    pub fn sorted_points(&self) -> Vec<Point> {
        let mut points: Vec<Point> = self.points().collect();
        points.sort_unstable();
        points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -----------------------------------------------------------------------
    // Tag blocking
    // -----------------------------------------------------------------------

    /// Whether `point` carries a block for `tag`. Never true without a tag.
    pub fn is_blocked(&self, point: Point, tag: Option<&Tag>) -> bool {
        let (Some(tag), Some(blocks)) = (tag, self.tag_blocks.as_ref()) else {
            return false;
        };
        blocks.get(&point).is_some_and(|tags| tags.contains(tag))
    }

    /// Block every point for every tag. Blocks stack: a tag blocked twice on
    /// the same point needs two unblocks.
    pub fn block_tags(&mut self, points: &[Point], tags: &[Tag]) {
        if points.is_empty() || tags.is_empty() {
            return;
        }
        let blocks = self.tag_blocks.get_or_insert_with(HashMap::new);
        for &p in points {
            blocks.entry(p).or_default().extend(tags.iter().cloned());
        }
        log::trace!("{}: blocked {} tiles for {:?}", self.id, points.len(), tags);
    }

    /// Remove one block per tag from every point.
    pub fn unblock_tags(&mut self, points: &[Point], tags: &[Tag]) {
        let Some(blocks) = self.tag_blocks.as_mut() else {
            return;
        };
        for p in points {
            let Some(list) = blocks.get_mut(p) else {
                continue;
            };
            for tag in tags {
                if let Some(i) = list.iter().position(|t| t == tag) {
                    list.swap_remove(i);
                }
            }
            if list.is_empty() {
                blocks.remove(p);
            }
        }
        if blocks.is_empty() {
            self.tag_blocks = None;
        }
    }

    /// Tags currently blocking `point`.
    pub fn blocking_tags(&self, point: Point) -> &[Tag] {
        self.tag_blocks
            .as_ref()
            .and_then(|blocks| blocks.get(&point))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Switches
    // -----------------------------------------------------------------------

    /// Register an omnidirectional switch at `point` leading into `exit`.
    ///
    /// Neighbors are the four axis-aligned tiles of `point` in both grids,
    /// whatever this grid's layout. No-op if `point` is already registered.
    pub fn add_switch(&mut self, point: Point, exit: GridId) -> bool {
        self.add_node(point, NodeKind::Switch { exit })
    }

    /// Register a one-way gate at `point`: entered only from `entry` in this
    /// grid, left only towards `exit_point` in `exit`.
    ///
    /// No-op if `point` is already registered.
    pub fn add_directional_switch(
        &mut self,
        entry: Point,
        point: Point,
        exit_point: Point,
        exit: GridId,
    ) -> bool {
        self.add_node(
            point,
            NodeKind::DirectionalSwitch {
                entry,
                exit_point,
                exit,
            },
        )
    }

    /// Register `point` as a node of `kind`. No-op if `point` is already
    /// registered.
    pub fn add_node(&mut self, point: Point, kind: NodeKind) -> bool {
        if self.nodes.contains_key(&point) {
            return false;
        }
        log::trace!("{}: {:?} at {}", self.id, kind, point);
        self.nodes.insert(point, kind);
        true
    }

    // -----------------------------------------------------------------------
    // Links
    // -----------------------------------------------------------------------

    /// Register a weighted link, and its reverse when bidirectional.
    /// Negative costs are clamped to zero.
    pub fn add_link(&mut self, link: Link) {
        if link.cost < 0 {
            log::warn!(
                "{}: link {} -> {} has negative cost {}",
                self.id,
                link.start,
                link.end,
                link.cost
            );
        }
        let link = Self::clamped(link);
        self.insert_link(link);
        if link.bidirectional {
            self.insert_link(link.reversed());
        }
    }

    /// Remove a link previously added with [`add_link`](Self::add_link),
    /// including its reverse entry when bidirectional.
    pub fn remove_link(&mut self, link: Link) {
        let link = Self::clamped(link);
        self.delete_link(link);
        if link.bidirectional {
            self.delete_link(link.reversed());
        }
    }

    /// Links leaving `point`.
    pub fn links_from(&self, point: Point) -> &[Link] {
        self.links
            .get(&point)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of stored link entries (a bidirectional link counts twice).
    pub fn link_count(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }

    fn clamped(link: Link) -> Link {
        Link {
            cost: link.cost.max(0),
            ..link
        }
    }

    fn insert_link(&mut self, link: Link) {
        let entries = self.links.entry(link.start).or_default();
        if !entries.contains(&link) {
            entries.push(link);
        }
    }

    fn delete_link(&mut self, link: Link) {
        let Some(entries) = self.links.get_mut(&link.start) else {
            return;
        };
        entries.retain(|l| *l != link);
        if entries.is_empty() {
            self.links.remove(&link.start);
        }
    }

    // -----------------------------------------------------------------------
    // Diagnostics
    // -----------------------------------------------------------------------

    /// Links and switches referencing tiles or grids that are gone.
    ///
    /// `lookup` resolves switch exit grids; pass `self` for a standalone grid.
    pub fn dangling<L: GridLookup + ?Sized>(&self, lookup: &L) -> Vec<DanglingRef> {
        let mut found = Vec::new();
        for link in self.links.values().flatten() {
            if !self.contains(link.end) {
                found.push(DanglingRef::LinkEnd {
                    start: link.start,
                    end: link.end,
                });
            }
        }
        for (&point, kind) in &self.nodes {
            match *kind {
                NodeKind::Plain => {}
                NodeKind::Switch { exit } => {
                    if self.exit_grid(lookup, exit).is_none() {
                        found.push(DanglingRef::SwitchGrid { point, exit });
                    }
                }
                NodeKind::DirectionalSwitch {
                    entry,
                    exit_point,
                    exit,
                } => {
                    if !self.contains(entry) {
                        found.push(DanglingRef::SwitchEntry { point, entry });
                    }
                    match self.exit_grid(lookup, exit) {
                        None => found.push(DanglingRef::SwitchGrid { point, exit }),
                        Some(grid) if !grid.contains(exit_point) => {
                            found.push(DanglingRef::SwitchExit { point, exit_point })
                        }
                        Some(_) => {}
                    }
                }
            }
        }
        found
    }

    /// Resolve `id`, answering for this grid itself even if `lookup` omits it.
    pub(crate) fn exit_grid<'a, L: GridLookup + ?Sized>(
        &'a self,
        lookup: &'a L,
        id: GridId,
    ) -> Option<&'a GridPathfinding> {
        if id == self.id {
            Some(self)
        } else {
            lookup.grid(id)
        }
    }
}
