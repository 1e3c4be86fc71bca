use std::collections::BTreeMap;

use towngrid_core::Point;
use towngrid_paths::{CrossGridPathfinder, DanglingRef, GridId, GridLookup, GridPathfinding};

use crate::{NoVisuals, RoadNetwork, RoadVisuals};

/// Road networks of one city, keyed by name.
///
/// Acts as the [`GridLookup`] for searches that cross switches: every
/// member's default and blocked grid can be entered through a switch and
/// may hold targets.
#[derive(Debug, Clone)]
pub struct RoadNetworks<V = NoVisuals> {
    networks: BTreeMap<String, RoadNetwork<V>>,
}

impl<V> Default for RoadNetworks<V> {
    fn default() -> Self {
        Self {
            networks: BTreeMap::new(),
        }
    }
}

impl<V: RoadVisuals> RoadNetworks<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `network` under `key`, returning the network it replaces.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        network: RoadNetwork<V>,
    ) -> Option<RoadNetwork<V>> {
        self.networks.insert(key.into(), network)
    }

    pub fn remove(&mut self, key: &str) -> Option<RoadNetwork<V>> {
        self.networks.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&RoadNetwork<V>> {
        self.networks.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut RoadNetwork<V>> {
        self.networks.get_mut(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RoadNetwork<V>)> {
        self.networks.iter().map(|(k, n)| (k.as_str(), n))
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// Default and blocked grid ids of network `key`.
    fn grid_ids(&self, key: &str) -> Option<(GridId, GridId)> {
        self.networks
            .get(key)
            .map(|n| (n.default_grid().id(), n.blocked_grid().id()))
    }

    /// Connect networks `a` and `b` at `point` in both directions.
    ///
    /// The switch is registered in both grids of both networks, each grid
    /// leading into the matching grid of the other network. Returns `false`
    /// if either network is missing or `point` is already registered in both.
    pub fn add_switch(&mut self, point: Point, a: &str, b: &str) -> bool {
        let (Some((a_exit, a_blocked)), Some((b_exit, b_blocked))) =
            (self.grid_ids(a), self.grid_ids(b))
        else {
            log::warn!("switch at {point}: unknown network {a:?} or {b:?}");
            return false;
        };
        let mut added = false;
        if let Some(network) = self.networks.get_mut(a) {
            added |= network.add_switch(point, b_exit, b_blocked);
        }
        if let Some(network) = self.networks.get_mut(b) {
            added |= network.add_switch(point, a_exit, a_blocked);
        }
        added
    }

    /// One-way connection from network `from` into network `to`: walkers
    /// step from `entry` onto `point` in `from` and leave towards
    /// `exit_point` in `to`.
    pub fn add_directional_switch(
        &mut self,
        from: &str,
        entry: Point,
        point: Point,
        exit_point: Point,
        to: &str,
    ) -> bool {
        let Some((exit, blocked_exit)) = self.grid_ids(to) else {
            log::warn!("directional switch at {point}: unknown network {to:?}");
            return false;
        };
        match self.networks.get_mut(from) {
            Some(network) => {
                network.add_directional_switch(entry, point, exit_point, exit, blocked_exit)
            }
            None => {
                log::warn!("directional switch at {point}: unknown network {from:?}");
                false
            }
        }
    }

    /// Remove whatever switch `network` holds at `point`.
    pub fn remove_switch(&mut self, network: &str, point: Point) -> bool {
        self.networks
            .get_mut(network)
            .is_some_and(|n| n.remove_switch(point))
    }

    /// Pathfinder over network `key` that follows its switches into the
    /// other networks.
    pub fn pathfinder(&self, key: &str) -> Option<CrossGridPathfinder<'_, Self>> {
        let network = self.networks.get(key)?;
        Some(CrossGridPathfinder::new(network.default_grid(), self))
    }

    /// Like [`pathfinder`](Self::pathfinder) over the blocked variants:
    /// starts in the blocked grid of `key` and crosses into the blocked
    /// grids of the other networks.
    pub fn blocked_pathfinder(&self, key: &str) -> Option<CrossGridPathfinder<'_, Self>> {
        let network = self.networks.get(key)?;
        Some(CrossGridPathfinder::new(network.blocked_grid(), self))
    }

    /// Dangling links and switches of every network, checked against all
    /// member grids.
    pub fn dangling(&self) -> Vec<(&str, DanglingRef)> {
        self.iter()
            .flat_map(|(key, network)| {
                network
                    .default_grid()
                    .dangling(self)
                    .into_iter()
                    .map(move |d| (key, d))
            })
            .collect()
    }
}

impl<V: RoadVisuals> GridLookup for RoadNetworks<V> {
    fn grid(&self, id: GridId) -> Option<&GridPathfinding> {
        self.grids().find(|g| g.id() == id)
    }

    fn grids(&self) -> impl Iterator<Item = &GridPathfinding> {
        self.networks
            .values()
            .flat_map(|n| [n.default_grid(), n.blocked_grid()])
    }
}
