use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A kind of road that can be built, identified by a stable key.
///
/// The key is what saves refer to; the name is for display only.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Road {
    key: String,
    name: String,
}

impl Road {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Road {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Every road kind a city knows, looked up by key when loading.
#[derive(Clone, Debug, Default)]
pub struct RoadSet {
    roads: HashMap<String, Road>,
}

impl RoadSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `road`, replacing any road with the same key.
    pub fn insert(&mut self, road: Road) -> Option<Road> {
        self.roads.insert(road.key.clone(), road)
    }

    pub fn get(&self, key: &str) -> Option<&Road> {
        self.roads.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.roads.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Road> {
        self.roads.values()
    }
}

impl FromIterator<Road> for RoadSet {
    fn from_iter<T: IntoIterator<Item = Road>>(iter: T) -> Self {
        let mut set = Self::new();
        for road in iter {
            set.insert(road);
        }
        set
    }
}
