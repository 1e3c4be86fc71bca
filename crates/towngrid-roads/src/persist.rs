use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use towngrid_core::Point;

use crate::{LoadError, PointsChanged, RoadNetwork, RoadSet, RoadVisuals};

/// Saved road tiles of one network, grouped by road kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadNetworkData {
    pub groups: Vec<RoadGroupData>,
}

/// Tiles built with the road of key `key`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadGroupData {
    pub key: String,
    pub points: Vec<Point>,
}

impl RoadNetworkData {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of saved tiles over all groups.
    pub fn point_count(&self) -> usize {
        self.groups.iter().map(|g| g.points.len()).sum()
    }
}

impl<V: RoadVisuals> RoadNetwork<V> {
    /// Snapshot of the road tiles. Switch nodes belong to whoever added
    /// them and are not saved.
    pub fn save(&self) -> RoadNetworkData {
        let points = self.road_points();
        let groups = self
            .visuals()
            .save_groups(&points)
            .unwrap_or_else(|| {
                vec![RoadGroupData {
                    key: self.road().key().to_owned(),
                    points,
                }]
            });
        RoadNetworkData { groups }
    }

    /// Replace every road tile with the ones in `data`.
    ///
    /// All group keys are resolved against `roads` before anything changes,
    /// so an unknown key leaves the network untouched. Blocks, tag blocks,
    /// links and switches are kept. One [`PointsChanged`] with the
    /// difference between the old and new tiles is queued.
    pub fn load(&mut self, data: &RoadNetworkData, roads: &RoadSet) -> Result<(), LoadError> {
        let mut resolved = Vec::with_capacity(data.groups.len());
        for group in &data.groups {
            let road = roads
                .get(&group.key)
                .ok_or_else(|| LoadError::UnknownRoad(group.key.clone()))?;
            resolved.push((road, &group.points));
        }

        let old = self.road_points();
        for &p in &old {
            self.visuals_mut().clear_point(p);
            self.erase(p);
        }
        for (road, points) in resolved {
            for &p in points {
                self.visuals_mut().set_point(p, road);
                self.insert(p);
            }
        }

        let new = self.road_points();
        let before: HashSet<Point> = old.iter().copied().collect();
        let after: HashSet<Point> = new.iter().copied().collect();
        let change = PointsChanged {
            added: new.into_iter().filter(|p| !before.contains(p)).collect(),
            removed: old.into_iter().filter(|p| !after.contains(p)).collect(),
        };
        log::debug!(
            "{}: loaded {} tiles in {} groups (+{} -{})",
            self.road().key(),
            data.point_count(),
            data.groups.len(),
            change.added.len(),
            change.removed.len()
        );
        self.notify(change);
        Ok(())
    }

    /// [`load`](Self::load) from JSON written by [`RoadNetworkData::to_json`].
    pub fn load_json(&mut self, json: &str, roads: &RoadSet) -> Result<(), LoadError> {
        let data = RoadNetworkData::from_json(json)?;
        self.load(&data, roads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visuals::RecordingVisuals;
    use crate::{AlwaysAvailable, Road};
    use towngrid_paths::{NavigationConfig, Pathfinder};

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn roads() -> RoadSet {
        [Road::new("dirt", "Dirt Road"), Road::new("paved", "Paved Road")]
            .into_iter()
            .collect()
    }

    fn network() -> RoadNetwork<RecordingVisuals> {
        RoadNetwork::with_visuals(
            Road::new("dirt", "Dirt Road"),
            &NavigationConfig::default(),
            RecordingVisuals::default(),
        )
    }

    #[test]
    fn plain_save_uses_network_road() {
        let mut network = RoadNetwork::new(Road::new("dirt", "Dirt Road"), &NavigationConfig::default());
        let road = network.road().clone();
        network.add(&[p(1, 1), p(0, 1), p(0, 0)], &road, &AlwaysAvailable);

        let data = network.save();
        assert_eq!(
            data.groups,
            vec![RoadGroupData {
                key: "dirt".into(),
                points: vec![p(0, 0), p(0, 1), p(1, 1)],
            }]
        );
    }

    #[test]
    fn visuals_split_save_into_stages() {
        let mut network = network();
        let roads = roads();
        network.add(&[p(0, 0), p(1, 0)], roads.get("dirt").unwrap(), &AlwaysAvailable);
        network.add(&[p(2, 0)], roads.get("paved").unwrap(), &AlwaysAvailable);

        let data = network.save();
        assert_eq!(data.groups.len(), 2);
        assert_eq!(data.groups[0].key, "dirt");
        assert_eq!(data.groups[1].points, vec![p(2, 0)]);
        assert_eq!(data.point_count(), 3);
    }

    #[test]
    fn load_replaces_tiles_and_reports_diff() {
        let roads = roads();
        let mut network = network();
        network.add(&[p(0, 0), p(1, 0), p(2, 0)], roads.get("dirt").unwrap(), &AlwaysAvailable);
        network.block(&[p(3, 0)]);
        network.take_changes();

        let data = RoadNetworkData {
            groups: vec![
                RoadGroupData {
                    key: "dirt".into(),
                    points: vec![p(1, 0), p(2, 0)],
                },
                RoadGroupData {
                    key: "paved".into(),
                    points: vec![p(3, 0)],
                },
            ],
        };
        network.load(&data, &roads).unwrap();

        assert!(!network.contains(p(0, 0)));
        assert!(network.contains(p(3, 0)));
        assert!(!network.blocked_grid().contains(p(3, 0)));
        assert_eq!(network.visuals().shown.get(&p(3, 0)).map(String::as_str), Some("paved"));
        assert_eq!(
            network.take_changes(),
            vec![PointsChanged {
                added: vec![p(3, 0)],
                removed: vec![p(0, 0)],
            }]
        );
        assert!(network.find_path(&[p(1, 0)], &[p(3, 0)], None).is_some());
    }

    #[test]
    fn load_of_same_tiles_is_silent() {
        let roads = roads();
        let mut network = network();
        network.add(&[p(0, 0), p(1, 0)], roads.get("dirt").unwrap(), &AlwaysAvailable);
        let data = network.save();
        network.take_changes();

        network.load(&data, &roads).unwrap();
        assert!(network.take_changes().is_empty());
        assert_eq!(network.len(), 2);
    }

    #[test]
    fn unknown_road_leaves_network_untouched() {
        let roads = roads();
        let mut network = network();
        network.add(&[p(0, 0)], roads.get("dirt").unwrap(), &AlwaysAvailable);
        network.take_changes();

        let data = RoadNetworkData {
            groups: vec![RoadGroupData {
                key: "canal".into(),
                points: vec![p(5, 5)],
            }],
        };
        let err = network.load(&data, &roads).unwrap_err();
        assert!(matches!(err, LoadError::UnknownRoad(ref key) if key == "canal"));
        assert_eq!(err.to_string(), "unknown road key \"canal\"");
        assert!(network.contains(p(0, 0)));
        assert!(!network.contains(p(5, 5)));
        assert!(network.take_changes().is_empty());
    }

    #[test]
    fn json_round_trip_and_malformed_input() {
        let roads = roads();
        let mut network = network();
        network.add(&[p(0, 0), p(0, 1)], roads.get("paved").unwrap(), &AlwaysAvailable);
        let json = network.save().to_json().unwrap();

        let mut restored = self::network();
        restored.load_json(&json, &roads).unwrap();
        assert_eq!(restored.save(), network.save());

        let err = restored.load_json("{\"groups\": 3}", &roads).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
        assert_eq!(restored.len(), 2);
    }
}
