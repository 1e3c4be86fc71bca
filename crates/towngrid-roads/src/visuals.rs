use towngrid_core::Point;

use crate::{Road, RoadGroupData};

/// Presentation side of a road network: tilemaps, decorations, stages.
///
/// Every method has a no-op default so implementors only override what they
/// draw.
pub trait RoadVisuals {
    /// `point` became road of kind `road`.
    fn set_point(&mut self, _point: Point, _road: &Road) {}

    /// `point` is no longer road.
    fn clear_point(&mut self, _point: Point) {}

    /// Whether `point` still shows road. A tile that does is kept on
    /// [`deregister`](crate::RoadNetwork::deregister).
    fn check_point(&self, _point: Point) -> bool {
        false
    }

    /// Per-stage grouping of `points` for saving. `None` saves every point
    /// under the network's own road.
    fn save_groups(&self, _points: &[Point]) -> Option<Vec<RoadGroupData>> {
        None
    }
}

/// Visuals hook that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoVisuals;

impl RoadVisuals for NoVisuals {}

/// Visuals that remember which road each tile shows.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingVisuals {
    pub(crate) shown: std::collections::BTreeMap<Point, String>,
    /// Tiles some other source of truth still holds.
    pub(crate) pinned: std::collections::HashSet<Point>,
}

#[cfg(test)]
impl RoadVisuals for RecordingVisuals {
    fn set_point(&mut self, point: Point, road: &Road) {
        self.shown.insert(point, road.key().to_owned());
    }

    fn clear_point(&mut self, point: Point) {
        self.shown.remove(&point);
    }

    fn check_point(&self, point: Point) -> bool {
        self.pinned.contains(&point)
    }

    fn save_groups(&self, points: &[Point]) -> Option<Vec<RoadGroupData>> {
        let mut groups: std::collections::BTreeMap<&str, Vec<Point>> = Default::default();
        for p in points {
            if let Some(key) = self.shown.get(p) {
                groups.entry(key.as_str()).or_default().push(*p);
            }
        }
        Some(
            groups
                .into_iter()
                .map(|(key, points)| RoadGroupData {
                    key: key.to_owned(),
                    points,
                })
                .collect(),
        )
    }
}
