//! Road networks for city builders.
//!
//! A [`RoadNetwork`] owns two grids over the same road tiles: the default
//! grid every walker uses and a blocked variant that leaves out tiles held by
//! road blockers. It checks placement through a [`StructureAvailability`],
//! forwards tile changes to a [`RoadVisuals`] hook and queues
//! [`PointsChanged`] notifications for dependents.
//!
//! Several networks (roads, rails, canals) live together in a
//! [`RoadNetworks`] container, which wires switches between them and hands
//! out pathfinders that cross those switches.
//!
//! ```
//! use towngrid_core::Point;
//! use towngrid_paths::{NavigationConfig, Pathfinder};
//! use towngrid_roads::{AlwaysAvailable, Road, RoadNetwork};
//!
//! let road = Road::new("dirt", "Dirt Road");
//! let mut network = RoadNetwork::new(road.clone(), &NavigationConfig::default());
//! let line: Vec<Point> = (0..4).map(|x| Point::new(x, 0)).collect();
//! network.add(&line, &road, &AlwaysAvailable);
//!
//! let path = network.find_path(&[Point::new(0, 0)], &[Point::new(3, 0)], None).unwrap();
//! assert_eq!(path.cost(), 30);
//! ```

mod availability;
mod error;
mod network;
mod networks;
mod persist;
mod road;
mod visuals;

pub use availability::{AlwaysAvailable, StructureAvailability};
pub use error::LoadError;
pub use network::{PointsChanged, RoadNetwork};
pub use networks::RoadNetworks;
pub use persist::{RoadGroupData, RoadNetworkData};
pub use road::{Road, RoadSet};
pub use visuals::{NoVisuals, RoadVisuals};
