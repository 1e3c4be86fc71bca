use towngrid_core::GridLayout;

use crate::PathType;

/// Settings shared by every pathfinder of one city.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavigationConfig {
    /// Tile connectivity of the map.
    pub layout: GridLayout,
    /// What [`PathType::Any`] resolves to. `None` means [`PathType::Road`].
    pub default_path_type: Option<PathType>,
}

impl NavigationConfig {
    pub fn with_layout(mut self, layout: GridLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_default_path_type(mut self, path_type: PathType) -> Self {
        self.default_path_type = Some(path_type);
        self
    }
}
