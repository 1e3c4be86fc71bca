use thiserror::Error;

/// Why persisted road network data could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A saved group names a road the city does not know.
    #[error("unknown road key {0:?}")]
    UnknownRoad(String),

    #[error("malformed road network data: {0}")]
    Json(#[from] serde_json::Error),
}
