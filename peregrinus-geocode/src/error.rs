use thiserror::Error;

/// Invalid geocoding query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeError {
    /// The query text is missing or blank.
    #[error("geocode query text is missing")]
    MissingQuery,

    /// The bounding box is not `[min_x, min_y, max_x, max_y]`.
    #[error("invalid bounding box: {0:?}")]
    InvalidBoundingBox(Vec<f64>),
}
