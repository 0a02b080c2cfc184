//! Error types used by the crate.

use thiserror::Error;

use crate::feature::{FeatureKind, GeometryShape};

/// Failure to decode a GeoJSON feature.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// The top-level `type` member is not `"Feature"`.
    #[error("feature type must be \"Feature\", found {found}")]
    TypeMismatch {
        /// The offending value, rendered as JSON.
        found: String,
    },
    /// The `type` member appears more than once and the decoder is configured to reject that.
    #[error("duplicate \"type\" member")]
    DuplicateType,
    /// Properties are absent or carry no known `_type` discriminator.
    #[error("no matching feature variant for properties discriminator {discriminator:?}")]
    UnresolvableVariant {
        /// The discriminator found in the properties, if any.
        discriminator: Option<String>,
    },
    /// The properties discriminator is known, but the geometry has the wrong shape.
    #[error("no matching feature variant: {kind} requires {required} geometry, found {found}")]
    ShapeMismatch {
        /// Variant selected by the properties.
        kind: FeatureKind,
        /// Geometry shape the variant requires.
        required: GeometryShape,
        /// GeoJSON type of the geometry found.
        found: &'static str,
    },
    /// A member could not be decoded by its codec.
    #[error("malformed \"{key}\" member")]
    MalformedValue {
        /// Key of the member.
        key: String,
        /// The nested failure.
        #[source]
        source: MemberError,
    },
    /// The input is not valid JSON or not a JSON object.
    #[error("invalid feature JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl FeatureError {
    pub(crate) fn malformed(key: &str, source: impl Into<MemberError>) -> Self {
        Self::MalformedValue {
            key: key.to_string(),
            source: source.into(),
        }
    }
}

/// Nested failure of a single feature member.
#[derive(Debug, Error)]
pub enum MemberError {
    /// Geometry codec failure.
    #[error(transparent)]
    Geometry(#[from] geojson::Error),
    /// Properties codec failure.
    #[error(transparent)]
    Properties(#[from] PropertiesError),
    /// A bounding box entry is not a number.
    #[error("bounding box entry {index} is not a number: {value}")]
    NotANumber {
        /// Position of the entry.
        index: usize,
        /// The entry, rendered as JSON.
        value: String,
    },
    /// The member has a JSON kind the member does not allow.
    #[error("expected {expected}, found {found}")]
    UnexpectedKind {
        /// Allowed JSON kinds.
        expected: &'static str,
        /// JSON kind found.
        found: &'static str,
    },
}

/// Failure to decode a `properties` object.
#[derive(Debug, Error)]
pub enum PropertiesError {
    /// The object has no string `_type` member.
    #[error("properties have no \"_type\" discriminator")]
    MissingDiscriminator,
    /// The `_type` member names no known variant.
    #[error("unknown properties discriminator {0:?}")]
    UnknownDiscriminator(String),
    /// The members do not match the payload type of the variant.
    #[error("invalid properties: {0}")]
    Json(#[from] serde_json::Error),
}

/// Invalid route calculation request.
#[derive(Debug, Error, PartialEq)]
pub enum RteCalculationError {
    /// A route needs a start and a destination.
    #[error("route calculation needs at least 2 points, got {0}")]
    TooFewPoints(usize),
    /// A route point is not a waypoint or a route point.
    #[error("route point {index} is a {kind} feature")]
    NotAPoint {
        /// Position of the point in the request.
        index: usize,
        /// Variant of the feature.
        kind: FeatureKind,
    },
    /// A route point has no `Point` geometry.
    #[error("route point {index} has no point geometry")]
    MissingLocation {
        /// Position of the point in the request.
        index: usize,
    },
}
