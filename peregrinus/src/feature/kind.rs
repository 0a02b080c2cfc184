//! The closed set of feature variants and the geometry shape each of them requires.

use std::fmt::{Display, Formatter};

use geojson::{Geometry, Value};

use crate::feature::properties::{RteProperties, RtePtProperties, TrkProperties, WptProperties};
use crate::feature::{Feature, TypedFeature};

/// Variant of a feature, identified on the wire by the `_type` member of its properties.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    /// Waypoint.
    Wpt,
    /// Track.
    Trk,
    /// Route.
    Rte,
    /// Point of a calculated route.
    RtePt,
}

/// Geometry type a feature variant requires.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GeometryShape {
    /// GeoJSON `Point`.
    Point,
    /// GeoJSON `MultiLineString`.
    MultiLineString,
}

/// Discriminator table. This is the only place where variants are associated with their discriminator strings and
/// geometry shapes.
static VARIANTS: [(&str, FeatureKind, GeometryShape); 4] = [
    ("Wpt", FeatureKind::Wpt, GeometryShape::Point),
    ("Trk", FeatureKind::Trk, GeometryShape::MultiLineString),
    ("Rte", FeatureKind::Rte, GeometryShape::MultiLineString),
    ("RtePt", FeatureKind::RtePt, GeometryShape::Point),
];

impl FeatureKind {
    /// All variants in table order.
    pub fn all() -> impl Iterator<Item = FeatureKind> {
        VARIANTS.iter().map(|(_, kind, _)| *kind)
    }

    /// Looks up the variant of a properties `_type` discriminator. Matching is exact (case sensitive).
    pub fn from_discriminator(discriminator: &str) -> Option<Self> {
        VARIANTS
            .iter()
            .find(|(name, _, _)| *name == discriminator)
            .map(|(_, kind, _)| *kind)
    }

    /// The `_type` discriminator of the variant.
    pub fn discriminator(self) -> &'static str {
        self.entry().0
    }

    /// Geometry shape the variant requires when a geometry is present.
    pub fn required_shape(self) -> GeometryShape {
        self.entry().2
    }

    /// Returns true if a feature of this variant may carry the given geometry. Absent geometry is always accepted.
    pub fn accepts(self, geometry: Option<&Geometry>) -> bool {
        geometry.map_or(true, |geometry| {
            GeometryShape::of(geometry) == Some(self.required_shape())
        })
    }

    /// Zero value of the variant: default properties, no id, bounding box, geometry or unknown members.
    pub fn empty_feature(self) -> Feature {
        match self {
            FeatureKind::Wpt => Feature::Wpt(TypedFeature::new(WptProperties::default())),
            FeatureKind::Trk => Feature::Trk(TypedFeature::new(TrkProperties::default())),
            FeatureKind::Rte => Feature::Rte(TypedFeature::new(RteProperties::default())),
            FeatureKind::RtePt => Feature::RtePt(TypedFeature::new(RtePtProperties::default())),
        }
    }

    /// Returns true for the variants that describe a single location (`Wpt` and `RtePt`).
    pub fn is_point_like(self) -> bool {
        self.required_shape() == GeometryShape::Point
    }

    // Table rows are in declaration order of the enum.
    fn entry(self) -> &'static (&'static str, FeatureKind, GeometryShape) {
        &VARIANTS[self as usize]
    }
}

impl Display for FeatureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.discriminator())
    }
}

impl GeometryShape {
    /// Shape of the geometry, or `None` for geometry types no variant uses.
    pub fn of(geometry: &Geometry) -> Option<Self> {
        match geometry.value {
            Value::Point(_) => Some(GeometryShape::Point),
            Value::MultiLineString(_) => Some(GeometryShape::MultiLineString),
            _ => None,
        }
    }

    /// GeoJSON type name of the shape.
    pub fn type_name(self) -> &'static str {
        match self {
            GeometryShape::Point => "Point",
            GeometryShape::MultiLineString => "MultiLineString",
        }
    }
}

impl Display for GeometryShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// GeoJSON type name of any geometry value.
pub(crate) fn geometry_type_name(geometry: &Geometry) -> &'static str {
    match geometry.value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}
