//! GeoJSON features of the four variants: waypoints, tracks, routes and route points.
//!
//! A [`Feature`] is always coherent in one respect: its variant and its properties type agree, because every enum
//! variant wraps a [`TypedFeature`] over the matching properties type. Whether the geometry has the shape the
//! variant requires is checked by the decoder and the [normalizer](crate::normalize), but not enforced for features
//! built by hand.
//!
//! Code that produces features without knowing their variant builds a [`GenericFeature`] instead and converts it with
//! [`Feature::try_from`], which applies the same checks as the decoder.

use geojson::{Bbox, Geometry};
use peregrinus_types::AccessControlList;

use crate::error::FeatureError;

mod decode;
mod encode;
pub mod kind;
pub mod properties;

pub use decode::{DecodeOptions, DuplicateTypePolicy, FeatureDecoder};
pub use kind::{FeatureKind, GeometryShape};
pub use properties::{
    CommonProperties, FeatureProperties, PointProperties, RteProperties, RtePtProperties,
    TrkProperties, VariantProperties, WptProperties,
};

/// JSON object with members in insertion order.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Top-level members the codec interprets itself. Everything else is an unknown member.
pub(crate) const RESERVED_MEMBERS: [&str; 5] = ["type", "id", "bbox", "geometry", "properties"];

/// Feature of one variant.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedFeature<P> {
    /// Feature id.
    pub id: Option<String>,
    /// Bounding box: `[min_x, min_y, max_x, max_y]` or `[min_x, min_y, min_z, max_x, max_y, max_z]`.
    pub bbox: Option<Bbox>,
    /// Geometry. GeoJSON allows features without geometry.
    pub geometry: Option<Geometry>,
    /// Variant properties.
    pub properties: P,
    /// Top-level members the model does not know. They are kept as they are and written back on encoding.
    pub unknown_members: JsonObject,
}

/// Waypoint.
pub type Wpt = TypedFeature<WptProperties>;
/// Track.
pub type Trk = TypedFeature<TrkProperties>;
/// Route.
pub type Rte = TypedFeature<RteProperties>;
/// Route point.
pub type RtePt = TypedFeature<RtePtProperties>;

impl<P> TypedFeature<P> {
    /// Creates a feature with the given properties and nothing else.
    pub fn new(properties: P) -> Self {
        Self {
            id: None,
            bbox: None,
            geometry: None,
            properties,
            unknown_members: JsonObject::new(),
        }
    }

    /// Sets the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the geometry.
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Sets the bounding box.
    pub fn with_bbox(mut self, bbox: Bbox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Adds an unknown member. Keys of the GeoJSON feature members (`type`, `id`, `bbox`, `geometry`,
    /// `properties`) are ignored: those members are set through the fields of the feature.
    pub fn with_unknown_member(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        let key = key.into();
        if RESERVED_MEMBERS.contains(&key.as_str()) {
            log::warn!("unknown member {key:?} ignored, the key belongs to a feature member");
            return self;
        }
        self.unknown_members.insert(key, value.into());
        self
    }
}

impl<P: VariantProperties> TypedFeature<P> {
    /// Variant of the feature.
    pub fn kind(&self) -> FeatureKind {
        P::KIND
    }

    /// Returns true if the geometry is absent or has the shape the variant requires.
    pub fn has_valid_shape(&self) -> bool {
        P::KIND.accepts(self.geometry.as_ref())
    }
}

impl<P: VariantProperties> From<TypedFeature<P>> for Feature {
    fn from(value: TypedFeature<P>) -> Self {
        P::into_feature(value)
    }
}

impl<P: VariantProperties> TryFrom<Feature> for TypedFeature<P> {
    type Error = Feature;

    fn try_from(value: Feature) -> Result<Self, Self::Error> {
        P::from_feature(value)
    }
}

/// Feature of any variant.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Feature {
    Wpt(Wpt),
    Trk(Trk),
    Rte(Rte),
    RtePt(RtePt),
}

macro_rules! each_variant {
    ($feature:expr, $inner:ident => $body:expr) => {
        match $feature {
            Feature::Wpt($inner) => $body,
            Feature::Trk($inner) => $body,
            Feature::Rte($inner) => $body,
            Feature::RtePt($inner) => $body,
        }
    };
}

pub(crate) use each_variant;

impl Feature {
    /// Variant of the feature.
    pub fn kind(&self) -> FeatureKind {
        each_variant!(self, f => f.kind())
    }

    /// Feature id.
    pub fn id(&self) -> Option<&str> {
        each_variant!(self, f => f.id.as_deref())
    }

    /// Bounding box.
    pub fn bbox(&self) -> Option<&Bbox> {
        each_variant!(self, f => f.bbox.as_ref())
    }

    /// Geometry.
    pub fn geometry(&self) -> Option<&Geometry> {
        each_variant!(self, f => f.geometry.as_ref())
    }

    /// Unknown top-level members.
    pub fn unknown_members(&self) -> &JsonObject {
        each_variant!(self, f => &f.unknown_members)
    }

    /// Display name from the properties.
    pub fn name(&self) -> Option<&str> {
        each_variant!(self, f => f.properties.common.name.as_deref())
    }

    /// Access control list. Route points never have one.
    pub fn acl(&self) -> Option<&AccessControlList> {
        match self {
            Feature::Wpt(f) => f.properties.acl.as_ref(),
            Feature::Trk(f) => f.properties.acl.as_ref(),
            Feature::Rte(f) => f.properties.acl.as_ref(),
            Feature::RtePt(_) => None,
        }
    }

    /// Returns true if the geometry is absent or has the shape the variant requires.
    pub fn has_valid_shape(&self) -> bool {
        each_variant!(self, f => f.has_valid_shape())
    }

    /// Converts the feature into its untyped form.
    pub fn into_generic(self) -> GenericFeature {
        each_variant!(self, f => GenericFeature {
            id: f.id,
            bbox: f.bbox,
            geometry: f.geometry,
            properties: Some(f.properties.into()),
            unknown_members: f.unknown_members,
        })
    }
}

/// Untyped feature: the properties decide which variant it is.
///
/// This is the form features take before their variant is resolved, for example when they are assembled by code
/// that does not know the variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericFeature {
    /// Feature id.
    pub id: Option<String>,
    /// Bounding box.
    pub bbox: Option<Bbox>,
    /// Geometry.
    pub geometry: Option<Geometry>,
    /// Properties of any variant.
    pub properties: Option<FeatureProperties>,
    /// Unknown top-level members.
    pub unknown_members: JsonObject,
}

impl From<Feature> for GenericFeature {
    fn from(value: Feature) -> Self {
        value.into_generic()
    }
}

impl TryFrom<GenericFeature> for Feature {
    type Error = FeatureError;

    /// Builds the variant selected by the properties. Fails if the properties are absent or the geometry has the
    /// wrong shape for the variant.
    fn try_from(value: GenericFeature) -> Result<Self, Self::Error> {
        let GenericFeature {
            id,
            bbox,
            geometry,
            properties,
            unknown_members,
        } = value;

        let Some(properties) = properties else {
            return Err(FeatureError::UnresolvableVariant {
                discriminator: None,
            });
        };

        let kind = properties.kind();
        if let Some(geometry) = &geometry {
            if !kind.accepts(Some(geometry)) {
                return Err(FeatureError::ShapeMismatch {
                    kind,
                    required: kind.required_shape(),
                    found: kind::geometry_type_name(geometry),
                });
            }
        }

        macro_rules! build {
            ($variant:ident, $properties:expr) => {
                Feature::$variant(TypedFeature {
                    id,
                    bbox,
                    geometry,
                    properties: $properties,
                    unknown_members,
                })
            };
        }

        Ok(match properties {
            FeatureProperties::Wpt(p) => build!(Wpt, p),
            FeatureProperties::Trk(p) => build!(Trk, p),
            FeatureProperties::Rte(p) => build!(Rte, p),
            FeatureProperties::RtePt(p) => build!(RtePt, p),
        })
    }
}

/// Either a typed or a generic feature. Input of the [normalizer](crate::normalize).
#[derive(Debug, Clone, PartialEq)]
pub enum AnyFeature {
    /// A feature with a resolved variant.
    Typed(Feature),
    /// A feature whose variant is given by its properties only.
    Generic(GenericFeature),
}

impl From<Feature> for AnyFeature {
    fn from(value: Feature) -> Self {
        AnyFeature::Typed(value)
    }
}

impl From<GenericFeature> for AnyFeature {
    fn from(value: GenericFeature) -> Self {
        AnyFeature::Generic(value)
    }
}

impl<P: VariantProperties> From<TypedFeature<P>> for AnyFeature {
    fn from(value: TypedFeature<P>) -> Self {
        AnyFeature::Typed(value.into())
    }
}
