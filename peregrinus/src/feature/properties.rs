//! Property payloads of the feature variants.
//!
//! On the wire every payload is a JSON object with a `_type` discriminator. The discriminator selects the payload
//! type through the variant table in [`kind`](super::kind), the typed payloads themselves never see it.

use geojson::Geometry;
use peregrinus_types::{
    AccessControlList, Address, Link, PhoneNumber, RteSettings, TrkSettings, WptSettings,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

use crate::error::PropertiesError;
use crate::feature::kind::FeatureKind;
use crate::feature::{Feature, JsonObject, TypedFeature};

/// Name of the discriminator member inside `properties`.
pub const DISCRIMINATOR_KEY: &str = "_type";

/// Members shared by the properties of all variants.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommonProperties {
    /// Creation time.
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub created: Option<OffsetDateTime>,
    /// Creator's user name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Time of the last modification.
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub modified: Option<OffsetDateTime>,
    /// User name of the last modifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description as plain text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_text_description: Option<String>,
    /// Description as markdown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_description: Option<String>,
    /// Comments that are never exported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_comments: Option<String>,
    /// Links.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    /// Start of the time span the feature is valid for, or the departure time of a route point.
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<OffsetDateTime>,
    /// End of the time span the feature is valid for, or the arrival time of a route point.
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub stop_time: Option<OffsetDateTime>,
}

/// Members of the point-like variants ([`WptProperties`] and [`RtePtProperties`]).
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PointProperties {
    /// Application-specific kind of the point, e.g. whether it marks a photo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
    /// Elevation in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ele: Option<f64>,
    /// Postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Phone numbers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phone_numbers: Vec<PhoneNumber>,
    /// Outline of the place (a `Polygon`), as returned by geocoding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<Geometry>,
    /// OpenStreetMap id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osm_id: Option<String>,
    /// OpenStreetMap element type (`node`, `way`, `relation`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osm_type: Option<String>,
    /// Nominatim place id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osm_place_id: Option<String>,
    /// OpenStreetMap category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osm_category: Option<String>,
}

/// Properties of a waypoint.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WptProperties {
    /// Shared members.
    #[serde(flatten)]
    pub common: CommonProperties,
    /// Access control list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl: Option<AccessControlList>,
    /// Settings of the current user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<WptSettings>,
    /// Point members.
    #[serde(flatten)]
    pub point: PointProperties,
}

/// Properties of a track.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrkProperties {
    /// Shared members.
    #[serde(flatten)]
    pub common: CommonProperties,
    /// Access control list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl: Option<AccessControlList>,
    /// Settings of the current user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<TrkSettings>,
}

/// Properties of a route.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RteProperties {
    /// Shared members.
    #[serde(flatten)]
    pub common: CommonProperties,
    /// Access control list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl: Option<AccessControlList>,
    /// Settings of the current user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<RteSettings>,
}

/// Properties of a route point.
///
/// Route points are computed by the routing service and only exist as part of a route, so they have neither an
/// access control list nor settings of their own. `acl` and `settings` members in the input are ignored.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RtePtProperties {
    /// Shared members.
    #[serde(flatten)]
    pub common: CommonProperties,
    /// Point members.
    #[serde(flatten)]
    pub point: PointProperties,
    /// Length of the leg ending at this point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_in_meters: Option<u32>,
    /// Travel time of the leg.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_time_in_seconds: Option<u32>,
    /// Delay caused by traffic on the leg.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic_delay_in_seconds: Option<i32>,
    /// Travel time of the leg without traffic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_traffic_travel_time_in_seconds: Option<u32>,
    /// Travel time of the leg with historic traffic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historic_traffic_travel_time_in_seconds: Option<u32>,
    /// Travel time of the leg with live traffic incidents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_traffic_incidents_travel_time_in_seconds: Option<u32>,
}

impl RtePtProperties {
    /// Departure time at this point.
    pub fn departure_time(&self) -> Option<OffsetDateTime> {
        self.common.start_time
    }

    /// Arrival time at this point.
    pub fn arrival_time(&self) -> Option<OffsetDateTime> {
        self.common.stop_time
    }
}

/// Typed properties of one feature variant.
pub trait VariantProperties:
    Serialize + DeserializeOwned + Default + Clone + PartialEq + Into<FeatureProperties>
{
    /// The variant these properties belong to.
    const KIND: FeatureKind;

    /// Wraps a typed feature into the [`Feature`] enum.
    fn into_feature(feature: TypedFeature<Self>) -> Feature;

    /// Extracts the typed feature, or gives the feature back if it is of another variant.
    fn from_feature(feature: Feature) -> Result<TypedFeature<Self>, Feature>;
}

macro_rules! impl_variant_properties {
    ($properties:ident, $variant:ident) => {
        impl VariantProperties for $properties {
            const KIND: FeatureKind = FeatureKind::$variant;

            fn into_feature(feature: TypedFeature<Self>) -> Feature {
                Feature::$variant(feature)
            }

            fn from_feature(feature: Feature) -> Result<TypedFeature<Self>, Feature> {
                match feature {
                    Feature::$variant(feature) => Ok(feature),
                    other => Err(other),
                }
            }
        }

        impl From<$properties> for FeatureProperties {
            fn from(value: $properties) -> Self {
                FeatureProperties::$variant(value)
            }
        }
    };
}

impl_variant_properties!(WptProperties, Wpt);
impl_variant_properties!(TrkProperties, Trk);
impl_variant_properties!(RteProperties, Rte);
impl_variant_properties!(RtePtProperties, RtePt);

/// Properties of any variant.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum FeatureProperties {
    Wpt(WptProperties),
    Trk(TrkProperties),
    Rte(RteProperties),
    RtePt(RtePtProperties),
}

impl FeatureProperties {
    /// Variant the properties belong to.
    pub fn kind(&self) -> FeatureKind {
        match self {
            FeatureProperties::Wpt(_) => FeatureKind::Wpt,
            FeatureProperties::Trk(_) => FeatureKind::Trk,
            FeatureProperties::Rte(_) => FeatureKind::Rte,
            FeatureProperties::RtePt(_) => FeatureKind::RtePt,
        }
    }

    /// Default properties of the variant.
    pub fn empty(kind: FeatureKind) -> Self {
        match kind {
            FeatureKind::Wpt => WptProperties::default().into(),
            FeatureKind::Trk => TrkProperties::default().into(),
            FeatureKind::Rte => RteProperties::default().into(),
            FeatureKind::RtePt => RtePtProperties::default().into(),
        }
    }

    /// Decodes a `properties` JSON object, selecting the payload type by its `_type` member.
    pub fn from_json_object(object: JsonObject) -> Result<Self, PropertiesError> {
        let kind = match object.get(DISCRIMINATOR_KEY) {
            Some(JsonValue::String(discriminator)) => FeatureKind::from_discriminator(discriminator)
                .ok_or_else(|| PropertiesError::UnknownDiscriminator(discriminator.clone()))?,
            _ => return Err(PropertiesError::MissingDiscriminator),
        };

        let value = JsonValue::Object(object);
        Ok(match kind {
            FeatureKind::Wpt => FeatureProperties::Wpt(serde_json::from_value(value)?),
            FeatureKind::Trk => FeatureProperties::Trk(serde_json::from_value(value)?),
            FeatureKind::Rte => FeatureProperties::Rte(serde_json::from_value(value)?),
            FeatureKind::RtePt => FeatureProperties::RtePt(serde_json::from_value(value)?),
        })
    }

    /// Members shared by all variants.
    pub fn common(&self) -> &CommonProperties {
        match self {
            FeatureProperties::Wpt(p) => &p.common,
            FeatureProperties::Trk(p) => &p.common,
            FeatureProperties::Rte(p) => &p.common,
            FeatureProperties::RtePt(p) => &p.common,
        }
    }

    /// Point members of the point-like variants.
    pub fn point(&self) -> Option<&PointProperties> {
        match self {
            FeatureProperties::Wpt(p) => Some(&p.point),
            FeatureProperties::RtePt(p) => Some(&p.point),
            FeatureProperties::Trk(_) | FeatureProperties::Rte(_) => None,
        }
    }

    /// Access control list. Always `None` for route points.
    pub fn acl(&self) -> Option<&AccessControlList> {
        match self {
            FeatureProperties::Wpt(p) => p.acl.as_ref(),
            FeatureProperties::Trk(p) => p.acl.as_ref(),
            FeatureProperties::Rte(p) => p.acl.as_ref(),
            FeatureProperties::RtePt(_) => None,
        }
    }

    /// Returns true if the variant has settings. Always `false` for route points.
    pub fn has_settings(&self) -> bool {
        match self {
            FeatureProperties::Wpt(p) => p.settings.is_some(),
            FeatureProperties::Trk(p) => p.settings.is_some(),
            FeatureProperties::Rte(p) => p.settings.is_some(),
            FeatureProperties::RtePt(_) => false,
        }
    }
}

/// Payload with its discriminator written first.
#[derive(Serialize)]
pub(crate) struct Tagged<'a, P> {
    #[serde(rename = "_type")]
    discriminator: &'static str,
    #[serde(flatten)]
    properties: &'a P,
}

impl<'a, P: VariantProperties> Tagged<'a, P> {
    pub(crate) fn new(properties: &'a P) -> Self {
        Self {
            discriminator: P::KIND.discriminator(),
            properties,
        }
    }
}

impl Serialize for FeatureProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FeatureProperties::Wpt(p) => Tagged::new(p).serialize(serializer),
            FeatureProperties::Trk(p) => Tagged::new(p).serialize(serializer),
            FeatureProperties::Rte(p) => Tagged::new(p).serialize(serializer),
            FeatureProperties::RtePt(p) => Tagged::new(p).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FeatureProperties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = JsonObject::deserialize(deserializer)?;
        Self::from_json_object(object).map_err(serde::de::Error::custom)
    }
}
