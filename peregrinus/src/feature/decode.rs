//! Streaming decoder of GeoJSON `Feature` objects.
//!
//! The decoder is a serde [`Visitor`] over the members of one JSON object. Each member value is read with
//! `deserialize_any`, so the action taken depends on the member key and on the JSON kind of its value, and keys may
//! come in any order. Geometry and properties objects are handed to their codecs, members the feature model does not
//! know are kept as JSON values. The variant is resolved once the object has been read completely.

use std::fmt::Formatter;
use std::io::Read;

use geojson::{Bbox, Geometry};
use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

use crate::error::{FeatureError, MemberError, PropertiesError};
use crate::feature::{Feature, FeatureProperties, GenericFeature, JsonObject};

/// What to do when a feature object has more than one `type` member.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum DuplicateTypePolicy {
    /// Every `type` member must be `"Feature"`; repeating it is allowed.
    #[default]
    LastWins,
    /// A second `type` member fails the decoding with [`FeatureError::DuplicateType`].
    Reject,
}

/// Decoder configuration.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Handling of repeated `type` members.
    pub duplicate_type: DuplicateTypePolicy,
}

/// Decodes GeoJSON features into [`Feature`] values.
///
/// ```ignore
/// let feature = FeatureDecoder::new().decode_str(r#"{
///     "type": "Feature",
///     "geometry": {"type": "Point", "coordinates": [10.5, 52.3]},
///     "properties": {"_type": "Wpt"}
/// }"#)?;
/// ```
///
/// The `Deserialize` implementation of [`Feature`] uses a decoder with default options.
#[derive(Debug, Default, Clone)]
pub struct FeatureDecoder {
    options: DecodeOptions,
}

impl FeatureDecoder {
    /// Creates a decoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder with the given options.
    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Sets the handling of repeated `type` members.
    pub fn with_duplicate_type_policy(mut self, policy: DuplicateTypePolicy) -> Self {
        self.options.duplicate_type = policy;
        self
    }

    /// Options of the decoder.
    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Decodes a feature from a JSON string. Trailing non-whitespace characters are an error.
    pub fn decode_str(&self, json: &str) -> Result<Feature, FeatureError> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let feature = self.decode(&mut deserializer)?;
        deserializer.end()?;
        feature
    }

    /// Decodes a feature from JSON bytes. Trailing non-whitespace characters are an error.
    pub fn decode_slice(&self, json: &[u8]) -> Result<Feature, FeatureError> {
        let mut deserializer = serde_json::Deserializer::from_slice(json);
        let feature = self.decode(&mut deserializer)?;
        deserializer.end()?;
        feature
    }

    /// Decodes a feature from a reader. Trailing non-whitespace characters are an error.
    pub fn decode_reader<R: Read>(&self, reader: R) -> Result<Feature, FeatureError> {
        let mut deserializer = serde_json::Deserializer::from_reader(reader);
        let feature = self.decode(&mut deserializer)?;
        deserializer.end()?;
        feature
    }

    /// Decodes a feature from an already parsed JSON value.
    pub fn decode_value(&self, value: Value) -> Result<Feature, FeatureError> {
        value.deserialize_map(FeatureVisitor {
            options: self.options,
        })?
    }

    /// Consumes exactly one JSON object from the deserializer.
    ///
    /// The outer result carries failures of the deserializer itself (syntax, I/O, not an object), the inner one
    /// failures of the feature model.
    pub fn decode<'de, D>(&self, deserializer: D) -> Result<Result<Feature, FeatureError>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FeatureVisitor {
            options: self.options,
        })
    }
}

impl<'de> Deserialize<'de> for Feature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        FeatureDecoder::new()
            .decode(deserializer)?
            .map_err(serde::de::Error::custom)
    }
}

/// Decoded `properties` member.
enum DecodedProperties {
    Known(FeatureProperties),
    /// Missing or unknown discriminator. Reported only when the variant is resolved.
    Unresolvable(Option<String>),
}

/// Decoded value of one member.
enum Member {
    Type(String),
    Id(Option<String>),
    Geometry(Option<Geometry>),
    Properties(Option<DecodedProperties>),
    Bbox(Option<Bbox>),
    Unknown(Value),
    Invalid(FeatureError),
}

/// Members collected so far.
#[derive(Default)]
struct FeatureParts {
    id: Option<String>,
    bbox: Option<Bbox>,
    geometry: Option<Geometry>,
    properties: Option<DecodedProperties>,
    unknown_members: JsonObject,
    type_seen: bool,
}

impl FeatureParts {
    fn accept(
        &mut self,
        key: String,
        member: Member,
        options: &DecodeOptions,
    ) -> Result<(), FeatureError> {
        match member {
            Member::Type(value) => {
                if self.type_seen && options.duplicate_type == DuplicateTypePolicy::Reject {
                    return Err(FeatureError::DuplicateType);
                }
                self.type_seen = true;
                if !value.eq_ignore_ascii_case("Feature") {
                    return Err(FeatureError::TypeMismatch {
                        found: Value::String(value).to_string(),
                    });
                }
            }
            // String and non-string ids are stored apart, the later one replaces the other.
            Member::Id(id) => {
                self.unknown_members.remove("id");
                self.id = id;
            }
            Member::Geometry(geometry) => self.geometry = geometry,
            Member::Properties(properties) => self.properties = properties,
            Member::Bbox(bbox) => self.bbox = bbox,
            Member::Unknown(value) => {
                if key == "id" {
                    self.id = None;
                }
                self.unknown_members.insert(key, value);
            }
            Member::Invalid(error) => return Err(error),
        }

        Ok(())
    }

    fn into_feature(self) -> Result<Feature, FeatureError> {
        let properties = match self.properties {
            Some(DecodedProperties::Known(properties)) => properties,
            Some(DecodedProperties::Unresolvable(discriminator)) => {
                return Err(FeatureError::UnresolvableVariant { discriminator })
            }
            None => {
                return Err(FeatureError::UnresolvableVariant {
                    discriminator: None,
                })
            }
        };

        Feature::try_from(GenericFeature {
            id: self.id,
            bbox: self.bbox,
            geometry: self.geometry,
            properties: Some(properties),
            unknown_members: self.unknown_members,
        })
    }
}

struct FeatureVisitor {
    options: DecodeOptions,
}

impl<'de> Visitor<'de> for FeatureVisitor {
    type Value = Result<Feature, FeatureError>;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a GeoJSON Feature object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut parts = FeatureParts::default();
        let mut failure = None;

        while let Some(key) = map.next_key::<String>()? {
            let member = map.next_value_seed(MemberSeed { key: &key })?;
            // The rest of the object is still read so that the input stays positioned after it.
            if failure.is_some() {
                continue;
            }

            if let Err(error) = parts.accept(key, member, &self.options) {
                failure = Some(error);
            }
        }

        let result = match failure {
            Some(error) => Err(error),
            None => parts.into_feature(),
        };

        if let Err(error) = &result {
            log::debug!("failed to decode feature: {error}");
        }

        Ok(result)
    }
}

struct MemberSeed<'a> {
    key: &'a str,
}

impl<'de> DeserializeSeed<'de> for MemberSeed<'_> {
    type Value = Member;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MemberVisitor { key: self.key })
    }
}

struct MemberVisitor<'a> {
    key: &'a str,
}

impl MemberVisitor<'_> {
    /// Handles a value that is not decoded by a member codec. A non-string `id` (GeoJSON allows numbers) is kept as
    /// an unknown member.
    fn scalar(&self, value: Value) -> Member {
        log::trace!("feature member {:?}: {}", self.key, kind_name(&value));
        match self.key {
            "type" => match value {
                Value::String(value) => Member::Type(value),
                other => Member::Invalid(FeatureError::TypeMismatch {
                    found: other.to_string(),
                }),
            },
            "id" => match value {
                Value::String(id) => Member::Id(Some(id)),
                Value::Null => Member::Id(None),
                other => Member::Unknown(other),
            },
            "geometry" => match value {
                Value::Null => Member::Geometry(None),
                other => self.unexpected("an object or null", &other),
            },
            "properties" => match value {
                Value::Null => Member::Properties(None),
                other => self.unexpected("an object or null", &other),
            },
            "bbox" => match value {
                Value::Null => Member::Bbox(None),
                other => self.unexpected("an array or null", &other),
            },
            _ => Member::Unknown(value),
        }
    }

    fn unexpected(&self, expected: &'static str, found: &Value) -> Member {
        Member::Invalid(FeatureError::malformed(
            self.key,
            MemberError::UnexpectedKind {
                expected,
                found: kind_name(found),
            },
        ))
    }
}

impl<'de> Visitor<'de> for MemberVisitor<'_> {
    type Value = Member;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        write!(formatter, "a JSON value for member {:?}", self.key)
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E> {
        Ok(self.scalar(Value::Bool(v)))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
        Ok(self.scalar(Value::Number(v.into())))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
        Ok(self.scalar(Value::Number(v.into())))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
        Ok(self.scalar(Number::from_f64(v).map_or(Value::Null, Value::Number)))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
        Ok(self.scalar(Value::String(v.to_string())))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E> {
        Ok(self.scalar(Value::String(v)))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(self.scalar(Value::Null))
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(self.scalar(Value::Null))
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        log::trace!("feature member {:?}: object", self.key);
        let object = JsonObject::deserialize(MapAccessDeserializer::new(map))?;

        Ok(match self.key {
            "geometry" => match Geometry::from_json_object(object) {
                Ok(geometry) => Member::Geometry(Some(geometry)),
                Err(error) => Member::Invalid(FeatureError::malformed(self.key, error)),
            },
            "properties" => match FeatureProperties::from_json_object(object) {
                Ok(properties) => Member::Properties(Some(DecodedProperties::Known(properties))),
                Err(PropertiesError::MissingDiscriminator) => {
                    Member::Properties(Some(DecodedProperties::Unresolvable(None)))
                }
                Err(PropertiesError::UnknownDiscriminator(discriminator)) => Member::Properties(
                    Some(DecodedProperties::Unresolvable(Some(discriminator))),
                ),
                Err(error) => Member::Invalid(FeatureError::malformed(self.key, error)),
            },
            _ => self.scalar(Value::Object(object)),
        })
    }

    fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        log::trace!("feature member {:?}: array", self.key);
        let values = Vec::<Value>::deserialize(SeqAccessDeserializer::new(seq))?;

        Ok(match self.key {
            "bbox" => match decode_bbox(values) {
                Ok(bbox) => Member::Bbox(Some(bbox)),
                Err(error) => Member::Invalid(FeatureError::malformed(self.key, error)),
            },
            _ => self.scalar(Value::Array(values)),
        })
    }
}

fn decode_bbox(values: Vec<Value>) -> Result<Bbox, MemberError> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            value.as_f64().ok_or_else(|| MemberError::NotANumber {
                index,
                value: value.to_string(),
            })
        })
        .collect()
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use geojson::Value as GeoValue;
    use serde_json::json;

    use super::*;
    use crate::feature::{FeatureKind, GeometryShape};

    fn decode(json: &str) -> Result<Feature, FeatureError> {
        FeatureDecoder::new().decode_str(json)
    }

    #[test]
    fn waypoint_with_point() {
        let feature = decode(
            r#"{"type":"Feature","id":"123","bbox":[10.5,52.3,10.5,52.3],
                "geometry":{"type":"Point","coordinates":[10.5,52.3]},
                "properties":{"_type":"Wpt","name":"Hannover"}}"#,
        )
        .unwrap();

        let Feature::Wpt(wpt) = feature else {
            panic!("expected a waypoint, got {feature:?}");
        };
        assert_eq!(wpt.id.as_deref(), Some("123"));
        assert_eq!(wpt.bbox, Some(vec![10.5, 52.3, 10.5, 52.3]));
        assert_eq!(
            wpt.geometry,
            Some(Geometry::new(GeoValue::Point(vec![10.5, 52.3])))
        );
        assert_eq!(wpt.properties.common.name.as_deref(), Some("Hannover"));
        assert!(wpt.unknown_members.is_empty());
    }

    #[test]
    fn members_in_any_order() {
        let feature = decode(
            r#"{"properties":{"_type":"Trk"},"extra":1,
                "geometry":{"type":"MultiLineString","coordinates":[[[1,2],[3,4]]]},
                "id":"t","type":"feature"}"#,
        )
        .unwrap();

        assert_eq!(feature.kind(), FeatureKind::Trk);
        assert_eq!(feature.id(), Some("t"));
        assert_eq!(feature.unknown_members()["extra"], json!(1));
    }

    #[test]
    fn type_must_be_feature() {
        assert_matches!(
            decode(r#"{"type":"FeatureCollection","properties":{"_type":"Wpt"}}"#),
            Err(FeatureError::TypeMismatch { found }) if found == "\"FeatureCollection\""
        );
        assert_matches!(
            decode(r#"{"type":7,"properties":{"_type":"Wpt"}}"#),
            Err(FeatureError::TypeMismatch { found }) if found == "7"
        );
        assert_matches!(
            decode(r#"{"type":null,"properties":{"_type":"Wpt"}}"#),
            Err(FeatureError::TypeMismatch { .. })
        );
    }

    #[test]
    fn type_member_is_optional() {
        let feature = decode(r#"{"properties":{"_type":"Rte"}}"#).unwrap();
        assert_eq!(feature.kind(), FeatureKind::Rte);
    }

    #[test]
    fn shape_mismatch() {
        assert_matches!(
            decode(
                r#"{"type":"Feature","properties":{"_type":"Wpt"},
                    "geometry":{"type":"MultiLineString","coordinates":[[[1,2],[3,4]]]}}"#
            ),
            Err(FeatureError::ShapeMismatch {
                kind: FeatureKind::Wpt,
                required: GeometryShape::Point,
                found: "MultiLineString",
            })
        );
        assert_matches!(
            decode(
                r#"{"type":"Feature","properties":{"_type":"Rte"},
                    "geometry":{"type":"LineString","coordinates":[[1,2],[3,4]]}}"#
            ),
            Err(FeatureError::ShapeMismatch {
                kind: FeatureKind::Rte,
                found: "LineString",
                ..
            })
        );
    }

    #[test]
    fn null_geometry_is_accepted_for_every_variant() {
        for kind in FeatureKind::all() {
            let json = format!(
                r#"{{"type":"Feature","geometry":null,"properties":{{"_type":"{}"}}}}"#,
                kind.discriminator()
            );
            let feature = decode(&json).unwrap();
            assert_eq!(feature.kind(), kind);
            assert!(feature.geometry().is_none());
        }
    }

    #[test]
    fn unresolvable_variants() {
        assert_matches!(
            decode(r#"{"type":"Feature","geometry":null}"#),
            Err(FeatureError::UnresolvableVariant {
                discriminator: None
            })
        );
        assert_matches!(
            decode(r#"{"type":"Feature","properties":null}"#),
            Err(FeatureError::UnresolvableVariant {
                discriminator: None
            })
        );
        assert_matches!(
            decode(r#"{"type":"Feature","properties":{"name":"x"}}"#),
            Err(FeatureError::UnresolvableVariant {
                discriminator: None
            })
        );
        assert_matches!(
            decode(r#"{"type":"Feature","properties":{"_type":"Poi"}}"#),
            Err(FeatureError::UnresolvableVariant {
                discriminator: Some(d)
            }) if d == "Poi"
        );
    }

    #[test]
    fn malformed_members() {
        assert_matches!(
            decode(r#"{"type":"Feature","properties":{"_type":"Wpt"},"bbox":[1,2,"x",4]}"#),
            Err(FeatureError::MalformedValue {
                key,
                source: MemberError::NotANumber { index: 2, .. },
            }) if key == "bbox"
        );
        assert_matches!(
            decode(r#"{"type":"Feature","properties":{"_type":"Wpt"},"geometry":{"type":"Circle"}}"#),
            Err(FeatureError::MalformedValue {
                key,
                source: MemberError::Geometry(_),
            }) if key == "geometry"
        );
        assert_matches!(
            decode(r#"{"type":"Feature","properties":{"_type":"Wpt","ele":"high"}}"#),
            Err(FeatureError::MalformedValue {
                key,
                source: MemberError::Properties(PropertiesError::Json(_)),
            }) if key == "properties"
        );
        assert_matches!(
            decode(r#"{"type":"Feature","properties":{"_type":"Wpt"},"geometry":"POINT(1 2)"}"#),
            Err(FeatureError::MalformedValue {
                key,
                source: MemberError::UnexpectedKind { found: "string", .. },
            }) if key == "geometry"
        );
        assert_matches!(
            decode(r#"{"type":"Feature","properties":[],"geometry":null}"#),
            Err(FeatureError::MalformedValue { key, .. }) if key == "properties"
        );
    }

    #[test]
    fn first_failure_is_reported_after_the_whole_object() {
        let mut deserializer = serde_json::Deserializer::from_str(
            r#"{"type":"Point","properties":{"_type":"Wpt"},"bbox":["x"]} {"next":true}"#,
        );
        let result = FeatureDecoder::new().decode(&mut deserializer).unwrap();
        assert_matches!(result, Err(FeatureError::TypeMismatch { .. }));

        let next = Value::deserialize(&mut deserializer).unwrap();
        assert_eq!(next, json!({"next": true}));
    }

    #[test]
    fn invalid_json() {
        assert_matches!(decode(r#"{"type":"Feature""#), Err(FeatureError::Json(_)));
        assert_matches!(decode(r#"[1, 2]"#), Err(FeatureError::Json(_)));
        assert_matches!(
            decode(r#"{"properties":{"_type":"Wpt"}} trailing"#),
            Err(FeatureError::Json(_))
        );
    }

    #[test]
    fn unknown_members_keep_kind_and_order() {
        let feature = decode(
            r#"{"z":"s","type":"Feature","a":{"b":[1,2.5,"x"]},"m":[true,null],
                "properties":{"_type":"RtePt"},"f":false,"n":-3,"d":0.25,"nil":null}"#,
        )
        .unwrap();

        let members = feature.unknown_members();
        let keys: Vec<&str> = members.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m", "f", "n", "d", "nil"]);
        assert_eq!(members["a"], json!({"b": [1, 2.5, "x"]}));
        assert_eq!(members["m"], json!([true, null]));
        assert_eq!(members["f"], json!(false));
        assert_eq!(members["n"], json!(-3));
        assert_eq!(members["d"], json!(0.25));
        assert_eq!(members["nil"], Value::Null);
    }

    #[test]
    fn numeric_id_is_an_unknown_member() {
        let feature = decode(r#"{"id":42,"properties":{"_type":"Wpt"}}"#).unwrap();
        assert_eq!(feature.id(), None);
        assert_eq!(feature.unknown_members()["id"], json!(42));

        let feature = decode(r#"{"id":null,"properties":{"_type":"Wpt"}}"#).unwrap();
        assert_eq!(feature.id(), None);
        assert!(feature.unknown_members().is_empty());
    }

    #[test]
    fn repeated_members_last_write_wins() {
        let feature = decode(
            r#"{"id":"1","bbox":[0,0,1,1],"id":"2","bbox":null,
                "properties":{"_type":"Trk"},"properties":{"_type":"Wpt"}}"#,
        )
        .unwrap();

        assert_eq!(feature.kind(), FeatureKind::Wpt);
        assert_eq!(feature.id(), Some("2"));
        assert_eq!(feature.bbox(), None);
    }

    #[test]
    fn repeated_id_of_mixed_kinds_last_write_wins() {
        let feature = decode(r#"{"id":1,"id":"x","properties":{"_type":"Wpt"}}"#).unwrap();
        assert_eq!(feature.id(), Some("x"));
        assert!(feature.unknown_members().is_empty());

        let feature = decode(r#"{"id":"x","id":1,"properties":{"_type":"Wpt"}}"#).unwrap();
        assert_eq!(feature.id(), None);
        assert_eq!(feature.unknown_members()["id"], json!(1));

        let feature = decode(r#"{"id":1,"id":null,"properties":{"_type":"Wpt"}}"#).unwrap();
        assert_eq!(feature.id(), None);
        assert!(feature.unknown_members().is_empty());

        for json in [
            r#"{"id":1,"id":"x","properties":{"_type":"Wpt"}}"#,
            r#"{"id":"x","id":1,"properties":{"_type":"Wpt"}}"#,
        ] {
            let feature = decode(json).unwrap();
            let encoded = serde_json::to_string(&feature).unwrap();
            assert_eq!(decode(&encoded).unwrap(), feature, "{encoded}");
        }
    }

    // A repeated `type` member is accepted by default. Every occurrence is still checked.
    #[test]
    fn duplicate_type_last_wins_by_default() {
        let feature =
            decode(r#"{"type":"Feature","type":"FEATURE","properties":{"_type":"Wpt"}}"#).unwrap();
        assert_eq!(feature.kind(), FeatureKind::Wpt);

        assert_matches!(
            decode(r#"{"type":"Feature","type":"Polygon","properties":{"_type":"Wpt"}}"#),
            Err(FeatureError::TypeMismatch { .. })
        );
    }

    #[test]
    fn duplicate_type_can_be_rejected() {
        let decoder = FeatureDecoder::new().with_duplicate_type_policy(DuplicateTypePolicy::Reject);
        assert_eq!(decoder.options().duplicate_type, DuplicateTypePolicy::Reject);

        assert_matches!(
            decoder.decode_str(r#"{"type":"Feature","type":"Feature","properties":{"_type":"Wpt"}}"#),
            Err(FeatureError::DuplicateType)
        );
        assert!(decoder
            .decode_str(r#"{"type":"Feature","properties":{"_type":"Wpt"}}"#)
            .is_ok());
    }

    #[test]
    fn value_reader_and_str_agree() {
        let json = r#"{"type":"Feature","id":"x","geometry":{"type":"Point","coordinates":[1.0,2.0]},
                       "properties":{"_type":"Wpt"},"extra":[1,{"k":"v"}]}"#;
        let decoder = FeatureDecoder::new();

        let from_str = decoder.decode_str(json).unwrap();
        let from_slice = decoder.decode_slice(json.as_bytes()).unwrap();
        let from_reader = decoder.decode_reader(json.as_bytes()).unwrap();
        let from_value = decoder
            .decode_value(serde_json::from_str(json).unwrap())
            .unwrap();

        assert_eq!(from_str, from_slice);
        assert_eq!(from_str, from_reader);
        assert_eq!(from_str, from_value);
    }

    #[test]
    fn serde_deserialize_reports_feature_errors() {
        let error = serde_json::from_str::<Feature>(r#"{"properties":{"_type":"Poi"}}"#)
            .unwrap_err()
            .to_string();
        assert!(error.starts_with("no matching feature variant"), "{error}");

        let features: Vec<Feature> = serde_json::from_str(
            r#"[{"properties":{"_type":"Wpt"}},{"properties":{"_type":"Trk"}}]"#,
        )
        .unwrap();
        assert_eq!(features.len(), 2);
    }

    #[test]
    fn route_point_ignores_acl_and_settings() {
        let feature = decode(
            r#"{"type":"Feature","properties":{"_type":"RtePt","acl":{"owner":"anna"},"settings":{"userId":"anna"}},
                "geometry":{"type":"Point","coordinates":[10.5,52.3]}}"#,
        )
        .unwrap();

        assert_eq!(feature.kind(), FeatureKind::RtePt);
        assert!(feature.acl().is_none());
        assert!(!feature
            .into_generic()
            .properties
            .is_some_and(|p| p.has_settings()));
    }
}
