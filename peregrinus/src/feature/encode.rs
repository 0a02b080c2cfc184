use geojson::{Bbox, Geometry};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::feature::properties::Tagged;
use crate::feature::{
    Feature, GenericFeature, JsonObject, TypedFeature, VariantProperties, RESERVED_MEMBERS,
};

struct FeatureMembers<'a, P> {
    id: Option<&'a str>,
    bbox: Option<&'a Bbox>,
    geometry: Option<&'a Geometry>,
    properties: P,
    unknown_members: &'a JsonObject,
}

impl<P: Serialize> FeatureMembers<'_, P> {
    fn collides(&self, key: &str) -> bool {
        if !RESERVED_MEMBERS.contains(&key) {
            return false;
        }
        match key {
            "id" => self.id.is_some(),
            "bbox" => self.bbox.is_some(),
            _ => true,
        }
    }

    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "Feature")?;
        if let Some(id) = self.id {
            map.serialize_entry("id", id)?;
        }
        if let Some(bbox) = self.bbox {
            map.serialize_entry("bbox", bbox)?;
        }
        map.serialize_entry("geometry", &self.geometry)?;
        map.serialize_entry("properties", &self.properties)?;

        for (key, value) in self.unknown_members {
            if self.collides(key) {
                log::warn!("unknown feature member {key:?} is shadowed by the feature member and is not written");
                continue;
            }
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}

impl<P: VariantProperties> Serialize for TypedFeature<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FeatureMembers {
            id: self.id.as_deref(),
            bbox: self.bbox.as_ref(),
            geometry: self.geometry.as_ref(),
            properties: Tagged::new(&self.properties),
            unknown_members: &self.unknown_members,
        }
        .serialize(serializer)
    }
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::feature::each_variant!(self, f => f.serialize(serializer))
    }
}

impl Serialize for GenericFeature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FeatureMembers {
            id: self.id.as_deref(),
            bbox: self.bbox.as_ref(),
            geometry: self.geometry.as_ref(),
            properties: &self.properties,
            unknown_members: &self.unknown_members,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use geojson::Value as GeoValue;
    use insta::assert_snapshot;
    use serde_json::json;

    use super::*;
    use crate::feature::{
        FeatureDecoder, FeatureKind, RtePt, RtePtProperties, Trk, TrkProperties, Wpt,
        WptProperties,
    };

    fn point() -> Geometry {
        Geometry::new(GeoValue::Point(vec![10.5, 52.3]))
    }

    #[test]
    fn members_are_written_in_order() {
        let wpt = Wpt::new(WptProperties::default())
            .with_id("w")
            .with_bbox(vec![10.5, 52.3, 10.5, 52.3])
            .with_geometry(point())
            .with_unknown_member("extra", json!({"a": 1}));

        assert_snapshot!(
            serde_json::to_string(&Feature::from(wpt)).unwrap(),
            @r#"{"type":"Feature","id":"w","bbox":[10.5,52.3,10.5,52.3],"geometry":{"type":"Point","coordinates":[10.5,52.3]},"properties":{"_type":"Wpt"},"extra":{"a":1}}"#
        );
    }

    #[test]
    fn absent_geometry_is_null() {
        let value = serde_json::to_value(Trk::new(TrkProperties::default())).unwrap();
        assert_eq!(
            value,
            json!({"type": "Feature", "geometry": null, "properties": {"_type": "Trk"}})
        );
    }

    #[test]
    fn colliding_unknown_members_are_skipped() {
        let mut wpt = Wpt::new(WptProperties::default()).with_id("w");
        for (key, value) in [
            ("type", json!("Point")),
            ("id", json!(5)),
            ("bbox", json!([0, 0])),
            ("properties", json!({})),
            ("geometry", json!(null)),
        ] {
            wpt.unknown_members.insert(key.to_string(), value);
        }

        let value = serde_json::to_value(&wpt).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "Feature",
                "id": "w",
                "geometry": null,
                "properties": {"_type": "Wpt"},
                "bbox": [0, 0],
            })
        );
    }

    #[test]
    fn numeric_id_survives_round_trip() {
        let feature = FeatureDecoder::new()
            .decode_str(r#"{"type":"Feature","id":7,"geometry":null,"properties":{"_type":"Wpt"}}"#)
            .unwrap();
        let json = serde_json::to_string(&feature).unwrap();
        assert_snapshot!(json, @r#"{"type":"Feature","geometry":null,"properties":{"_type":"Wpt"},"id":7}"#);
        assert_eq!(FeatureDecoder::new().decode_str(&json).unwrap(), feature);
    }

    #[test]
    fn route_point_never_writes_acl_or_settings() {
        let feature = FeatureDecoder::new()
            .decode_str(
                r#"{"properties":{"_type":"RtePt","acl":{"owner":"anna"},"settings":{},"lengthInMeters":10}}"#,
            )
            .unwrap();

        let value = serde_json::to_value(&feature).unwrap();
        assert_eq!(
            value["properties"],
            json!({"_type": "RtePt", "lengthInMeters": 10})
        );
    }

    #[test]
    fn decode_of_encode_is_identity() {
        let features: Vec<Feature> = vec![
            Wpt::new(WptProperties::default())
                .with_geometry(point())
                .with_unknown_member("n", json!(null))
                .into(),
            RtePt::new(RtePtProperties {
                length_in_meters: Some(250),
                ..Default::default()
            })
            .with_id("p")
            .into(),
            FeatureKind::Rte.empty_feature(),
        ];

        for feature in features {
            let json = serde_json::to_string(&feature).unwrap();
            assert_eq!(FeatureDecoder::new().decode_str(&json).unwrap(), feature);
        }
    }

    #[test]
    fn generic_feature_without_properties_writes_null() {
        let generic = GenericFeature {
            id: Some("g".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&generic).unwrap(),
            json!({"type": "Feature", "id": "g", "geometry": null, "properties": null})
        );
    }
}
