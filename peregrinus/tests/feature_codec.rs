use assert_matches::assert_matches;
use geojson::{Geometry, Value};
use peregrinus::feature::{
    DuplicateTypePolicy, FeatureProperties, GeometryShape, RteProperties, RtePtProperties,
    TrkProperties, TypedFeature, WptProperties,
};
use peregrinus::{
    normalize, AnyFeature, Feature, FeatureDecoder, FeatureError, FeatureKind, GenericFeature,
};
use serde_json::json;

fn geometry_for(kind: FeatureKind) -> Geometry {
    match kind.required_shape() {
        GeometryShape::Point => Geometry::new(Value::Point(vec![10.5, 52.3])),
        GeometryShape::MultiLineString => Geometry::new(Value::MultiLineString(vec![
            vec![vec![10.0, 52.0], vec![10.5, 52.3]],
            vec![vec![10.5, 52.3], vec![11.0, 52.5]],
        ])),
    }
}

fn with_members<P>(
    feature: TypedFeature<P>,
    kind: FeatureKind,
    id: bool,
    bbox: bool,
    geometry: bool,
) -> TypedFeature<P> {
    let mut feature = feature.with_unknown_member("extra", json!({"a": [1, 2, "x"]}));
    if id {
        feature = feature.with_id("f-1");
    }
    if bbox {
        feature = feature.with_bbox(vec![10.0, 52.0, 11.0, 52.5]);
    }
    if geometry {
        feature = feature.with_geometry(geometry_for(kind));
    }
    feature
}

fn build(kind: FeatureKind, id: bool, bbox: bool, geometry: bool) -> Feature {
    match kind {
        FeatureKind::Wpt => {
            with_members(TypedFeature::new(WptProperties::default()), kind, id, bbox, geometry)
                .into()
        }
        FeatureKind::Trk => {
            with_members(TypedFeature::new(TrkProperties::default()), kind, id, bbox, geometry)
                .into()
        }
        FeatureKind::Rte => {
            with_members(TypedFeature::new(RteProperties::default()), kind, id, bbox, geometry)
                .into()
        }
        FeatureKind::RtePt => {
            with_members(TypedFeature::new(RtePtProperties::default()), kind, id, bbox, geometry)
                .into()
        }
    }
}

#[test]
fn decode_inverts_encode() {
    let decoder = FeatureDecoder::new();
    for kind in FeatureKind::all() {
        for mask in 0..8 {
            let feature = build(kind, mask & 1 != 0, mask & 2 != 0, mask & 4 != 0);
            let json = serde_json::to_string(&feature).unwrap();
            assert_eq!(decoder.decode_str(&json).unwrap(), feature, "{json}");
        }
    }
}

#[test]
fn discriminator_dispatch() {
    let feature = FeatureDecoder::new()
        .decode_str(
            r#"{"type":"Feature","properties":{"_type":"Wpt"},"geometry":{"type":"Point","coordinates":[1,2]}}"#,
        )
        .unwrap();
    assert_matches!(feature, Feature::Wpt(_));

    assert_matches!(
        FeatureDecoder::new().decode_str(
            r#"{"type":"Feature","properties":{"_type":"Wpt"},"geometry":{"type":"MultiLineString","coordinates":[]}}"#,
        ),
        Err(FeatureError::ShapeMismatch { kind: FeatureKind::Wpt, .. })
    );
}

#[test]
fn extra_member_is_preserved() {
    let input = json!({
        "type": "Feature",
        "id": "1",
        "geometry": null,
        "properties": {"_type": "Wpt"},
        "extra": {"a": [1, 2, "x"]},
    });

    let feature = FeatureDecoder::new().decode_value(input.clone()).unwrap();
    assert_eq!(serde_json::to_value(&feature).unwrap(), input);
}

#[test]
fn route_point_end_to_end() {
    let feature = FeatureDecoder::new()
        .decode_str(
            r#"{"type":"Feature","properties":{"_type":"RtePt","acl":{"owner":"x"},"settings":{"id":"s"}},"geometry":{"type":"Point","coordinates":[10.5,52.3]}}"#,
        )
        .unwrap();

    let Feature::RtePt(rte_pt) = &feature else {
        panic!("expected a route point, got {feature:?}");
    };
    assert_eq!(rte_pt.properties, RtePtProperties::default());
    assert!(feature.acl().is_none());

    let encoded = serde_json::to_value(&feature).unwrap();
    assert_eq!(encoded["properties"], json!({"_type": "RtePt"}));
}

#[test]
fn duplicate_type_policies() {
    let json = r#"{"type":"Feature","properties":{"_type":"Trk"},"type":"Feature"}"#;
    assert_eq!(
        FeatureDecoder::new().decode_str(json).unwrap().kind(),
        FeatureKind::Trk
    );
    assert_matches!(
        FeatureDecoder::new()
            .with_duplicate_type_policy(DuplicateTypePolicy::Reject)
            .decode_str(json),
        Err(FeatureError::DuplicateType)
    );
}

#[test]
fn normalizer_on_decoded_collection() {
    let collection = json!([
        {"type": "Feature", "id": "a", "geometry": {"type": "Point", "coordinates": [1, 2]}, "properties": {"_type": "Wpt"}},
        {"type": "Feature", "id": "b", "geometry": null, "properties": {"_type": "Trk"}},
        null,
        {"type": "Feature", "id": "c", "geometry": {"type": "MultiLineString", "coordinates": [[[1, 2], [3, 4]]]}, "properties": {"_type": "Rte"}},
    ]);
    let items: Vec<Option<Feature>> = serde_json::from_value(collection).unwrap();

    let normalized = normalize(items);
    let ids: Vec<_> = normalized.iter().filter_map(Feature::id).collect();
    assert_eq!(ids, ["a", "c"]);
    assert_eq!(normalize(normalized.clone().into_iter().map(Some)), normalized);
}

#[test]
fn normalizer_repairs_generic_route() {
    let geometry = geometry_for(FeatureKind::Rte);
    let properties = RteProperties::default();
    let generic = GenericFeature {
        id: Some("r".into()),
        bbox: Some(vec![10.0, 52.0, 11.0, 52.5]),
        geometry: Some(geometry.clone()),
        properties: Some(FeatureProperties::Rte(properties.clone())),
        unknown_members: Default::default(),
    };

    let normalized = normalize([Some(AnyFeature::from(generic))]);
    let [Feature::Rte(rte)] = normalized.as_slice() else {
        panic!("expected one route, got {normalized:?}");
    };
    assert_eq!(rte.id.as_deref(), Some("r"));
    assert_eq!(rte.geometry.as_ref(), Some(&geometry));
    assert_eq!(rte.bbox, Some(vec![10.0, 52.0, 11.0, 52.5]));
    assert_eq!(rte.properties, properties);
}
