//! Cleanup of feature sequences.
//!
//! Lists assembled from several sources may contain holes, features without a geometry, features whose geometry does
//! not fit their variant and features that were built without knowing their variant. [`normalize`] turns such a list
//! into typed features that can be rendered, keeping the input order.

use crate::feature::{AnyFeature, Feature, FeatureKind};

/// Normalizes a sequence of optional features.
///
/// For every element in order:
/// * `None` is dropped;
/// * features without geometry are dropped;
/// * features without properties, or whose geometry shape does not match the variant, are dropped;
/// * route points are dropped: they only exist as part of a calculated route;
/// * typed features are passed through unchanged, generic features are converted into their typed variant with the
///   same id, bounding box, geometry, properties and unknown members.
///
/// Normalizing the output again gives the same output.
pub fn normalize<I, F>(items: I) -> Vec<Feature>
where
    I: IntoIterator<Item = Option<F>>,
    F: Into<AnyFeature>,
{
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Some(item) => normalize_one(item),
            None => {
                log::debug!("dropped feature #{index}: missing");
                None
            }
        })
        .collect()
}

/// Normalizes a single feature. Returns `None` if the feature should be dropped.
pub fn normalize_one(item: impl Into<AnyFeature>) -> Option<Feature> {
    match item.into() {
        AnyFeature::Typed(feature) => {
            if feature.geometry().is_none() {
                log::debug!("dropped {} feature {:?}: no geometry", feature.kind(), feature.id());
                return None;
            }
            if !feature.has_valid_shape() {
                log::debug!(
                    "dropped {} feature {:?}: geometry does not match the variant",
                    feature.kind(),
                    feature.id()
                );
                return None;
            }

            drop_route_point(feature)
        }
        AnyFeature::Generic(feature) => {
            if feature.geometry.is_none() {
                log::debug!("dropped feature {:?}: no geometry", feature.id);
                return None;
            }

            let id = feature.id.clone();
            match Feature::try_from(feature) {
                Ok(feature) => drop_route_point(feature),
                Err(error) => {
                    log::debug!("dropped feature {id:?}: {error}");
                    None
                }
            }
        }
    }
}

fn drop_route_point(feature: Feature) -> Option<Feature> {
    if feature.kind() == FeatureKind::RtePt {
        log::debug!("dropped {} feature {:?}: route point", feature.kind(), feature.id());
        return None;
    }

    Some(feature)
}
