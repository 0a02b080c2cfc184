//! Peregrinus is the feature model of a map application for waypoints, tracks and routes. It reads and writes
//! GeoJSON features whose `properties` carry a `_type` discriminator selecting one of four variants.
//!
//! # Quick start
//!
//! ```no_run
//! use peregrinus::feature::{Feature, FeatureDecoder, FeatureKind};
//!
//! let feature = FeatureDecoder::new().decode_str(r#"{
//!     "type": "Feature",
//!     "geometry": {"type": "Point", "coordinates": [8.8, 53.1]},
//!     "properties": {"_type": "Wpt", "name": "Bremen"},
//!     "source": "import"
//! }"#)?;
//!
//! assert_eq!(feature.kind(), FeatureKind::Wpt);
//! assert_eq!(feature.name(), Some("Bremen"));
//!
//! // Unknown members are written back.
//! let json = serde_json::to_string(&feature)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Main components
//!
//! * [`Feature`](feature::Feature): a GeoJSON feature of one of the variants
//!   [`Wpt`](feature::Wpt), [`Trk`](feature::Trk), [`Rte`](feature::Rte) and [`RtePt`](feature::RtePt). Each variant
//!   requires a geometry shape: `Point` for waypoints and route points, `MultiLineString` for tracks and routes.
//! * [`FeatureDecoder`](feature::FeatureDecoder) reads features from JSON text, bytes, readers or parsed values. The
//!   `Serialize` and `Deserialize` implementations of the feature types make them usable inside any serde document.
//! * [`normalize`] filters and repairs sequences of features coming from different sources.
//! * [`tree`] and [`rte_calculation`] are the documents built around features: the folder tree of a user and the
//!   request to calculate a route.
//!
//! Value objects shared with other services (access control lists, settings, colors) are in the
//! [`peregrinus_types`] crate, which is re-exported here.

pub mod error;
pub mod feature;
pub mod normalize;
pub mod rte_calculation;
pub mod tree;

pub use error::{FeatureError, MemberError, PropertiesError, RteCalculationError};
pub use feature::{AnyFeature, Feature, FeatureDecoder, FeatureKind, GenericFeature, TypedFeature};
pub use normalize::{normalize, normalize_one};
pub use peregrinus_types;
