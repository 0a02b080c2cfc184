//! Geocoding query requests.
//!
//! A [`GeocodeQueryRequest`] describes a place search for one of the supported providers. The request types know
//! how to turn themselves into the URL path and query parameters of the provider's HTTP API. Sending the request is
//! left to the caller.
//!
//! ```no_run
//! use peregrinus_geocode::{GeocodeQuery, TomTomGeocodeQueryRequest};
//!
//! let request = TomTomGeocodeQueryRequest::new(GeocodeQuery::new("Am Wall 1, Bremen")).with_offset(10);
//! let path = request.build_path()?;
//! let parameters = request.build_parameters();
//! # Ok::<(), peregrinus_geocode::GeocodeError>(())
//! ```

use peregrinus_types::{LanguageTag, TwoLetterCountryCode};
use serde::{Deserialize, Serialize};

mod error;
pub mod nominatim;
pub mod tomtom;

pub use error::GeocodeError;
pub use nominatim::NominatimGeocodeQueryRequest;
pub use tomtom::{Center, TomTomGeocodeQueryRequest};

/// Query parameters as ordered name/value pairs.
pub type Parameters = Vec<(&'static str, String)>;

/// Search members shared by all providers.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeocodeQuery {
    /// Preferred language of the results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageTag>,
    /// Area to search in: `[min_x, min_y, max_x, max_y]` (south-west and north-east corners).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<Vec<f64>>,
    /// Countries to search in.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub country_codes: Vec<TwoLetterCountryCode>,
    /// Maximum number of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Free form query text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl GeocodeQuery {
    /// Creates a query for the given text.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }

    /// Sets the language.
    pub fn with_language(mut self, language: LanguageTag) -> Self {
        self.language = Some(language);
        self
    }

    /// Sets the bounding box.
    pub fn with_bounding_box(mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        self.bounding_box = Some(vec![min_x, min_y, max_x, max_y]);
        self
    }

    /// Adds a country to search in.
    pub fn with_country(mut self, country: TwoLetterCountryCode) -> Self {
        self.country_codes.push(country);
        self
    }

    /// Sets the maximum number of results.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The query text, if it is not blank.
    pub fn text(&self) -> Result<&str, GeocodeError> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .ok_or(GeocodeError::MissingQuery)
    }

    /// The four corners of the bounding box, if one is set and well formed.
    pub(crate) fn bounds(&self) -> Option<[f64; 4]> {
        match self.bounding_box.as_deref() {
            Some(&[min_x, min_y, max_x, max_y]) => Some([min_x, min_y, max_x, max_y]),
            _ => None,
        }
    }

    /// Checks that the query has a text and that the bounding box, if set, has four values with the minimum corner
    /// first.
    pub fn validate(&self) -> Result<(), GeocodeError> {
        self.text()?;
        if let Some(bounding_box) = &self.bounding_box {
            match self.bounds() {
                Some([min_x, min_y, max_x, max_y]) if min_x <= max_x && min_y <= max_y => {}
                _ => return Err(GeocodeError::InvalidBoundingBox(bounding_box.clone())),
            }
        }

        Ok(())
    }
}

/// Query request for one of the supported providers, tagged with `_type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum GeocodeQueryRequest {
    /// OpenStreetMap Nominatim.
    Nominatim(NominatimGeocodeQueryRequest),
    /// TomTom search API.
    TomTom(TomTomGeocodeQueryRequest),
}

impl GeocodeQueryRequest {
    /// Search members shared by all providers.
    pub fn query(&self) -> &GeocodeQuery {
        match self {
            GeocodeQueryRequest::Nominatim(request) => &request.query,
            GeocodeQueryRequest::TomTom(request) => &request.query,
        }
    }

    /// See [`GeocodeQuery::validate`].
    pub fn validate(&self) -> Result<(), GeocodeError> {
        self.query().validate()
    }

    /// Query parameters of the provider's API.
    pub fn build_parameters(&self) -> Parameters {
        match self {
            GeocodeQueryRequest::Nominatim(request) => request.build_parameters(),
            GeocodeQueryRequest::TomTom(request) => request.build_parameters(),
        }
    }
}

impl From<NominatimGeocodeQueryRequest> for GeocodeQueryRequest {
    fn from(value: NominatimGeocodeQueryRequest) -> Self {
        Self::Nominatim(value)
    }
}

impl From<TomTomGeocodeQueryRequest> for GeocodeQueryRequest {
    fn from(value: TomTomGeocodeQueryRequest) -> Self {
        Self::TomTom(value)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn query_text_must_not_be_blank() {
        assert_eq!(GeocodeQuery::new(" Bremen ").text(), Ok("Bremen"));
        assert_eq!(GeocodeQuery::new("  ").text(), Err(GeocodeError::MissingQuery));
        assert_eq!(GeocodeQuery::default().validate(), Err(GeocodeError::MissingQuery));
    }

    #[test]
    fn bounding_box_validation() {
        let query = GeocodeQuery::new("Bremen").with_bounding_box(8.5, 53.0, 9.0, 53.2);
        assert_eq!(query.validate(), Ok(()));

        let query = GeocodeQuery::new("Bremen").with_bounding_box(9.0, 53.0, 8.5, 53.2);
        assert_matches!(query.validate(), Err(GeocodeError::InvalidBoundingBox(_)));

        let query = GeocodeQuery {
            bounding_box: Some(vec![8.5, 53.0]),
            ..GeocodeQuery::new("Bremen")
        };
        assert_matches!(query.validate(), Err(GeocodeError::InvalidBoundingBox(b)) if b.len() == 2);
    }

    #[test]
    fn requests_are_tagged() {
        let request: GeocodeQueryRequest = serde_json::from_value(json!({
            "_type": "TomTom",
            "query": "Bremen",
            "countryCodes": ["de"],
            "offset": 5,
        }))
        .unwrap();

        let GeocodeQueryRequest::TomTom(tomtom) = &request else {
            panic!("expected a TomTom request, got {request:?}");
        };
        assert_eq!(tomtom.offset, Some(5));
        assert_eq!(request.query().country_codes[0].as_str(), "DE");
        assert_eq!(request.validate(), Ok(()));

        let request: GeocodeQueryRequest =
            serde_json::from_value(json!({"_type": "Nominatim", "query": "Bremen"})).unwrap();
        assert_matches!(request, GeocodeQueryRequest::Nominatim(_));
        assert_eq!(serde_json::to_value(&request).unwrap()["_type"], "Nominatim");
    }
}
