//! TomTom search API.

use std::collections::BTreeSet;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{GeocodeError, GeocodeQuery, Parameters};

/// Characters escaped in a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Location the results are biased to.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Center {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

/// Query request for the TomTom geocoding API.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TomTomGeocodeQueryRequest {
    /// Shared search members.
    #[serde(flatten)]
    pub query: GeocodeQuery,
    /// Offset of the first result within the full result set.
    #[serde(
        deserialize_with = "non_negative",
        skip_serializing_if = "Option::is_none"
    )]
    pub offset: Option<u32>,
    /// Location the results are biased to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Center>,
    /// Together with `center`, constrains the results to a circle. In meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,
}

// Negative offsets are ignored.
fn non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let offset = Option::<i64>::deserialize(deserializer)?;
    Ok(offset.and_then(|offset| u32::try_from(offset).ok()))
}

impl TomTomGeocodeQueryRequest {
    /// Creates a request.
    pub fn new(query: GeocodeQuery) -> Self {
        Self {
            query,
            ..Default::default()
        }
    }

    /// Sets the offset of the first result. Negative values are ignored.
    pub fn with_offset(mut self, offset: i64) -> Self {
        if let Ok(offset) = u32::try_from(offset) {
            self.offset = Some(offset);
        }
        self
    }

    /// Restricts the results to a circle.
    pub fn with_circle(mut self, lat: f64, lon: f64, radius: u32) -> Self {
        self.center = Some(Center { lat, lon });
        self.radius = Some(radius);
        self
    }

    /// URL path of the request: `/geocode/<query>.json` with the query percent-encoded.
    pub fn build_path(&self) -> Result<String, GeocodeError> {
        let text = self.query.text()?;
        Ok(format!(
            "/geocode/{}.json",
            utf8_percent_encode(text, PATH_SEGMENT)
        ))
    }

    /// Query parameters of the request.
    pub fn build_parameters(&self) -> Parameters {
        let mut parameters = Parameters::new();
        if let Some(limit) = self.query.limit {
            parameters.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            parameters.push(("ofs", offset.to_string()));
        }
        if let Some(language) = &self.query.language {
            parameters.push(("language", language.to_string()));
        }
        if !self.query.country_codes.is_empty() {
            let countries: BTreeSet<&str> = self
                .query
                .country_codes
                .iter()
                .map(|code| code.as_str())
                .collect();
            parameters.push(("countrySet", Vec::from_iter(countries).join(",")));
        }
        if let (Some(center), Some(radius)) = (self.center, self.radius) {
            parameters.push(("lat", center.lat.to_string()));
            parameters.push(("lon", center.lon.to_string()));
            parameters.push(("radius", radius.to_string()));
        }
        if let Some([min_x, min_y, max_x, max_y]) = self.query.bounds() {
            parameters.push(("topLeft", format!("{max_y},{min_x}")));
            parameters.push(("btmRight", format!("{min_y},{max_x}")));
        }

        log::trace!("TomTom geocode parameters: {parameters:?}");
        parameters
    }
}
