//! OpenStreetMap Nominatim search API.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{GeocodeQuery, Parameters};

/// Query request for the Nominatim search API.
///
/// The detail switches default to `true`. Only an explicit `false` turns them off, `null` on the wire counts as
/// `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NominatimGeocodeQueryRequest {
    /// Shared search members.
    #[serde(flatten)]
    pub query: GeocodeQuery,
    /// Include a breakdown of the address into its elements.
    #[serde(default = "enabled", deserialize_with = "true_unless_false")]
    pub address_details: bool,
    /// Include the outline of the place as GeoJSON.
    #[serde(default = "enabled", deserialize_with = "true_unless_false")]
    pub polygon: bool,
    /// Include additional information, e.g. opening hours.
    #[serde(default = "enabled", deserialize_with = "true_unless_false")]
    pub extra_tags: bool,
    /// Include alternative names.
    #[serde(default = "enabled", deserialize_with = "true_unless_false")]
    pub name_details: bool,
    /// Contact address sent along with large numbers of requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

fn enabled() -> bool {
    true
}

fn true_unless_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)? != Some(false))
}

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

impl Default for NominatimGeocodeQueryRequest {
    fn default() -> Self {
        Self::new(GeocodeQuery::default())
    }
}

impl NominatimGeocodeQueryRequest {
    /// Creates a request with all details switched on.
    pub fn new(query: GeocodeQuery) -> Self {
        Self {
            query,
            address_details: true,
            polygon: true,
            extra_tags: true,
            name_details: true,
            email: None,
        }
    }

    /// Sets the contact email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Switches off all details.
    pub fn without_details(mut self) -> Self {
        self.address_details = false;
        self.polygon = false;
        self.extra_tags = false;
        self.name_details = false;
        self
    }

    /// Query parameters of the request.
    pub fn build_parameters(&self) -> Parameters {
        let mut parameters = Parameters::new();
        if let Some(query) = self.query.query.as_deref() {
            parameters.push(("q", query.trim().to_string()));
        }
        parameters.push(("format", "json".to_string()));
        if let Some(language) = &self.query.language {
            parameters.push(("accept-language", language.to_string()));
        }
        if !self.query.country_codes.is_empty() {
            let countries: Vec<String> = self
                .query
                .country_codes
                .iter()
                .map(|code| code.as_str().to_ascii_lowercase())
                .collect();
            parameters.push(("countrycodes", countries.join(",")));
        }
        if let Some([min_x, min_y, max_x, max_y]) = self.query.bounds() {
            parameters.push(("viewbox", format!("{min_x},{min_y},{max_x},{max_y}")));
            parameters.push(("bounded", flag(true)));
        }
        if let Some(limit) = self.query.limit {
            parameters.push(("limit", limit.to_string()));
        }
        parameters.push(("addressdetails", flag(self.address_details)));
        parameters.push(("polygon_geojson", flag(self.polygon)));
        parameters.push(("extratags", flag(self.extra_tags)));
        parameters.push(("namedetails", flag(self.name_details)));
        if let Some(email) = &self.email {
            parameters.push(("email", email.clone()));
        }

        log::trace!("Nominatim geocode parameters: {parameters:?}");
        parameters
    }
}
