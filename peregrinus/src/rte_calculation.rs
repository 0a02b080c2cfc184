//! Request to calculate a route through a list of points.

use geojson::Value;
use peregrinus_types::LanguageTag;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::RteCalculationError;
use crate::feature::Feature;

/// Route calculation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RteCalculationRequest {
    /// Points to pass, from start to destination. Waypoints or route points.
    #[serde(default)]
    pub rte_pts: Vec<Feature>,
    /// Language of the instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageTag>,
    /// Departure or arrival time.
    #[serde(default = "OffsetDateTime::now_utc", with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    /// If `true`, `time` is the departure time, otherwise it is the arrival time.
    #[serde(default = "default_true")]
    pub time_is_departure_time: bool,
}

fn default_true() -> bool {
    true
}

impl RteCalculationRequest {
    /// Creates a request to depart now.
    pub fn new(rte_pts: Vec<Feature>) -> Self {
        Self {
            rte_pts,
            language: None,
            time: OffsetDateTime::now_utc(),
            time_is_departure_time: true,
        }
    }

    /// Sets the language of the instructions.
    pub fn with_language(mut self, language: LanguageTag) -> Self {
        self.language = Some(language);
        self
    }

    /// Sets the time of arrival.
    pub fn arriving_at(mut self, time: OffsetDateTime) -> Self {
        self.time = time;
        self.time_is_departure_time = false;
        self
    }

    /// Sets the time of departure.
    pub fn departing_at(mut self, time: OffsetDateTime) -> Self {
        self.time = time;
        self.time_is_departure_time = true;
        self
    }

    /// Checks that the request names at least two locations and that every one of them is a point.
    pub fn validate(&self) -> Result<(), RteCalculationError> {
        if self.rte_pts.len() < 2 {
            return Err(RteCalculationError::TooFewPoints(self.rte_pts.len()));
        }

        for (index, feature) in self.rte_pts.iter().enumerate() {
            let kind = feature.kind();
            if !kind.is_point_like() {
                return Err(RteCalculationError::NotAPoint { index, kind });
            }
            if !matches!(feature.geometry().map(|g| &g.value), Some(Value::Point(_))) {
                return Err(RteCalculationError::MissingLocation { index });
            }
        }

        Ok(())
    }
}
