//! HERE Geocoder backend boundary.
//!
//! Result shapes follow the Geocoder 6.2 JSON response (`Response.View[].Result[]`)
//! with its PascalCase field names.

mod client;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ApiError, Completion};

pub use client::{DEFAULT_HERE_BASE_URL, HereGeocoderClient};

/// Asynchronous HERE geocoder lookups with callback completion.
///
/// Implementations must invoke `callback` at most once, and must not invoke it
/// at all when returning `Err`.
pub trait HereGeocoderApi: Send + Sync {
    /// Free-text search biased towards a proximity circle.
    fn geocode(&self, request: GeocodeRequest, callback: Completion<Vec<GeocodeResult>, HereStatus>) -> Result<(), ApiError>;

    /// Resolve a location by its `LocationId`.
    fn lookup(&self, request: LocationLookupRequest, callback: Completion<Vec<GeocodeResult>, HereStatus>) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Center and radius (meters) passed as the `prox` parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximity {
    pub center: GeoCoordinate,
    pub radius: f64,
}

impl Proximity {
    pub fn to_param(&self) -> String {
        format!("{},{},{}", self.center.latitude, self.center.longitude, self.radius)
    }
}

/// Bounding box passed as the `mapview` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MapView {
    pub top_left: GeoCoordinate,
    pub bottom_right: GeoCoordinate,
}

impl MapView {
    pub fn to_param(&self) -> String {
        format!(
            "{},{};{},{}",
            self.top_left.latitude, self.top_left.longitude, self.bottom_right.latitude, self.bottom_right.longitude
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeRequest {
    pub search_text: String,
    pub proximity: Option<Proximity>,
    pub map_view: Option<MapView>,
    pub max_results: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationLookupRequest {
    pub location_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeocodeResponse {
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseBody {
    #[serde(default)]
    pub view: Vec<ResultView>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultView {
    #[serde(default)]
    pub result: Vec<GeocodeResult>,
}

impl GeocodeResponse {
    /// All results across views, in response order.
    pub fn into_results(self) -> Vec<GeocodeResult> {
        self.response.view.into_iter().flat_map(|view| view.result).collect()
    }
}

/// A single geocoder match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeocodeResult {
    /// Normalized relevance between 0 and 1.
    #[serde(default)]
    pub relevance: Option<f64>,
    /// Distance in meters from the proximity center, when one was given.
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub match_level: Option<String>,
    #[serde(default)]
    pub match_type: Option<String>,
    #[serde(default)]
    pub match_code: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub location_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_position: Option<GeoCoordinate>,
    #[serde(default)]
    pub navigation_position: Vec<GeoCoordinate>,
    #[serde(default)]
    pub map_view: Option<MapView>,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    #[serde(default)]
    pub label: Option<String>,
    /// ISO 3166 alpha-3 country code.
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub subdistrict: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub house_number: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub building: Option<String>,
}

/// Error body returned with non-success HTTP statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(rename = "Details", default)]
    pub details: Option<String>,
}

/// Outcome classification for a geocoder call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HereStatus {
    Ok,
    ZeroResults,
    NotFound,
    /// Any other outcome, named by the error type HERE reported.
    Failed(String),
}

impl HereStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::NotFound => "NOT_FOUND",
            Self::Failed(kind) => kind,
        }
    }
}

impl fmt::Display for HereStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proximity_and_map_view_params() {
        let center = GeoCoordinate {
            latitude: 53.5,
            longitude: 10.0,
        };
        let proximity = Proximity { center, radius: 50000.0 };
        assert_eq!(proximity.to_param(), "53.5,10,50000");

        let view = MapView {
            top_left: GeoCoordinate {
                latitude: 54.0,
                longitude: 9.5,
            },
            bottom_right: GeoCoordinate {
                latitude: 53.0,
                longitude: 10.5,
            },
        };
        assert_eq!(view.to_param(), "54,9.5;53,10.5");
    }

    #[test]
    fn failed_status_displays_error_type() {
        assert_eq!(HereStatus::Failed("PermissionError".into()).to_string(), "PermissionError");
        assert_eq!(HereStatus::ZeroResults.to_string(), "ZERO_RESULTS");
    }

    #[test]
    fn error_body_reads_mixed_case_keys() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"_type":"ns2:Error","type":"PermissionError","subtype":"InvalidCredentials","Details":"invalid app_code"}"#)
                .unwrap();
        assert_eq!(body.error_type.as_deref(), Some("PermissionError"));
        assert_eq!(body.subtype.as_deref(), Some("InvalidCredentials"));
        assert_eq!(body.details.as_deref(), Some("invalid app_code"));
    }
}
