//! Google Places backend boundary.
//!
//! Request and result shapes follow the Places JSON web service field names
//! (`place_id`, `formatted_address`, `geometry.location.{lat,lng}`).

mod client;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{ApiError, Completion};

pub use client::{DEFAULT_GOOGLE_BASE_URL, GooglePlacesClient};

/// Asynchronous Google Places lookups with callback completion.
///
/// Implementations must invoke `callback` at most once, and must not invoke it
/// at all when returning `Err`.
pub trait GooglePlacesApi: Send + Sync {
    fn find_place_from_query(
        &self,
        request: FindPlaceFromQueryRequest,
        callback: Completion<Vec<PlaceResult>, PlacesServiceStatus>,
    ) -> Result<(), ApiError>;

    fn get_details(
        &self,
        request: PlaceDetailsRequest,
        callback: Completion<Option<PlaceResult>, PlacesServiceStatus>,
    ) -> Result<(), ApiError>;
}

/// `lat`/`lng` pair as used by Google payloads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngLiteral {
    pub lat: f64,
    pub lng: f64,
}

/// Circular area used to bias, not restrict, results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleBias {
    pub center: LatLngLiteral,
    pub radius: f64,
}

impl CircleBias {
    /// Wire form accepted by the `locationbias` parameter.
    pub fn to_param(&self) -> String {
        format!("circle:{}@{},{}", self.radius, self.center.lat, self.center.lng)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FindPlaceFromQueryRequest {
    pub query: String,
    pub fields: Vec<String>,
    pub location_bias: Option<CircleBias>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetailsRequest {
    pub place_id: String,
    /// Restrict the returned fields; empty requests every field.
    pub fields: Vec<String>,
}

/// Raw place record. Every field is optional on the wire and depends on the
/// requested field set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub location: Option<LatLngLiteral>,
    #[serde(default)]
    pub viewport: Option<Viewport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub northeast: LatLngLiteral,
    pub southwest: LatLngLiteral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    pub fn has_type(&self, kind: &str) -> bool {
        self.types.iter().any(|t| t == kind)
    }
}

/// Response body of `findplacefromtext/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct FindPlaceResponse {
    #[serde(default)]
    pub candidates: Vec<PlaceResult>,
    pub status: PlacesServiceStatus,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Response body of `details/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetailsResponse {
    #[serde(default)]
    pub result: Option<PlaceResult>,
    pub status: PlacesServiceStatus,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Status vocabulary reported by the Places service.
///
/// Values outside the documented set are preserved in `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum PlacesServiceStatus {
    Ok,
    ZeroResults,
    NotFound,
    InvalidRequest,
    OverQueryLimit,
    RequestDenied,
    UnknownError,
    Unrecognized(String),
}

impl PlacesServiceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::NotFound => "NOT_FOUND",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::RequestDenied => "REQUEST_DENIED",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for PlacesServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for PlacesServiceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "OK" => Self::Ok,
            "ZERO_RESULTS" => Self::ZeroResults,
            "NOT_FOUND" => Self::NotFound,
            "INVALID_REQUEST" => Self::InvalidRequest,
            "OVER_QUERY_LIMIT" => Self::OverQueryLimit,
            "REQUEST_DENIED" => Self::RequestDenied,
            "UNKNOWN_ERROR" => Self::UnknownError,
            _ => Self::Unrecognized(value),
        }
    }
}

impl FromStr for PlacesServiceStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_wire_values() {
        for raw in ["OK", "ZERO_RESULTS", "NOT_FOUND", "OVER_QUERY_LIMIT", "REQUEST_DENIED"] {
            let status: PlacesServiceStatus = raw.parse().unwrap();
            assert_eq!(status.to_string(), raw);
        }
        let odd = PlacesServiceStatus::from("SOMETHING_NEW".to_string());
        assert_eq!(odd, PlacesServiceStatus::Unrecognized("SOMETHING_NEW".into()));
        assert_eq!(odd.to_string(), "SOMETHING_NEW");
    }

    #[test]
    fn circle_bias_param_format() {
        let bias = CircleBias {
            center: LatLngLiteral { lat: 53.55, lng: 9.99 },
            radius: 50000.0,
        };
        assert_eq!(bias.to_param(), "circle:50000@53.55,9.99");
    }

    #[test]
    fn place_result_tolerates_missing_geometry() {
        let raw: PlaceResult = serde_json::from_str(r#"{"name":"Nowhere","place_id":"x1"}"#).unwrap();
        assert!(raw.geometry.is_none());
        assert!(raw.address_components.is_empty());
    }
}
