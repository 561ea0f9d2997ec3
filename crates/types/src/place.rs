//! Canonical place records.

use serde::{Deserialize, Serialize};

use crate::Provider;

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Whether both components are finite and inside the valid degree ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Provider-agnostic search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Backend that issued `id`.
    pub provider: Provider,
    /// Opaque backend-native identifier, never empty.
    pub id: String,
    pub name: String,
    pub formatted_address: String,
    pub location: LatLng,
}

impl Place {
    /// Two records describe the same real-world entity only when both the
    /// provider and the identifier match.
    pub fn same_entity(&self, other: &Place) -> bool {
        self.provider == other.provider && self.id == other.id
    }
}

/// A [`Place`] enriched with whatever address decomposition and match
/// metadata the backend supplied. Missing fields stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetails {
    #[serde(flatten)]
    pub place: Place,
    #[serde(default)]
    pub address: AddressDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_quality: Option<MatchQuality>,
}

impl PlaceDetails {
    pub fn new(place: Place) -> Self {
        Self {
            place,
            address: AddressDetails::default(),
            match_quality: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDetails {
    /// Assembled address for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl AddressDetails {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// How well a result matched the query, when the backend reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchQuality {
    /// Normalized relevance score in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<MatchLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<MatchType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<MatchCode>,
}

/// The most detailed address field that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchLevel {
    Country,
    State,
    County,
    City,
    District,
    Street,
    Intersection,
    HouseNumber,
    PostalCode,
    Landmark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchType {
    /// Matched an exact point address.
    PointAddress,
    /// Position was interpolated along a street segment.
    Interpolated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchCode {
    Exact,
    Ambiguous,
    UpHierarchy,
    AmbiguousUpHierarchy,
}
