//! Search policy and request construction.

use geomap_types::LatLng;

use crate::error::{PlacesError, PlacesResult};

/// Radius of the bias circle applied to every search.
pub const DEFAULT_SEARCH_RADIUS_METERS: f64 = 50_000.0;

/// Degrees latitude per meter, for a rough approximation of view bounds
/// given in meters.
pub const DEGREES_PER_METER_LAT: f64 = 0.000008998719243599958;

/// Smallest radius used when deriving view bounds.
pub const MINIMAL_LOCATION_BOUND_METERS: f64 = 500.0;

/// Fields requested from backends that support field selection.
const SEARCH_FIELDS: [&str; 4] = ["formatted_address", "name", "place_id", "geometry"];

/// Immutable constants injected into every adapter at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPolicy {
    pub radius_meters: f64,
    pub degrees_per_meter_lat: f64,
    pub minimal_location_bound_meters: f64,
    pub fields: Vec<String>,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            radius_meters: DEFAULT_SEARCH_RADIUS_METERS,
            degrees_per_meter_lat: DEGREES_PER_METER_LAT,
            minimal_location_bound_meters: MINIMAL_LOCATION_BOUND_METERS,
            fields: SEARCH_FIELDS.iter().map(|field| field.to_string()).collect(),
        }
    }
}

impl SearchPolicy {
    /// Build a validated request for `query` biased around `center`.
    pub fn request(&self, query: &str, center: LatLng) -> PlacesResult<SearchRequest> {
        SearchRequest::new(query, LocationBias::new(center, self.radius_meters)?)
    }
}

/// Center and radius used to prioritize, not filter, results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationBias {
    center: LatLng,
    radius_meters: f64,
}

impl LocationBias {
    pub fn new(center: LatLng, radius_meters: f64) -> PlacesResult<Self> {
        if !center.is_valid() {
            return Err(PlacesError::invalid_request(format!(
                "bias center {},{} is not a valid coordinate",
                center.latitude, center.longitude
            )));
        }
        if !radius_meters.is_finite() || radius_meters <= 0.0 {
            return Err(PlacesError::invalid_request(format!(
                "bias radius must be a positive number of meters, got {}",
                radius_meters
            )));
        }
        Ok(Self { center, radius_meters })
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    /// Approximate bounding box around the bias circle.
    ///
    /// The latitude span uses the policy's degrees-per-meter constant; the
    /// longitude span is widened by `1 / cos(latitude)`. The radius never drops
    /// below the policy's minimal bound, and the box is clamped to valid degrees.
    pub fn bounds(&self, policy: &SearchPolicy) -> BoundingBox {
        let radius = self.radius_meters.max(policy.minimal_location_bound_meters);
        let lat_delta = radius * policy.degrees_per_meter_lat;
        let cos_lat = self.center.latitude.to_radians().cos().abs().max(f64::EPSILON);
        let lng_delta = (lat_delta / cos_lat).min(180.0);

        BoundingBox {
            north_west: LatLng::new(
                (self.center.latitude + lat_delta).min(90.0),
                (self.center.longitude - lng_delta).max(-180.0),
            ),
            south_east: LatLng::new(
                (self.center.latitude - lat_delta).max(-90.0),
                (self.center.longitude + lng_delta).min(180.0),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub north_west: LatLng,
    pub south_east: LatLng,
}

/// A validated, provider-agnostic search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    query: String,
    bias: LocationBias,
}

impl SearchRequest {
    pub fn new(query: &str, bias: LocationBias) -> PlacesResult<Self> {
        if query.trim().is_empty() {
            return Err(PlacesError::invalid_request("search query must not be empty"));
        }
        Ok(Self {
            query: query.to_string(),
            bias,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn bias(&self) -> &LocationBias {
        &self.bias
    }
}
