//! Adapter over the HERE Geocoder backend.
//!
//! HERE has no separate details endpoint; `get` looks the place up by its
//! location id and reads the address and match metadata of the first hit.

use std::sync::Arc;

use geomap_api::here::{Address, GeoCoordinate, GeocodeRequest, GeocodeResult, HereGeocoderApi, LocationLookupRequest, MapView, Proximity};
use geomap_types::{AddressDetails, LatLng, MatchQuality, Place, PlaceDetails, Provider};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::completion::await_completion;
use super::{PlacesService, non_blank, translate_list, translate_single};
use crate::error::{PlacesError, PlacesResult};
use crate::map_context::MapContext;
use crate::policy::{SearchPolicy, SearchRequest};

/// [`PlacesService`] backed by the HERE Geocoder.
pub struct HerePlacesAdapter {
    api: Arc<dyn HereGeocoderApi>,
    map: Arc<dyn MapContext>,
    policy: SearchPolicy,
}

impl HerePlacesAdapter {
    pub fn new(api: Arc<dyn HereGeocoderApi>, map: Arc<dyn MapContext>, policy: SearchPolicy) -> Self {
        Self { api, map, policy }
    }

    fn geocode_request(&self, request: &SearchRequest) -> GeocodeRequest {
        let bias = request.bias();
        let bounds = bias.bounds(&self.policy);
        GeocodeRequest {
            search_text: request.query().to_string(),
            proximity: Some(Proximity {
                center: coordinate(bias.center()),
                radius: bias.radius_meters(),
            }),
            map_view: Some(MapView {
                top_left: coordinate(bounds.north_west),
                bottom_right: coordinate(bounds.south_east),
            }),
            max_results: None,
        }
    }
}

#[async_trait::async_trait]
impl PlacesService for HerePlacesAdapter {
    fn provider(&self) -> Provider {
        Provider::Here
    }

    async fn search(&self, needle: &str) -> PlacesResult<Vec<Place>> {
        if needle.trim().is_empty() {
            return Err(PlacesError::invalid_request("search query must not be empty"));
        }
        let center = self.map.center().await?;
        let request = self.policy.request(needle, center)?;
        let native = self.geocode_request(&request);
        debug!(provider = %Provider::Here, query = %request.query(), "searching places");

        let (results, status) = await_completion(|callback| self.api.geocode(native, callback)).await?;
        let outcome = translate_list(Provider::Here, results, &status, convert_place);
        match &outcome {
            Ok(places) => info!(provider = %Provider::Here, status = %status, result_count = places.len(), "place search completed"),
            Err(error) => warn!(provider = %Provider::Here, status = %status, error = %error, "place search failed"),
        }
        outcome
    }

    async fn get(&self, place_id: &str) -> PlacesResult<Option<PlaceDetails>> {
        if place_id.trim().is_empty() {
            return Err(PlacesError::invalid_request("place id must not be empty"));
        }
        let native = LocationLookupRequest {
            location_id: place_id.to_string(),
        };
        debug!(provider = %Provider::Here, place_id = %place_id, "looking up location");

        let (results, status) = await_completion(|callback| self.api.lookup(native, callback)).await?;
        let outcome = translate_single(Provider::Here, results.into_iter().next(), &status, convert_details);
        match &outcome {
            Ok(details) => info!(provider = %Provider::Here, status = %status, found = details.is_some(), "place details completed"),
            Err(error) => warn!(provider = %Provider::Here, status = %status, error = %error, "place details failed"),
        }
        outcome
    }
}

fn coordinate(point: LatLng) -> GeoCoordinate {
    GeoCoordinate {
        latitude: point.latitude,
        longitude: point.longitude,
    }
}

fn convert_place(raw: GeocodeResult) -> PlacesResult<Place> {
    let location = raw
        .location
        .ok_or_else(|| PlacesError::conversion(Provider::Here, "result is missing its location"))?;
    let id = non_blank(location.location_id).ok_or_else(|| PlacesError::conversion(Provider::Here, "result is missing LocationId"))?;
    let position = location
        .display_position
        .ok_or_else(|| PlacesError::conversion(Provider::Here, format!("location '{}' is missing DisplayPosition", id)))?;
    let label = location.address.and_then(|address| non_blank(address.label));

    Ok(Place {
        provider: Provider::Here,
        id,
        name: non_blank(location.name).or_else(|| label.clone()).unwrap_or_default(),
        formatted_address: label.unwrap_or_default(),
        location: LatLng::new(position.latitude, position.longitude),
    })
}

fn convert_details(raw: GeocodeResult) -> PlacesResult<PlaceDetails> {
    let quality = match_quality(&raw);
    let address = raw
        .location
        .as_ref()
        .and_then(|location| location.address.clone())
        .map(address_details)
        .unwrap_or_default();

    let mut details = PlaceDetails::new(convert_place(raw)?);
    details.address = address;
    details.match_quality = quality;
    Ok(details)
}

fn address_details(address: Address) -> AddressDetails {
    AddressDetails {
        label: non_blank(address.label),
        country: non_blank(address.country),
        state: non_blank(address.state),
        county: non_blank(address.county),
        city: non_blank(address.city),
        district: non_blank(address.district),
        street: non_blank(address.street),
        house_number: non_blank(address.house_number),
        postal_code: non_blank(address.postal_code),
    }
}

/// Match metadata, or `None` when HERE reported none of it.
fn match_quality(raw: &GeocodeResult) -> Option<MatchQuality> {
    let quality = MatchQuality {
        relevance: raw.relevance.filter(|score| (0.0..=1.0).contains(score)),
        level: raw.match_level.as_deref().and_then(parse_wire_enum),
        match_type: raw.match_type.as_deref().and_then(parse_wire_enum),
        code: raw.match_code.as_deref().and_then(parse_wire_enum),
    };
    (quality != MatchQuality::default()).then_some(quality)
}

/// HERE spells match enums in camelCase, same as the canonical model.
/// Unknown values are dropped rather than failing the call.
fn parse_wire_enum<T: DeserializeOwned>(value: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(value.to_string())).ok()
}
