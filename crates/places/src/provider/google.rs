//! Adapter over the Google Places backend.

use std::sync::Arc;

use geomap_api::google::{AddressComponent, CircleBias, FindPlaceFromQueryRequest, GooglePlacesApi, LatLngLiteral, PlaceDetailsRequest, PlaceResult};
use geomap_types::{AddressDetails, LatLng, Place, PlaceDetails, Provider};
use tracing::{debug, info, warn};

use super::completion::await_completion;
use super::{PlacesService, non_blank, translate_list, translate_single};
use crate::error::{PlacesError, PlacesResult};
use crate::map_context::MapContext;
use crate::policy::{SearchPolicy, SearchRequest};

/// Fields requested for place details.
const DETAIL_FIELDS: [&str; 5] = ["address_components", "formatted_address", "geometry", "name", "place_id"];

/// [`PlacesService`] backed by Google Places.
pub struct GooglePlacesAdapter {
    api: Arc<dyn GooglePlacesApi>,
    map: Arc<dyn MapContext>,
    policy: SearchPolicy,
}

impl GooglePlacesAdapter {
    pub fn new(api: Arc<dyn GooglePlacesApi>, map: Arc<dyn MapContext>, policy: SearchPolicy) -> Self {
        Self { api, map, policy }
    }

    fn find_place_request(&self, request: &SearchRequest) -> FindPlaceFromQueryRequest {
        let center = request.bias().center();
        FindPlaceFromQueryRequest {
            query: request.query().to_string(),
            fields: self.policy.fields.clone(),
            location_bias: Some(CircleBias {
                center: LatLngLiteral {
                    lat: center.latitude,
                    lng: center.longitude,
                },
                radius: request.bias().radius_meters(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl PlacesService for GooglePlacesAdapter {
    fn provider(&self) -> Provider {
        Provider::Google
    }

    async fn search(&self, needle: &str) -> PlacesResult<Vec<Place>> {
        if needle.trim().is_empty() {
            return Err(PlacesError::invalid_request("search query must not be empty"));
        }
        let center = self.map.center().await?;
        let request = self.policy.request(needle, center)?;
        let native = self.find_place_request(&request);
        debug!(provider = %Provider::Google, query = %request.query(), "searching places");

        let (results, status) = await_completion(|callback| self.api.find_place_from_query(native, callback)).await?;
        let outcome = translate_list(Provider::Google, results, &status, convert_place);
        match &outcome {
            Ok(places) => info!(provider = %Provider::Google, status = %status, result_count = places.len(), "place search completed"),
            Err(error) => warn!(provider = %Provider::Google, status = %status, error = %error, "place search failed"),
        }
        outcome
    }

    async fn get(&self, place_id: &str) -> PlacesResult<Option<PlaceDetails>> {
        if place_id.trim().is_empty() {
            return Err(PlacesError::invalid_request("place id must not be empty"));
        }
        let native = PlaceDetailsRequest {
            place_id: place_id.to_string(),
            fields: DETAIL_FIELDS.iter().map(|field| field.to_string()).collect(),
        };
        debug!(provider = %Provider::Google, place_id = %place_id, "fetching place details");

        let (result, status) = await_completion(|callback| self.api.get_details(native, callback)).await?;
        let outcome = translate_single(Provider::Google, result, &status, convert_details);
        match &outcome {
            Ok(details) => info!(provider = %Provider::Google, status = %status, found = details.is_some(), "place details completed"),
            Err(error) => warn!(provider = %Provider::Google, status = %status, error = %error, "place details failed"),
        }
        outcome
    }
}

fn convert_place(raw: PlaceResult) -> PlacesResult<Place> {
    let id = non_blank(raw.place_id).ok_or_else(|| PlacesError::conversion(Provider::Google, "result is missing place_id"))?;
    let location = raw
        .geometry
        .and_then(|geometry| geometry.location)
        .ok_or_else(|| PlacesError::conversion(Provider::Google, format!("place '{}' is missing geometry", id)))?;

    Ok(Place {
        provider: Provider::Google,
        id,
        name: raw.name.unwrap_or_default(),
        formatted_address: raw.formatted_address.unwrap_or_default(),
        location: LatLng::new(location.lat, location.lng),
    })
}

fn convert_details(raw: PlaceResult) -> PlacesResult<PlaceDetails> {
    let mut address = address_from_components(&raw.address_components);
    address.label = non_blank(raw.formatted_address.clone());

    let mut details = PlaceDetails::new(convert_place(raw)?);
    details.address = address;
    Ok(details)
}

/// Pick address parts out of Google's typed address components.
fn address_from_components(components: &[AddressComponent]) -> AddressDetails {
    let long_name = |kind: &str| {
        components
            .iter()
            .find(|component| component.has_type(kind))
            .and_then(|component| non_blank(Some(component.long_name.clone())))
    };

    AddressDetails {
        label: None,
        country: long_name("country"),
        state: long_name("administrative_area_level_1"),
        county: long_name("administrative_area_level_2"),
        city: long_name("locality").or_else(|| long_name("postal_town")),
        district: long_name("sublocality").or_else(|| long_name("neighborhood")),
        street: long_name("route"),
        house_number: long_name("street_number"),
        postal_code: long_name("postal_code"),
    }
}
