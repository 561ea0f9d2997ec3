//! `reqwest`-backed implementation of [`GooglePlacesApi`].

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{
    FindPlaceFromQueryRequest, FindPlaceResponse, GooglePlacesApi, PlaceDetailsRequest, PlaceDetailsResponse, PlaceResult,
    PlacesServiceStatus,
};
use crate::http::{build_http_client, redacted, spawn_lookup, validate_base_url};
use crate::{ApiError, Completion};

pub const DEFAULT_GOOGLE_BASE_URL: &str = "https://maps.googleapis.com";

const FIND_PLACE_PATH: &str = "/maps/api/place/findplacefromtext/json";
const DETAILS_PATH: &str = "/maps/api/place/details/json";

/// Client for the Google Places JSON web service.
///
/// Lookups run on the caller's Tokio runtime; transport and decoding failures
/// are reported through the callback as `UNKNOWN_ERROR`, mirroring how the
/// service itself reports server-side faults.
#[derive(Debug, Clone)]
pub struct GooglePlacesClient {
    http: Client,
    base_url: Url,
    api_key: String,
    language: Option<String>,
}

impl GooglePlacesClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ApiError::invalid_request("Google Places requires an API key"));
        }
        Ok(Self {
            http: build_http_client()?,
            base_url: validate_base_url(DEFAULT_GOOGLE_BASE_URL)?,
            api_key,
            language: None,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ApiError> {
        self.base_url = validate_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the Find Place From Text URL for `request`.
    pub fn find_place_url(&self, request: &FindPlaceFromQueryRequest) -> Result<Url, ApiError> {
        if request.query.trim().is_empty() {
            return Err(ApiError::invalid_request("query must not be empty"));
        }
        let mut url = self.base_url.join(FIND_PLACE_PATH)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("input", &request.query);
            query.append_pair("inputtype", "textquery");
            if !request.fields.is_empty() {
                query.append_pair("fields", &request.fields.join(","));
            }
            if let Some(bias) = &request.location_bias {
                query.append_pair("locationbias", &bias.to_param());
            }
            if let Some(language) = &self.language {
                query.append_pair("language", language);
            }
            query.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Build the Place Details URL for `request`.
    pub fn details_url(&self, request: &PlaceDetailsRequest) -> Result<Url, ApiError> {
        if request.place_id.trim().is_empty() {
            return Err(ApiError::invalid_request("place id must not be empty"));
        }
        let mut url = self.base_url.join(DETAILS_PATH)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("place_id", &request.place_id);
            if !request.fields.is_empty() {
                query.append_pair("fields", &request.fields.join(","));
            }
            if let Some(language) = &self.language {
                query.append_pair("language", language);
            }
            query.append_pair("key", &self.api_key);
        }
        Ok(url)
    }
}

impl GooglePlacesApi for GooglePlacesClient {
    fn find_place_from_query(
        &self,
        request: FindPlaceFromQueryRequest,
        callback: Completion<Vec<PlaceResult>, PlacesServiceStatus>,
    ) -> Result<(), ApiError> {
        let url = self.find_place_url(&request)?;
        let http = self.http.clone();
        debug!(url = %redacted(&url), "issuing google find place request");

        spawn_lookup(async move {
            match fetch_json::<FindPlaceResponse>(&http, url).await {
                Ok(response) => {
                    if let Some(message) = &response.error_message {
                        warn!(status = %response.status, message = %message, "google find place reported an error");
                    }
                    callback(response.candidates, response.status);
                }
                Err(error) => {
                    warn!(error = %error, "google find place request failed");
                    callback(Vec::new(), PlacesServiceStatus::UnknownError);
                }
            }
        })
    }

    fn get_details(
        &self,
        request: PlaceDetailsRequest,
        callback: Completion<Option<PlaceResult>, PlacesServiceStatus>,
    ) -> Result<(), ApiError> {
        let url = self.details_url(&request)?;
        let http = self.http.clone();
        debug!(url = %redacted(&url), "issuing google place details request");

        spawn_lookup(async move {
            match fetch_json::<PlaceDetailsResponse>(&http, url).await {
                Ok(response) => {
                    if let Some(message) = &response.error_message {
                        warn!(status = %response.status, message = %message, "google place details reported an error");
                    }
                    callback(response.result, response.status);
                }
                Err(error) => {
                    warn!(error = %error, "google place details request failed");
                    callback(None, PlacesServiceStatus::UnknownError);
                }
            }
        })
    }
}

async fn fetch_json<T: DeserializeOwned>(http: &Client, url: Url) -> Result<T, reqwest::Error> {
    http.get(url).send().await?.error_for_status()?.json::<T>().await
}
