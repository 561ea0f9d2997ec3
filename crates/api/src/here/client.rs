//! `reqwest`-backed implementation of [`HereGeocoderApi`].

use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use super::{ErrorBody, GeocodeRequest, GeocodeResponse, GeocodeResult, HereGeocoderApi, HereStatus, LocationLookupRequest};
use crate::http::{build_http_client, redacted, spawn_lookup, validate_base_url};
use crate::{ApiError, Completion};

pub const DEFAULT_HERE_BASE_URL: &str = "https://geocoder.api.here.com";

const GEOCODE_PATH: &str = "/6.2/geocode.json";
/// Response generation that includes `LocationId` and match metadata.
const RESPONSE_GENERATION: &str = "9";

/// Client for the HERE Geocoder REST API.
#[derive(Debug, Clone)]
pub struct HereGeocoderClient {
    http: Client,
    base_url: Url,
    app_id: String,
    app_code: String,
    language: Option<String>,
}

impl HereGeocoderClient {
    pub fn new(app_id: impl Into<String>, app_code: impl Into<String>) -> Result<Self, ApiError> {
        let app_id = app_id.into();
        let app_code = app_code.into();
        if app_id.trim().is_empty() || app_code.trim().is_empty() {
            return Err(ApiError::invalid_request("HERE geocoder requires an app id and app code"));
        }
        Ok(Self {
            http: build_http_client()?,
            base_url: validate_base_url(DEFAULT_HERE_BASE_URL)?,
            app_id,
            app_code,
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

    fn endpoint(&self) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(GEOCODE_PATH)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("app_id", &self.app_id);
            query.append_pair("app_code", &self.app_code);
            query.append_pair("gen", RESPONSE_GENERATION);
            if let Some(language) = &self.language {
                query.append_pair("language", language);
            }
        }
        Ok(url)
    }

    /// Build the free-text geocode URL for `request`.
    pub fn geocode_url(&self, request: &GeocodeRequest) -> Result<Url, ApiError> {
        if request.search_text.trim().is_empty() {
            return Err(ApiError::invalid_request("search text must not be empty"));
        }
        let mut url = self.endpoint()?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("searchtext", &request.search_text);
            if let Some(proximity) = &request.proximity {
                query.append_pair("prox", &proximity.to_param());
            }
            if let Some(map_view) = &request.map_view {
                query.append_pair("mapview", &map_view.to_param());
            }
            if let Some(max_results) = request.max_results {
                query.append_pair("maxresults", &max_results.to_string());
            }
        }
        Ok(url)
    }

    /// Build the location id lookup URL for `request`.
    pub fn lookup_url(&self, request: &LocationLookupRequest) -> Result<Url, ApiError> {
        if request.location_id.trim().is_empty() {
            return Err(ApiError::invalid_request("location id must not be empty"));
        }
        let mut url = self.endpoint()?;
        url.query_pairs_mut().append_pair("locationid", &request.location_id);
        Ok(url)
    }

    fn dispatch(&self, url: Url, callback: Completion<Vec<GeocodeResult>, HereStatus>) -> Result<(), ApiError> {
        let http = self.http.clone();
        debug!(url = %redacted(&url), "issuing here geocoder request");
        spawn_lookup(async move {
            let (results, status) = fetch_results(&http, url).await;
            callback(results, status);
        })
    }
}

impl HereGeocoderApi for HereGeocoderClient {
    fn geocode(&self, request: GeocodeRequest, callback: Completion<Vec<GeocodeResult>, HereStatus>) -> Result<(), ApiError> {
        let url = self.geocode_url(&request)?;
        self.dispatch(url, callback)
    }

    fn lookup(&self, request: LocationLookupRequest, callback: Completion<Vec<GeocodeResult>, HereStatus>) -> Result<(), ApiError> {
        let url = self.lookup_url(&request)?;
        self.dispatch(url, callback)
    }
}

/// Perform the request and classify the outcome into a [`HereStatus`].
async fn fetch_results(http: &Client, url: Url) -> (Vec<GeocodeResult>, HereStatus) {
    let response = match http.get(url).send().await {
        Ok(response) => response,
        Err(error) => {
            warn!(error = %error, "here geocoder request failed");
            return (Vec::new(), HereStatus::Failed("UNKNOWN_ERROR".to_string()));
        }
    };

    let http_status = response.status();
    if http_status.is_success() {
        return match response.json::<GeocodeResponse>().await {
            Ok(body) => {
                let results = body.into_results();
                let status = if results.is_empty() { HereStatus::ZeroResults } else { HereStatus::Ok };
                (results, status)
            }
            Err(error) => {
                warn!(error = %error, "here geocoder response could not be decoded");
                (Vec::new(), HereStatus::Failed("UNKNOWN_ERROR".to_string()))
            }
        };
    }

    if http_status == StatusCode::NOT_FOUND {
        return (Vec::new(), HereStatus::NotFound);
    }

    let body = response.json::<ErrorBody>().await.unwrap_or_default();
    let status = classify_error(http_status, &body);
    warn!(
        http_status = %http_status,
        status = %status,
        details = body.details.as_deref().unwrap_or(""),
        "here geocoder reported an error"
    );
    (Vec::new(), status)
}

fn classify_error(http_status: StatusCode, body: &ErrorBody) -> HereStatus {
    match body.error_type.as_deref() {
        Some("ApplicationError") if body.subtype.as_deref() == Some("NotFound") => HereStatus::NotFound,
        Some(kind) if !kind.is_empty() => HereStatus::Failed(kind.to_string()),
        _ => HereStatus::Failed(format!("HTTP_{}", http_status.as_u16())),
    }
}
