//! Provider selection.
//!
//! [`GeoMapPlacesService`] picks exactly one adapter when it is constructed and
//! forwards every call to it. Callers never see which backend answered except
//! through [`PlacesService::provider`] and the `provider` tag on each place.

use std::fmt;
use std::sync::Arc;

use geomap_api::google::{GooglePlacesApi, GooglePlacesClient};
use geomap_api::here::{HereGeocoderApi, HereGeocoderClient};
use geomap_types::{Place, PlaceDetails, Provider};
use tracing::info;

use crate::config::{ConfigError, PlacesConfig};
use crate::error::PlacesResult;
use crate::map_context::MapContext;
use crate::policy::SearchPolicy;
use crate::provider::{GooglePlacesAdapter, HerePlacesAdapter, PlacesService};

/// Backend SDK handles available to the facade.
///
/// Only the handle for the selected provider is required.
#[derive(Clone, Default)]
pub struct Backends {
    pub google: Option<Arc<dyn GooglePlacesApi>>,
    pub here: Option<Arc<dyn HereGeocoderApi>>,
}

impl Backends {
    pub fn with_google(mut self, api: Arc<dyn GooglePlacesApi>) -> Self {
        self.google = Some(api);
        self
    }

    pub fn with_here(mut self, api: Arc<dyn HereGeocoderApi>) -> Self {
        self.here = Some(api);
        self
    }
}

impl fmt::Debug for Backends {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backends")
            .field("google", &self.google.is_some())
            .field("here", &self.here.is_some())
            .finish()
    }
}

/// Place search service bound to one backend for its whole lifetime.
pub struct GeoMapPlacesService {
    inner: Box<dyn PlacesService>,
}

impl GeoMapPlacesService {
    /// Select the adapter named by `provider_id` (case-insensitive).
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownProvider`] when the id names no supported backend,
    /// [`ConfigError::MissingBackend`] when `backends` lacks its handle.
    pub fn new(provider_id: &str, map: Arc<dyn MapContext>, backends: Backends, policy: SearchPolicy) -> Result<Self, ConfigError> {
        let provider = parse_provider(provider_id)?;
        let inner: Box<dyn PlacesService> = match provider {
            Provider::Google => {
                let api = backends.google.ok_or(ConfigError::MissingBackend { provider })?;
                Box::new(GooglePlacesAdapter::new(api, map, policy))
            }
            Provider::Here => {
                let api = backends.here.ok_or(ConfigError::MissingBackend { provider })?;
                Box::new(HerePlacesAdapter::new(api, map, policy))
            }
        };
        info!(provider = %provider, "place search provider selected");
        Ok(Self { inner })
    }

    /// Build the HTTP client for the configured provider and select its adapter.
    pub fn from_config(config: &PlacesConfig, map: Arc<dyn MapContext>) -> Result<Self, ConfigError> {
        let provider = parse_provider(&config.provider)?;
        let backends = match provider {
            Provider::Google => {
                let api_key = required(provider, "apiKey", &config.auth.api_key)?;
                let mut client = GooglePlacesClient::new(api_key)?.with_language(config.language.clone());
                if let Some(base_url) = &config.endpoints.google_base_url {
                    client = client.with_base_url(base_url)?;
                }
                Backends::default().with_google(Arc::new(client))
            }
            Provider::Here => {
                let app_id = required(provider, "appId", &config.auth.app_id)?;
                let app_code = required(provider, "appCode", &config.auth.app_code)?;
                let mut client = HereGeocoderClient::new(app_id, app_code)?.with_language(config.language.clone());
                if let Some(base_url) = &config.endpoints.here_base_url {
                    client = client.with_base_url(base_url)?;
                }
                Backends::default().with_here(Arc::new(client))
            }
        };
        Self::new(provider.as_str(), map, backends, SearchPolicy::default())
    }
}

fn parse_provider(provider_id: &str) -> Result<Provider, ConfigError> {
    provider_id.trim().parse().map_err(|_| ConfigError::UnknownProvider {
        value: provider_id.to_string(),
    })
}

fn required<'a>(provider: Provider, field: &'static str, value: &'a Option<String>) -> Result<&'a str, ConfigError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingCredential { provider, field })
}

#[async_trait::async_trait]
impl PlacesService for GeoMapPlacesService {
    fn provider(&self) -> Provider {
        self.inner.provider()
    }

    async fn search(&self, needle: &str) -> PlacesResult<Vec<Place>> {
        self.inner.search(needle).await
    }

    async fn get(&self, place_id: &str) -> PlacesResult<Option<PlaceDetails>> {
        self.inner.get(place_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_context::FixedCenter;
    use geomap_types::LatLng;

    fn map() -> Arc<dyn MapContext> {
        Arc::new(FixedCenter(LatLng::new(53.55, 9.99)))
    }

    #[test]
    fn unknown_provider_fails_at_construction() {
        let result = GeoMapPlacesService::new("bing", map(), Backends::default(), SearchPolicy::default());
        assert!(matches!(result, Err(ConfigError::UnknownProvider { ref value }) if value == "bing"));
    }

    #[test]
    fn selected_provider_needs_its_backend() {
        let result = GeoMapPlacesService::new("HERE", map(), Backends::default(), SearchPolicy::default());
        assert!(matches!(result, Err(ConfigError::MissingBackend { provider: Provider::Here })));
    }

    #[test]
    fn from_config_requires_credentials() {
        let config = PlacesConfig::default();
        let result = GeoMapPlacesService::from_config(&config, map());
        assert!(matches!(
            result,
            Err(ConfigError::MissingCredential {
                provider: Provider::Google,
                field: "apiKey"
            })
        ));

        let config = PlacesConfig {
            provider: "here".into(),
            ..Default::default()
        };
        let result = GeoMapPlacesService::from_config(&config, map());
        assert!(matches!(result, Err(ConfigError::MissingCredential { field: "appId", .. })));
    }

    #[test]
    fn from_config_builds_selected_client() {
        let mut config = PlacesConfig {
            provider: "here".into(),
            language: Some("de".into()),
            ..Default::default()
        };
        config.auth.app_id = Some("id".into());
        config.auth.app_code = Some("code".into());
        config.endpoints.here_base_url = Some("http://localhost:8080".into());

        let service = GeoMapPlacesService::from_config(&config, map()).unwrap();
        assert_eq!(service.provider(), Provider::Here);
    }
}
