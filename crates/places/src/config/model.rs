//! Data models for place search configuration.

use geomap_api::ApiError;
use geomap_types::Provider;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{InterpolationError, ValidationError};

/// Top-level `places.json` contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlacesConfig {
    /// Provider identifier, matched case-insensitively when the facade is built.
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default)]
    pub auth: AuthConfig,

    /// Preferred result language passed to the backend, e.g. "de" or "en-US".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default)]
    pub endpoints: EndpointConfig,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            auth: AuthConfig::default(),
            language: None,
            endpoints: EndpointConfig::default(),
        }
    }
}

fn default_provider() -> String {
    Provider::Google.as_str().to_string()
}

/// Backend credentials. Values may use `${env:NAME}` or `${secret:NAME}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AuthConfig {
    /// Google Maps Platform API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// HERE application id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,

    /// HERE application code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_code: Option<String>,
}

/// Base URL overrides, mostly for proxies and local test servers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EndpointConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub here_base_url: Option<String>,
}

/// Errors raised while loading configuration or building a service from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown place provider '{value}' (expected one of: google, here)")]
    UnknownProvider { value: String },

    #[error("No backend configured for provider {provider}")]
    MissingBackend { provider: Provider },

    #[error("Provider {provider} requires '{field}' in auth configuration")]
    MissingCredential { provider: Provider, field: &'static str },

    #[error("Backend client error: {0}")]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
          "provider": "here",
          "auth": {
            "appId": "my-app",
            "appCode": "${secret:here-app-code}"
          },
          "language": "de",
          "endpoints": {
            "hereBaseUrl": "http://localhost:8080"
          }
        }"#;

        let config: PlacesConfig = serde_json::from_str(json).expect("config deserializes");
        assert_eq!(config.provider, "here");
        assert_eq!(config.auth.app_id.as_deref(), Some("my-app"));
        assert_eq!(config.auth.app_code.as_deref(), Some("${secret:here-app-code}"));
        assert!(config.auth.api_key.is_none());
        assert_eq!(config.language.as_deref(), Some("de"));
        assert_eq!(config.endpoints.here_base_url.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn empty_object_uses_defaults() {
        let config: PlacesConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PlacesConfig::default());
        assert_eq!(config.provider, "google");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<PlacesConfig>(r#"{ "auth": { "token": "x" } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn serialize_uses_camel_case_keys() {
        let mut config = PlacesConfig::default();
        config.auth.api_key = Some("${env:GOOGLE_MAPS_API_KEY}".into());
        config.endpoints.google_base_url = Some("https://maps.example".into());

        let json = serde_json::to_string(&config).expect("serialize");
        assert!(json.contains("\"apiKey\""));
        assert!(json.contains("\"googleBaseUrl\""));
        assert!(!json.contains("appCode"));
    }
}
