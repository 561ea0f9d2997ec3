//! Configuration validation for the place search facade.

use geomap_api::validate_base_url;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::config::PlacesConfig;

/// BCP 47 style tag: a primary language subtag followed by optional subtags.
static LANGUAGE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,8})*$").expect("language tag regex should compile"));

/// Validate the loaded configuration.
///
/// The provider id itself is only checked for presence here; whether it names
/// a known backend is decided when the facade is constructed.
pub fn validate_config(config: &PlacesConfig) -> Result<(), ValidationError> {
    if config.provider.trim().is_empty() {
        return Err(ValidationError::MissingProvider);
    }

    let auth = &config.auth;
    for (field, value) in [("apiKey", &auth.api_key), ("appId", &auth.app_id), ("appCode", &auth.app_code)] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(ValidationError::BlankCredential { field });
        }
    }

    for (field, value) in [
        ("googleBaseUrl", &config.endpoints.google_base_url),
        ("hereBaseUrl", &config.endpoints.here_base_url),
    ] {
        if let Some(url) = value {
            validate_base_url(url).map_err(|e| ValidationError::InvalidEndpoint {
                field,
                reason: e.to_string(),
            })?;
        }
    }

    if let Some(language) = &config.language
        && !LANGUAGE_REGEX.is_match(language)
    {
        return Err(ValidationError::InvalidLanguage {
            value: language.clone(),
        });
    }

    debug!(provider = %config.provider, "validated places configuration");
    Ok(())
}

/// Errors that can occur during validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Provider must not be empty")]
    MissingProvider,

    #[error("Credential '{field}' must not be blank")]
    BlankCredential { field: &'static str },

    #[error("Invalid endpoint '{field}': {reason}")]
    InvalidEndpoint { field: &'static str, reason: String },

    #[error("Invalid language tag '{value}'")]
    InvalidLanguage { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&PlacesConfig::default()).is_ok());
    }

    #[test]
    fn blank_provider_is_rejected() {
        let config = PlacesConfig {
            provider: "  ".into(),
            ..Default::default()
        };
        assert!(matches!(validate_config(&config), Err(ValidationError::MissingProvider)));
    }

    #[test]
    fn blank_credentials_are_rejected() {
        let mut config = PlacesConfig::default();
        config.auth.app_code = Some("".into());
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::BlankCredential { field: "appCode" })
        ));
    }

    #[test]
    fn endpoints_must_be_http_or_https() {
        let mut config = PlacesConfig::default();
        config.endpoints.google_base_url = Some("ftp://maps.example".into());
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidEndpoint { field: "googleBaseUrl", .. })
        ));

        config.endpoints.google_base_url = Some("http://localhost:9000".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn language_tags_are_checked() {
        let mut config = PlacesConfig {
            language: Some("en-US".into()),
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());

        config.language = Some("english please".into());
        assert!(matches!(validate_config(&config), Err(ValidationError::InvalidLanguage { .. })));
    }
}
