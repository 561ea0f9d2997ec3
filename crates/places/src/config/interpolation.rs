//! Configuration interpolation for environment variables and secrets.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::config::PlacesConfig;

static SERVICE: &str = "geomap";

static ENV_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{env:([\w.+-]*)}").expect("env placeholder regex should compile"));
static SECRET_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{secret:([\w.+-]*)}").expect("secret placeholder regex should compile"));

/// Interpolate environment variables and secrets in the auth section.
///
/// Only credentials are interpolated; endpoints and the provider id are literal.
pub fn interpolate_config(config: &mut PlacesConfig) -> Result<(), InterpolationError> {
    let auth = &mut config.auth;
    for value in [&mut auth.api_key, &mut auth.app_id, &mut auth.app_code].into_iter().flatten() {
        *value = interpolate_string(value)?;
    }
    debug!(provider = %config.provider, "interpolated places configuration");
    Ok(())
}

/// Interpolate a string value, replacing ${env:NAME} and ${secret:NAME} patterns.
fn interpolate_string(value: &str) -> Result<String, InterpolationError> {
    let mut resolved = Vec::new();
    for cap in ENV_REGEX.captures_iter(value) {
        let var_name = cap[1].to_string();
        let env_value = std::env::var(&var_name).map_err(|_| InterpolationError::MissingEnvVar { name: var_name.clone() })?;
        debug!("Interpolated env var: {} -> [REDACTED]", var_name);
        resolved.push((cap[0].to_string(), env_value));
    }

    for cap in SECRET_REGEX.captures_iter(value) {
        let secret_name = cap[1].to_string();
        let secret_value = resolve_secret(&secret_name)?;
        debug!("Interpolated secret: {} -> [REDACTED]", secret_name);
        resolved.push((cap[0].to_string(), secret_value));
    }

    let mut result = value.to_string();
    for (placeholder, replacement) in resolved {
        result = result.replace(&placeholder, &replacement);
    }
    Ok(result)
}

/// Resolve a secret from the OS keychain.
fn resolve_secret(name: &str) -> Result<String, InterpolationError> {
    let entry = keyring::Entry::new(SERVICE, name).map_err(|e| InterpolationError::KeyringError {
        name: name.to_string(),
        error: e.to_string(),
    })?;

    entry.get_password().map_err(|e| InterpolationError::MissingSecret {
        name: name.to_string(),
        error: e.to_string(),
    })
}

/// Errors that can occur during interpolation.
#[derive(Debug, Error, Clone)]
pub enum InterpolationError {
    #[error("Missing environment variable: {name}")]
    MissingEnvVar { name: String },

    #[error("Missing secret: {name} - {error}")]
    MissingSecret { name: String, error: String },

    #[error("Keyring error for {name}: {error}")]
    KeyringError { name: String, error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_placeholders_are_resolved() {
        temp_env::with_var("GEOMAP_TEST_API_KEY", Some("k-123"), || {
            let mut config = PlacesConfig::default();
            config.auth.api_key = Some("${env:GEOMAP_TEST_API_KEY}".into());
            interpolate_config(&mut config).unwrap();
            assert_eq!(config.auth.api_key.as_deref(), Some("k-123"));
        });
    }

    #[test]
    fn placeholders_can_be_embedded() {
        temp_env::with_vars([("GEOMAP_TEST_PREFIX", Some("abc")), ("GEOMAP_TEST_SUFFIX", Some("xyz"))], || {
            let value = interpolate_string("${env:GEOMAP_TEST_PREFIX}-${env:GEOMAP_TEST_SUFFIX}").unwrap();
            assert_eq!(value, "abc-xyz");
        });
    }

    #[test]
    fn missing_env_var_is_reported_by_name() {
        temp_env::with_var_unset("GEOMAP_TEST_MISSING", || {
            let mut config = PlacesConfig::default();
            config.auth.app_id = Some("${env:GEOMAP_TEST_MISSING}".into());
            let error = interpolate_config(&mut config).unwrap_err();
            assert!(matches!(error, InterpolationError::MissingEnvVar { ref name } if name == "GEOMAP_TEST_MISSING"));
        });
    }

    #[test]
    fn literal_values_are_untouched() {
        let mut config = PlacesConfig::default();
        config.auth.app_code = Some("plain-code".into());
        interpolate_config(&mut config).unwrap();
        assert_eq!(config.auth.app_code.as_deref(), Some("plain-code"));
    }
}
