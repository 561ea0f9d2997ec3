//! Shared HTTP plumbing for the backend clients.

use std::time::Duration;
use std::{env, future::Future};

use reqwest::{Client, Url};
use tokio::runtime::Handle;

use crate::ApiError;

/// Hostnames allowed to use plain HTTP, for local development and test doubles.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Build the `reqwest::Client` shared by every request a backend client issues.
pub(crate) fn build_http_client() -> Result<Client, ApiError> {
    let user_agent = format!("geomap/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS);
    let http = Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .build()?;
    Ok(http)
}

/// Validate that a base URL is acceptable for a backend client.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: `http` or `https`
/// - otherwise: scheme must be HTTPS
pub fn validate_base_url(base: &str) -> Result<Url, ApiError> {
    let parsed_base_url = Url::parse(base).map_err(|error| ApiError::InvalidBaseUrl {
        url: base.to_string(),
        reason: error.to_string(),
    })?;

    let host_name = parsed_base_url.host_str().ok_or_else(|| ApiError::InvalidBaseUrl {
        url: base.to_string(),
        reason: "base URL must include a host".to_string(),
    })?;

    let scheme = parsed_base_url.scheme();
    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        if scheme != "http" && scheme != "https" {
            return Err(ApiError::InvalidBaseUrl {
                url: base.to_string(),
                reason: format!("unsupported scheme '{}'", scheme),
            });
        }
        return Ok(parsed_base_url);
    }

    if scheme != "https" {
        return Err(ApiError::InvalidBaseUrl {
            url: base.to_string(),
            reason: format!("non-localhost hosts must use https; got '{}://'", scheme),
        });
    }

    Ok(parsed_base_url)
}

/// Run `task` on the caller's Tokio runtime.
///
/// Fails synchronously when there is no runtime to run the lookup on, so the
/// caller never hands out a callback that can not fire.
pub(crate) fn spawn_lookup<F>(task: F) -> Result<(), ApiError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let handle = Handle::try_current().map_err(|_| ApiError::NoRuntime)?;
    handle.spawn(task);
    Ok(())
}

/// URL with its query string removed, for logging without credentials.
pub(crate) fn redacted(url: &Url) -> String {
    let mut display = url.clone();
    display.set_query(None);
    display.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_https_and_local_http() {
        assert!(validate_base_url("https://maps.googleapis.com").is_ok());
        assert!(validate_base_url("http://127.0.0.1:8080").is_ok());
        assert!(validate_base_url("http://localhost").is_ok());
    }

    #[test]
    fn rejects_plain_http_for_remote_hosts() {
        let error = validate_base_url("http://geocoder.api.here.com").unwrap_err();
        assert!(matches!(error, ApiError::InvalidBaseUrl { .. }));
        assert!(validate_base_url("not a url").is_err());
        assert!(validate_base_url("ftp://localhost").is_err());
    }

    #[test]
    fn spawn_without_runtime_fails_synchronously() {
        let result = spawn_lookup(async {});
        assert!(matches!(result, Err(ApiError::NoRuntime)));
    }

    #[test]
    fn redaction_strips_query_credentials() {
        let url = Url::parse("https://maps.googleapis.com/maps/api/place/details/json?key=secret").unwrap();
        assert_eq!(redacted(&url), "https://maps.googleapis.com/maps/api/place/details/json");
    }
}
