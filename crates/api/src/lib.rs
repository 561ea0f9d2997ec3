//! Backend SDK boundary for GeoMap place search.
//!
//! Each places backend is modelled the way its SDK exposes it: a request
//! object, an asynchronous lookup that reports back through a one-shot
//! completion callback receiving `(results, status)`, and a backend-specific
//! status vocabulary. Adapters in `geomap-places` depend only on the traits
//! defined here:
//!
//! - [`google::GooglePlacesApi`]: Find Place From Text and Place Details
//! - [`here::HereGeocoderApi`]: Geocoder free-text search and location lookup
//!
//! Faults detected while *issuing* a request (invalid arguments, no runtime to
//! run the lookup on) are returned synchronously as [`ApiError`]; everything
//! that happens afterwards is reported through the callback.
//!
//! [`google::GooglePlacesClient`] and [`here::HereGeocoderClient`] implement the
//! traits on top of `reqwest` against the public JSON web services.

pub mod google;
pub mod here;
mod http;

pub use http::validate_base_url;

/// One-shot completion handler invoked by a backend with its raw results and
/// status. Backends call it at most once; dropping it unused is allowed and is
/// observable by the caller.
pub type Completion<T, S> = Box<dyn FnOnce(T, S) + Send + 'static>;

/// Errors raised synchronously while constructing or issuing a backend request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("No async runtime available to issue the request")]
    NoRuntime,

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    pub fn invalid_request<M: Into<String>>(message: M) -> Self {
        ApiError::InvalidRequest { message: message.into() }
    }
}
