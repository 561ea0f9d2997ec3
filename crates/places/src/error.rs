use geomap_api::ApiError;
use geomap_types::{ErrorValue, Provider};
use thiserror::Error;

use crate::map_context::MapContextError;

pub type PlacesResult<T> = std::result::Result<T, PlacesError>;

/// Failure of a single place operation.
///
/// "Nothing found" is never represented here; it resolves successfully with an
/// empty payload.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// The backend answered with a status outside the success/empty set.
    #[error("Query status {status}")]
    Status { provider: Provider, status: String },

    /// The backend rejected the request before accepting the completion handler.
    #[error("Request could not be issued: {0}")]
    Request(#[from] ApiError),

    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// A raw result could not be mapped onto the canonical place model.
    #[error("Could not convert {provider} result: {reason}")]
    Conversion { provider: Provider, reason: String },

    #[error("Map context error: {0}")]
    MapContext(#[from] MapContextError),

    /// The backend released the completion handler without invoking it.
    #[error("Backend dropped the completion handler without responding")]
    CompletionDropped,
}

impl PlacesError {
    pub fn invalid_request<R: Into<String>>(reason: R) -> Self {
        PlacesError::InvalidRequest { reason: reason.into() }
    }

    pub fn conversion<R: Into<String>>(provider: Provider, reason: R) -> Self {
        PlacesError::Conversion {
            provider,
            reason: reason.into(),
        }
    }

    /// Stable category used in [`ErrorValue::kind`].
    pub fn kind(&self) -> &'static str {
        match self {
            PlacesError::Status { .. } => "status",
            PlacesError::Request(_) => "request",
            PlacesError::InvalidRequest { .. } => "invalid_request",
            PlacesError::Conversion { .. } => "conversion",
            PlacesError::MapContext(_) => "map_context",
            PlacesError::CompletionDropped => "completion_dropped",
        }
    }
}

impl From<PlacesError> for ErrorValue {
    fn from(error: PlacesError) -> Self {
        let value = ErrorValue::new(error.kind(), error.to_string());
        match error {
            PlacesError::Status { status, .. } => value.with_status(status),
            _ => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_offending_status() {
        let error = PlacesError::Status {
            provider: Provider::Google,
            status: "OVER_QUERY_LIMIT".into(),
        };
        assert_eq!(error.to_string(), "Query status OVER_QUERY_LIMIT");

        let value = ErrorValue::from(error);
        assert_eq!(value.kind, "status");
        assert_eq!(value.status.as_deref(), Some("OVER_QUERY_LIMIT"));
    }

    #[test]
    fn request_faults_keep_the_underlying_error() {
        let value = ErrorValue::from(PlacesError::from(ApiError::NoRuntime));
        assert_eq!(value.kind, "request");
        assert!(value.message.contains("runtime"));
        assert!(value.status.is_none());
    }
}
