//! The place search capability contract and its backend adapters.
//!
//! Modules:
//! - `completion`: bridges a backend's one-shot callback into a future
//! - `google`: adapter over [`geomap_api::google::GooglePlacesApi`]
//! - `here`: adapter over [`geomap_api::here::HereGeocoderApi`]

mod completion;
mod google;
mod here;

use std::fmt::Display;

use geomap_api::google::PlacesServiceStatus;
use geomap_api::here::HereStatus;
use geomap_types::{Place, PlaceDetails, Provider};

use crate::error::{PlacesError, PlacesResult};

pub use google::GooglePlacesAdapter;
pub use here::HerePlacesAdapter;

/// Operations every place backend adapter exposes identically.
///
/// Each call issues exactly one backend request and resolves exactly once.
/// No state carries over between calls.
#[async_trait::async_trait]
pub trait PlacesService: Send + Sync {
    /// Backend answering this service's requests.
    fn provider(&self) -> Provider;

    /// Free-text search biased around the map's current center.
    ///
    /// An empty list means the backend found nothing; it is not an error.
    async fn search(&self, needle: &str) -> PlacesResult<Vec<Place>>;

    /// Details for a place previously returned by [`PlacesService::search`].
    ///
    /// `Ok(None)` when the backend no longer knows the identifier.
    async fn get(&self, place_id: &str) -> PlacesResult<Option<PlaceDetails>>;
}

/// How a backend status is treated, independent of its vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusClass {
    Found,
    Empty,
    Unrecognized,
}

/// A backend-specific status that can be classified into a [`StatusClass`].
pub(crate) trait BackendStatus: Display {
    fn class(&self) -> StatusClass;
}

impl BackendStatus for PlacesServiceStatus {
    fn class(&self) -> StatusClass {
        match self {
            PlacesServiceStatus::Ok => StatusClass::Found,
            PlacesServiceStatus::ZeroResults | PlacesServiceStatus::NotFound => StatusClass::Empty,
            _ => StatusClass::Unrecognized,
        }
    }
}

impl BackendStatus for HereStatus {
    fn class(&self) -> StatusClass {
        match self {
            HereStatus::Ok => StatusClass::Found,
            HereStatus::ZeroResults | HereStatus::NotFound => StatusClass::Empty,
            HereStatus::Failed(_) => StatusClass::Unrecognized,
        }
    }
}

/// Translate a list outcome: found results are converted one by one in
/// order, and the first conversion fault fails the whole call.
pub(crate) fn translate_list<R, S, T, F>(provider: Provider, raw: Vec<R>, status: &S, convert: F) -> PlacesResult<Vec<T>>
where
    S: BackendStatus,
    F: FnMut(R) -> PlacesResult<T>,
{
    match status.class() {
        StatusClass::Found => raw.into_iter().map(convert).collect(),
        StatusClass::Empty => Ok(Vec::new()),
        StatusClass::Unrecognized => Err(PlacesError::Status {
            provider,
            status: status.to_string(),
        }),
    }
}

/// Translate a single-record outcome under the same status policy.
pub(crate) fn translate_single<R, S, T, F>(provider: Provider, raw: Option<R>, status: &S, convert: F) -> PlacesResult<Option<T>>
where
    S: BackendStatus,
    F: FnOnce(R) -> PlacesResult<T>,
{
    match status.class() {
        StatusClass::Found => match raw {
            Some(record) => convert(record).map(Some),
            None => Err(PlacesError::conversion(provider, "backend reported OK without a result")),
        },
        StatusClass::Empty => Ok(None),
        StatusClass::Unrecognized => Err(PlacesError::Status {
            provider,
            status: status.to_string(),
        }),
    }
}

/// Treat blank strings from backends as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double(value: u8) -> PlacesResult<u8> {
        Ok(value * 2)
    }

    #[test]
    fn google_statuses_classify_empty_cases() {
        assert_eq!(PlacesServiceStatus::Ok.class(), StatusClass::Found);
        assert_eq!(PlacesServiceStatus::ZeroResults.class(), StatusClass::Empty);
        assert_eq!(PlacesServiceStatus::NotFound.class(), StatusClass::Empty);
        assert_eq!(PlacesServiceStatus::OverQueryLimit.class(), StatusClass::Unrecognized);
        assert_eq!(
            PlacesServiceStatus::Unrecognized("NEW".into()).class(),
            StatusClass::Unrecognized
        );
    }

    #[test]
    fn list_translation_preserves_order() {
        let out = translate_list(Provider::Google, vec![1, 2, 3], &PlacesServiceStatus::Ok, double).unwrap();
        assert_eq!(out, vec![2, 4, 6]);
    }

    #[test]
    fn list_translation_ignores_payload_for_empty_status() {
        let out = translate_list(Provider::Here, vec![1], &HereStatus::NotFound, double).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn list_translation_fails_on_first_conversion_fault() {
        let result = translate_list(Provider::Google, vec![1, 0, 2], &PlacesServiceStatus::Ok, |value: u8| {
            if value == 0 {
                Err(PlacesError::conversion(Provider::Google, "zero"))
            } else {
                Ok(value)
            }
        });
        assert!(matches!(result, Err(PlacesError::Conversion { .. })));
    }

    #[test]
    fn single_translation_maps_empty_to_none() {
        let out = translate_single(Provider::Google, Some(4), &PlacesServiceStatus::ZeroResults, double).unwrap();
        assert_eq!(out, None);
        let out = translate_single(Provider::Google, Some(4), &PlacesServiceStatus::Ok, double).unwrap();
        assert_eq!(out, Some(8));
    }

    #[test]
    fn single_translation_requires_record_for_ok() {
        let result = translate_single(Provider::Here, None::<u8>, &HereStatus::Ok, double);
        assert!(matches!(result, Err(PlacesError::Conversion { .. })));
    }

    #[test]
    fn unrecognized_status_is_reported_verbatim() {
        let result = translate_single(Provider::Here, Some(1), &HereStatus::Failed("PermissionError".into()), double);
        match result {
            Err(PlacesError::Status { provider, status }) => {
                assert_eq!(provider, Provider::Here);
                assert_eq!(status, "PermissionError");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
