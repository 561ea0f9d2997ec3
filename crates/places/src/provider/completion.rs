use geomap_api::{ApiError, Completion};
use tokio::sync::oneshot;

use crate::error::{PlacesError, PlacesResult};

/// Issue a backend request and wait for its single completion callback.
///
/// `issue` receives the completion handler to register with the backend. A
/// synchronous fault from `issue` fails immediately; a handler the backend
/// drops without calling resolves as [`PlacesError::CompletionDropped`].
pub(crate) async fn await_completion<T, S, F>(issue: F) -> PlacesResult<(T, S)>
where
    T: Send + 'static,
    S: Send + 'static,
    F: FnOnce(Completion<T, S>) -> Result<(), ApiError>,
{
    let (sender, receiver) = oneshot::channel();
    let callback: Completion<T, S> = Box::new(move |results, status| {
        // The receiver is gone only if the caller stopped waiting.
        let _ = sender.send((results, status));
    });
    issue(callback)?;
    receiver.await.map_err(|_| PlacesError::CompletionDropped)
}
