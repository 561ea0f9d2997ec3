//! Provider-agnostic place search.
//!
//! Callers program against [`PlacesService`], which exposes two operations:
//! free-text `search` biased around the current map center, and `get` for the
//! details of a known place. [`GeoMapPlacesService`] selects the backend adapter
//! once, from a configured provider identifier, and delegates to it.
//!
//! ## Architecture
//!
//! - **`map_context`**: read-only access to the map's current center
//! - **`policy`**: fixed search policy, location bias and request validation
//! - **`provider`**: the capability contract and the Google / HERE adapters
//! - **`facade`**: provider selection and backend wiring
//! - **`config`**: `places.json` loading, interpolation and validation
//!
//! Every operation resolves to a [`PlacesResult`]; backend statuses, faults
//! raised while issuing a request and conversion problems all arrive as a
//! [`PlacesError`]. Use [`geomap_types::Envelope::from_result`] to hand the
//! outcome to a UI in its tagged wire shape.

pub mod config;
mod error;
mod facade;
mod map_context;
mod policy;
mod provider;

pub use config::{ConfigError, PlacesConfig};
pub use error::{PlacesError, PlacesResult};
pub use facade::{Backends, GeoMapPlacesService};
pub use map_context::{FixedCenter, MapContext, MapContextError, MapView, MapViewHandle};
pub use policy::{
    BoundingBox, DEFAULT_SEARCH_RADIUS_METERS, DEGREES_PER_METER_LAT, LocationBias, MINIMAL_LOCATION_BOUND_METERS, SearchPolicy,
    SearchRequest,
};
pub use provider::{GooglePlacesAdapter, HerePlacesAdapter, PlacesService};

pub use geomap_types::{Envelope, ErrorValue, LatLng, Place, PlaceDetails, Provider};
