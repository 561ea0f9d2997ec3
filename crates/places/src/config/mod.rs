//! Configuration for the place search facade.
//! This module handles loading, interpolation and validation of the
//! ~/.config/geomap/places.json configuration file.

mod interpolation;
mod io;
mod model;
mod validation;

pub use interpolation::{InterpolationError, interpolate_config};
pub use io::{default_config_path, load_config, load_config_from_path};
pub use model::{AuthConfig, ConfigError, EndpointConfig, PlacesConfig};
pub use validation::{ValidationError, validate_config};
