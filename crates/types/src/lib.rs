//! Shared type definitions for GeoMap place search.
//!
//! This crate holds the provider-agnostic shapes every backend adapter must
//! produce:
//!
//! - [`Place`] / [`PlaceDetails`]: the canonical place records
//! - [`LatLng`]: a WGS84 coordinate
//! - [`Envelope`]: the tagged success/failure wrapper handed to UI consumers

use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

mod envelope;
mod place;

pub use envelope::{Envelope, ErrorValue};
pub use place::{AddressDetails, LatLng, MatchCode, MatchLevel, MatchQuality, MatchType, Place, PlaceDetails};

/// Identifies the backend that answered a request.
///
/// A place identifier is only meaningful together with the provider that
/// issued it.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Google Maps Places
    Google,
    /// HERE Geocoder
    Here,
}

impl Provider {
    /// All supported providers, in the order they are listed to users.
    pub const ALL: [Provider; 2] = [Provider::Google, Provider::Here];

    /// Stable lowercase identifier used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Here => "here",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ParseProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "here" => Ok(Self::Here),
            _ => Err(ParseProviderError { value: s.to_string() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProviderError {
    pub value: String,
}

impl fmt::Display for ParseProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown provider '{}'; expected 'google' or 'here'", self.value)
    }
}

impl Error for ParseProviderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parses_case_insensitively() {
        assert_eq!("google".parse::<Provider>(), Ok(Provider::Google));
        assert_eq!(" HERE ".parse::<Provider>(), Ok(Provider::Here));
    }

    #[test]
    fn provider_rejects_unknown_identifier() {
        let error = "bing".parse::<Provider>().unwrap_err();
        assert_eq!(error.value, "bing");
        assert!(error.to_string().contains("bing"));
    }

    #[test]
    fn provider_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Provider::Here).unwrap(), "\"here\"");
        for provider in Provider::ALL {
            assert_eq!(provider.to_string(), provider.as_str());
        }
    }
}
