#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Multi-provider geocoding lookup client.
//!
//! Resolves free-form addresses to latitude/longitude coordinates
//! (forward geocoding) and coordinates to formatted addresses (reverse
//! geocoding) by querying one of a closed set of remote providers:
//!
//! 1. **Google Maps Geocoding API** — forward and reverse, no API key
//!    required. JSON envelope with a top-level `status` and `results[]`.
//! 2. **Waze** ("mozi" search endpoint) — forward only, requires an API
//!    token. Bare JSON array of result objects.
//!
//! Provider endpoints are loaded from the [`service_registry`]; the
//! provider, request timeout and API key are supplied per call through a
//! [`Configuration`]. Every failure (connection, timeout, provider
//! rejection, unparseable body) is logged as a warning and surfaces to
//! the caller as the same empty outcome a zero-match response produces.

pub mod google;
pub mod lookup;
pub mod service_registry;
pub mod waze;

pub use lookup::{address, coordinates, search};
pub use service_registry::Configuration;

use thiserror::Error;

/// Which remote geocoding provider to query.
///
/// Selected per call and threaded explicitly through URL building,
/// envelope validation and result extraction; never read from shared
/// process state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Google Maps Geocoding API.
    Google,
    /// Waze "mozi" search endpoint.
    Waze,
}

/// A single geocoding query, fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Free-form address to resolve to coordinates.
    Forward(String),
    /// Latitude/longitude pair to resolve to an address.
    Reverse(f64, f64),
}

impl Query {
    /// Returns `true` for a forward query with no usable text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Forward(address) => address.trim().is_empty(),
            Self::Reverse(..) => false,
        }
    }
}

/// One normalized geocoding match.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    /// Latitude/longitude of the match. `Some` only when the provider
    /// supplied both values and both are finite; never zero-filled.
    pub coordinates: Option<(f64, f64)>,
    /// The provider's formatted/display address for the match.
    pub formatted_address: Option<String>,
}

/// Errors from geocoding operations.
///
/// All of these are handled inside [`lookup::search`]: each is logged as
/// a warning and converted into an empty result, so callers only see
/// them if they call the lower-level building blocks directly.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The caller passed an empty or whitespace-only query.
    #[error("geocoding query is empty")]
    EmptyQuery,

    /// The connection could not be established (DNS, connect, reset).
    #[error("geocoding API connection cannot be established")]
    Connection,

    /// The provider did not respond within the configured timeout.
    #[error(
        "geocoding API not responding fast enough (see `Configuration::timeout` to raise the limit)"
    )]
    Timeout,

    /// The selected provider cannot service reverse queries.
    #[error("provider does not support reverse geocoding")]
    ReverseUnsupported,

    /// The provider reported a terminal error status for this call.
    #[error("geocoding API error: {reason}")]
    ProviderRejected {
        /// Human-readable form of the provider's status code.
        reason: String,
    },

    /// The response body was not valid JSON.
    #[error("parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// The Waze provider was selected without an API key.
    #[error("missing Waze API key (set `Configuration::waze_api_key` or WAZE_API_KEY)")]
    MissingApiKey,
}

/// Simple percent-encoding for URL query parameter values.
pub(crate) fn urlencoding(s: &str) -> String {
    s.replace('%', "%25")
        .replace(' ', "+")
        .replace('&', "%26")
        .replace('#', "%23")
        .replace('?', "%3F")
        .replace('/', "%2F")
        .replace('=', "%3D")
}
