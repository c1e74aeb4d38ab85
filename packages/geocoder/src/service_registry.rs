//! Compile-time registry of provider endpoint configurations.
//!
//! Each provider's endpoint is defined in a TOML file under `services/`.
//! The registry embeds these at compile time and exposes them via
//! [`all_services`] and [`service_for`]. Per-call settings (selected
//! provider, timeout, API key) live in [`Configuration`] and are
//! supplied by the caller, never mutated by the lookup core.

use std::time::Duration;

use serde::Deserialize;

use crate::Provider;

/// A geocoding service configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingService {
    /// Unique identifier (e.g., `"google"`, `"waze"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Provider-specific endpoint configuration.
    pub provider: ProviderEndpoint,
}

/// Provider-specific endpoint configuration, tagged by `type` in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderEndpoint {
    /// Google Maps Geocoding API.
    Google {
        /// API base URL (e.g., `"http://maps.google.com/maps/api/geocode/json"`).
        base_url: String,
    },
    /// Waze "mozi" search endpoint.
    Waze {
        /// API base URL (e.g., `"http://www.waze.co.il/WAS/mozi"`).
        base_url: String,
    },
}

impl GeocodingService {
    /// Returns the provider's base URL regardless of variant.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match &self.provider {
            ProviderEndpoint::Google { base_url } | ProviderEndpoint::Waze { base_url } => base_url,
        }
    }
}

/// Per-call lookup settings, read-only from the core's perspective.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Which provider to query.
    pub provider: Provider,
    /// Maximum time to wait for the provider before aborting the call.
    pub timeout: Duration,
    /// API token for the Waze endpoint. Required when
    /// `provider == Provider::Waze`; see [`waze_api_key_from_env`].
    pub waze_api_key: Option<String>,
    /// Overrides the registry-provided endpoint (self-hosted proxy or
    /// test stub). `None` uses the embedded service TOML.
    pub base_url: Option<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            provider: Provider::Google,
            timeout: Duration::from_secs(3),
            waze_api_key: None,
            base_url: None,
        }
    }
}

/// Reads the Waze API token from the `WAZE_API_KEY` environment variable.
///
/// Returns `Some` only when the variable is set and non-empty.
#[must_use]
pub fn waze_api_key_from_env() -> Option<String> {
    let key = std::env::var("WAZE_API_KEY").ok()?;
    if key.is_empty() {
        return None;
    }
    Some(key)
}

// ── Compile-time embedded TOML files ────────────────────────────────

const SERVICE_TOMLS: &[(&str, &str)] = &[
    ("google", include_str!("../services/google.toml")),
    ("waze", include_str!("../services/waze.toml")),
];

/// Returns all geocoding service configurations.
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time guarantee
/// since the configs are embedded).
#[must_use]
pub fn all_services() -> Vec<GeocodingService> {
    SERVICE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse geocoding service '{name}': {e}"))
        })
        .collect()
}

/// Returns the service configuration for the given provider.
///
/// # Panics
///
/// Panics if no embedded config matches the provider; every [`Provider`]
/// variant ships with a service TOML, so this cannot fire at runtime.
#[must_use]
pub fn service_for(provider: Provider) -> GeocodingService {
    let id = match provider {
        Provider::Google => "google",
        Provider::Waze => "waze",
    };
    all_services()
        .into_iter()
        .find(|s| s.id == id)
        .unwrap_or_else(|| panic!("No embedded service config for provider '{id}'"))
}
