//! Google Maps proxy configuration.

use serde::{Deserialize, Serialize};

/// Google Places / Geocoding API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// Server-side API key. Never sent to clients.
    #[serde(default)]
    pub api_key: String,
    /// Base URL of the Places API.
    #[serde(default = "default_places_url")]
    pub places_base_url: String,
    /// Base URL of the Geocoding API.
    #[serde(default = "default_geocode_url")]
    pub geocode_base_url: String,
    /// Outbound request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Radius used when the client does not send one.
    #[serde(default = "default_radius")]
    pub default_radius_meters: u32,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            places_base_url: default_places_url(),
            geocode_base_url: default_geocode_url(),
            timeout_seconds: default_timeout(),
            default_radius_meters: default_radius(),
        }
    }
}

fn default_places_url() -> String {
    "https://maps.googleapis.com/maps/api/place".to_string()
}

fn default_geocode_url() -> String {
    "https://maps.googleapis.com/maps/api/geocode".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_radius() -> u32 {
    5000
}
