//! Thin client for the Google Places Nearby Search and Geocoding APIs.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use glyms_core::config::GoogleConfig;
use glyms_core::error::{AppError, ErrorKind};

/// Message returned to clients for any upstream failure.
const UPSTREAM_FAILURE: &str = "Google Maps request failed";

/// A coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A nearby search request.
#[derive(Debug, Clone)]
pub struct NearbyQuery {
    pub location: LatLng,
    pub radius_meters: u32,
    pub keyword: Option<String>,
}

/// A place as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub place_id: String,
    pub name: String,
    pub address: Option<String>,
    pub location: LatLng,
    pub types: Vec<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
}

/// One geocoding match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeResult {
    pub place_id: String,
    pub formatted_address: String,
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: String,
    #[serde(default = "Vec::new")]
    results: Vec<T>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    place_id: String,
    name: String,
    vicinity: Option<String>,
    geometry: Geometry,
    #[serde(default)]
    types: Vec<String>,
    rating: Option<f64>,
    user_ratings_total: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawGeocode {
    place_id: String,
    formatted_address: String,
    geometry: Geometry,
}

/// Google Maps HTTP client. The API key never leaves the server.
#[derive(Debug, Clone)]
pub struct GooglePlacesClient {
    http: reqwest::Client,
    api_key: String,
    places_base_url: String,
    geocode_base_url: String,
}

impl GooglePlacesClient {
    /// Build a client with the configured timeout.
    pub fn new(config: &GoogleConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("glyms/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            places_base_url: config.places_base_url.trim_end_matches('/').to_string(),
            geocode_base_url: config.geocode_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Whether an API key is configured.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Nearby Search around a point.
    pub async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<Place>, AppError> {
        let location = format!("{},{}", query.location.lat, query.location.lng);
        let radius = query.radius_meters.to_string();
        let mut params = vec![
            ("location", location.as_str()),
            ("radius", radius.as_str()),
            ("key", self.api_key.as_str()),
        ];
        if let Some(keyword) = query.keyword.as_deref().filter(|k| !k.trim().is_empty()) {
            params.push(("keyword", keyword));
        }

        let url = self.url(&self.places_base_url, "nearbysearch/json", &params)?;
        let envelope: Envelope<RawPlace> = self.fetch(url).await?;
        let places: Vec<Place> = accept(envelope)?
            .into_iter()
            .map(|raw| Place {
                place_id: raw.place_id,
                name: raw.name,
                address: raw.vicinity,
                location: raw.geometry.location,
                types: raw.types,
                rating: raw.rating,
                user_ratings_total: raw.user_ratings_total,
            })
            .collect();

        debug!(results = places.len(), "Nearby search completed");
        Ok(places)
    }

    /// Geocode a free-form address.
    pub async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, AppError> {
        let params = [("address", address), ("key", self.api_key.as_str())];
        let url = self.url(&self.geocode_base_url, "json", &params)?;
        let envelope: Envelope<RawGeocode> = self.fetch(url).await?;
        Ok(accept(envelope)?
            .into_iter()
            .map(|raw| GeocodeResult {
                place_id: raw.place_id,
                formatted_address: raw.formatted_address,
                location: raw.geometry.location,
            })
            .collect())
    }

    fn url(&self, base: &str, path: &str, params: &[(&str, &str)]) -> Result<Url, AppError> {
        if !self.is_configured() {
            error!("Google Maps API key is not configured");
            return Err(AppError::external(UPSTREAM_FAILURE));
        }
        Url::parse_with_params(&format!("{base}/{path}"), params).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid Google Maps base URL", e)
        })
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<Envelope<T>, AppError> {
        let response = self.http.get(url).send().await.map_err(|e| {
            error!(error = %e.without_url(), "Google Maps request failed");
            AppError::external(UPSTREAM_FAILURE)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "Google Maps returned an HTTP error");
            return Err(AppError::external(UPSTREAM_FAILURE));
        }

        response.json::<Envelope<T>>().await.map_err(|e| {
            error!(error = %e.without_url(), "Google Maps returned an unreadable body");
            AppError::external(UPSTREAM_FAILURE)
        })
    }
}

/// `OK` and `ZERO_RESULTS` are successes; every other status is upstream failure.
fn accept<T>(envelope: Envelope<T>) -> Result<Vec<T>, AppError> {
    match envelope.status.as_str() {
        "OK" => Ok(envelope.results),
        "ZERO_RESULTS" => Ok(Vec::new()),
        other => {
            error!(
                status = other,
                detail = envelope.error_message.as_deref().unwrap_or(""),
                "Google Maps rejected the request"
            );
            Err(AppError::external(UPSTREAM_FAILURE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, api_key: &str) -> GooglePlacesClient {
        GooglePlacesClient::new(&GoogleConfig {
            api_key: api_key.to_string(),
            places_base_url: format!("{}/place", server.uri()),
            geocode_base_url: format!("{}/geocode", server.uri()),
            timeout_seconds: 5,
            default_radius_meters: 5000,
        })
        .unwrap()
    }

    fn query() -> NearbyQuery {
        NearbyQuery {
            location: LatLng {
                lat: 48.8566,
                lng: 2.3522,
            },
            radius_meters: 1500,
            keyword: Some("bowling".into()),
        }
    }

    #[tokio::test]
    async fn test_nearby_parses_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/place/nearbysearch/json"))
            .and(query_param("key", "secret-key"))
            .and(query_param("radius", "1500"))
            .and(query_param("keyword", "bowling"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "results": [{
                    "place_id": "abc",
                    "name": "Strike Bowling",
                    "vicinity": "1 Rue X",
                    "geometry": { "location": { "lat": 48.85, "lng": 2.35 } },
                    "types": ["bowling_alley"],
                    "rating": 4.5,
                    "user_ratings_total": 120
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let places = client_for(&server, "secret-key").nearby(&query()).await.unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].place_id, "abc");
        assert_eq!(places[0].address.as_deref(), Some("1 Rue X"));
        assert_eq!(places[0].types, vec!["bowling_alley".to_string()]);
    }

    #[tokio::test]
    async fn test_zero_results_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "status": "ZERO_RESULTS", "results": [] })),
            )
            .mount(&server)
            .await;

        let results = client_for(&server, "k").geocode("nowhere").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_denied_maps_to_external_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/place/nearbysearch/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "REQUEST_DENIED",
                "error_message": "The provided API key is invalid."
            })))
            .mount(&server)
            .await;

        let err = client_for(&server, "bad").nearby(&query()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
        assert_eq!(err.message, UPSTREAM_FAILURE);
    }

    #[tokio::test]
    async fn test_http_error_maps_to_external_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server, "k").geocode("Paris").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
    }

    #[tokio::test]
    async fn test_missing_key_never_calls_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server, "").geocode("Paris").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
    }
}
