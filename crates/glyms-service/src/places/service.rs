//! Google Maps proxy with blacklist filtering.

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use glyms_core::config::GoogleConfig;
use glyms_core::error::AppError;
use glyms_database::repositories::{BlacklistRepository, EventRepository};

use super::client::{GeocodeResult, GooglePlacesClient, LatLng, NearbyQuery, Place};
use crate::context::RequestContext;
use crate::event::load_event;

/// Largest radius accepted by Nearby Search.
const MAX_RADIUS_METERS: u32 = 50_000;

/// Nearby search input as received from a client.
#[derive(Debug, Clone)]
pub struct NearbySearch {
    pub lat: f64,
    pub lng: f64,
    pub radius: Option<u32>,
    pub keyword: Option<String>,
    /// Also strip this event's blacklist.
    pub event_id: Option<Uuid>,
}

/// Proxies Google Maps for authenticated users.
#[derive(Debug, Clone)]
pub struct PlacesService {
    client: Arc<GooglePlacesClient>,
    blacklist_repo: Arc<BlacklistRepository>,
    event_repo: Arc<EventRepository>,
    default_radius: u32,
}

impl PlacesService {
    /// Creates a new places service.
    pub fn new(
        client: Arc<GooglePlacesClient>,
        blacklist_repo: Arc<BlacklistRepository>,
        event_repo: Arc<EventRepository>,
        config: &GoogleConfig,
    ) -> Self {
        Self {
            client,
            blacklist_repo,
            event_repo,
            default_radius: config.default_radius_meters,
        }
    }

    /// Nearby places minus the company and event blacklists.
    pub async fn nearby(&self, ctx: &RequestContext, search: NearbySearch) -> Result<Vec<Place>, AppError> {
        let location = checked_location(search.lat, search.lng)?;
        let radius_meters = search.radius.unwrap_or(self.default_radius);
        if radius_meters == 0 || radius_meters > MAX_RADIUS_METERS {
            return Err(AppError::validation(format!(
                "Radius must be between 1 and {MAX_RADIUS_METERS} meters"
            )));
        }
        if let Some(event_id) = search.event_id {
            load_event(&self.event_repo, ctx, event_id).await?;
        }

        let places = self
            .client
            .nearby(&NearbyQuery {
                location,
                radius_meters,
                keyword: search.keyword,
            })
            .await?;

        let excluded: HashSet<String> = self
            .blacklist_repo
            .excluded_place_ids(ctx.company_id, search.event_id)
            .await?
            .into_iter()
            .collect();

        Ok(strip_excluded(places, &excluded))
    }

    /// Geocode an address.
    pub async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, AppError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(AppError::validation("Address is required"));
        }
        self.client.geocode(address).await
    }
}

fn checked_location(lat: f64, lng: f64) -> Result<LatLng, AppError> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(AppError::validation("Coordinates are out of range"));
    }
    Ok(LatLng { lat, lng })
}

fn strip_excluded(places: Vec<Place>, excluded: &HashSet<String>) -> Vec<Place> {
    places
        .into_iter()
        .filter(|p| !excluded.contains(&p.place_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str) -> Place {
        Place {
            place_id: id.into(),
            name: id.to_uppercase(),
            address: None,
            location: LatLng { lat: 0.0, lng: 0.0 },
            types: vec![],
            rating: None,
            user_ratings_total: None,
        }
    }

    #[test]
    fn test_checked_location() {
        assert!(checked_location(45.0, 7.0).is_ok());
        assert!(checked_location(91.0, 7.0).is_err());
        assert!(checked_location(0.0, -181.0).is_err());
        assert!(checked_location(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_strip_excluded() {
        let excluded = HashSet::from(["b".to_string()]);
        let kept = strip_excluded(vec![place("a"), place("b"), place("c")], &excluded);
        let ids: Vec<_> = kept.iter().map(|p| p.place_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
