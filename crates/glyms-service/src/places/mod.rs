//! Google Maps proxy and place blacklists.

pub mod blacklist;
pub mod client;
pub mod service;

pub use blacklist::BlacklistService;
pub use client::{GeocodeResult, GooglePlacesClient, LatLng, NearbyQuery, Place};
pub use service::{NearbySearch, PlacesService};
