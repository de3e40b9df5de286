//! # glyms-api
//!
//! HTTP API layer for Glyms built on Axum.
//!
//! Provides all REST endpoints, middleware (session guard, CORS, logging),
//! extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
