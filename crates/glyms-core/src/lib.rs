//! # glyms-core
//!
//! Core crate for Glyms. Contains configuration schemas, pagination and
//! response types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Glyms crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
