//! # glyms-database
//!
//! PostgreSQL connection management, embedded migrations, and one
//! repository per aggregate.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use migration::run_migrations;
