//! Teams within a company.

pub mod service;

pub use service::TeamService;
