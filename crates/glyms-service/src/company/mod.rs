//! The caller's company.

pub mod service;

pub use service::CompanyService;
