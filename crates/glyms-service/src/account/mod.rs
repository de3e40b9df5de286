//! Registration, login, invitations, and password reset.

pub mod mail;
pub mod service;

pub use mail::{LoggingMailGateway, MailGateway, MailMessage};
pub use service::{AuthService, RegisterCompany, Session};
