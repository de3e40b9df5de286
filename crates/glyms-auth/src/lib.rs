//! # glyms-auth
//!
//! Authentication primitives for Glyms.
//!
//! ## Modules
//!
//! - `jwt`: session token creation and validation
//! - `password`: Argon2id password hashing and strength policy
//! - `secret`: constant-time shared-secret checks and random tokens

pub mod jwt;
pub mod password;
pub mod secret;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use secret::{SharedSecret, generate_token};
