//! Session token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use glyms_core::config::AuthConfig;
use glyms_core::error::AppError;

use super::claims::Claims;

/// Validates session tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a session token.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Session has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid session signature")
                    }
                    _ => AppError::authentication("Invalid session token"),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use glyms_core::config::AuthConfig;
    use glyms_core::error::ErrorKind;
    use glyms_entity::user::{User, UserRole};

    use crate::jwt::{JwtDecoder, JwtEncoder};

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "ada@acme.test".into(),
            password_hash: String::new(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            role: UserRole::Admin,
            company_id: Uuid::new_v4(),
            team_id: None,
            points: 0,
            selected_badge_id: None,
            onboarding_completed: true,
            photo_url: None,
            banner_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.into(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_issue_then_decode() {
        let cfg = config("unit-test-secret");
        let user = user();
        let (token, exp) = JwtEncoder::new(&cfg).issue(&user).unwrap();

        let claims = JwtDecoder::new(&cfg).decode(&token).unwrap();
        assert_eq!(claims.user_id(), user.id);
        assert_eq!(claims.company_id, user.company_id);
        assert!(claims.is_admin());
        assert_eq!(claims.exp, exp.timestamp());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let (token, _) = JwtEncoder::new(&config("one")).issue(&user()).unwrap();
        let err = JwtDecoder::new(&config("two")).decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = JwtDecoder::new(&config("one")).decode("not-a-jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
