//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication, session cookie, and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session token TTL in hours.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_hours: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the session cookie carries the `Secure` attribute.
    #[serde(default)]
    pub cookie_secure: bool,
    /// Path prefixes that require a valid session.
    #[serde(default = "default_protected_prefixes")]
    pub protected_prefixes: Vec<String>,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Invitation token lifetime in hours.
    #[serde(default = "default_invitation_ttl")]
    pub invitation_ttl_hours: u64,
    /// Password reset token lifetime in minutes.
    #[serde(default = "default_reset_ttl")]
    pub password_reset_ttl_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            session_ttl_hours: default_session_ttl(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
            protected_prefixes: default_protected_prefixes(),
            password_min_length: default_password_min(),
            invitation_ttl_hours: default_invitation_ttl(),
            password_reset_ttl_minutes: default_reset_ttl(),
        }
    }
}

impl AuthConfig {
    /// Whether `path` falls under one of the protected prefixes.
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes.iter().any(|prefix| {
            path == prefix
                || path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_session_ttl() -> u64 {
    24 * 7
}

fn default_cookie_name() -> String {
    "glyms_session".to_string()
}

fn default_protected_prefixes() -> Vec<String> {
    [
        "/api/users",
        "/api/events",
        "/api/companies",
        "/api/teams",
        "/api/notifications",
        "/api/badges",
        "/api/points",
        "/api/places",
        "/api/tags",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

fn default_password_min() -> usize {
    8
}

fn default_invitation_ttl() -> u64 {
    72
}

fn default_reset_ttl() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_protected_matches_segments() {
        let cfg = AuthConfig::default();
        assert!(cfg.is_protected("/api/events"));
        assert!(cfg.is_protected("/api/events/123/finalize"));
        assert!(!cfg.is_protected("/api/eventsfoo"));
        assert!(!cfg.is_protected("/api/auth/login"));
        assert!(!cfg.is_protected("/api/cron/event-reminders"));
    }
}
