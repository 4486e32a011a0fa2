//! JWT session token service.
//!
//! The forum's "session" is a signed JWT delivered to the browser as an
//! HttpOnly cookie (or presented by API clients as a bearer token). The
//! `remember` flag at login selects the long-lived expiration.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use forum_core::ports::{AuthError, TokenClaims, TokenService};

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of a normal session.
    pub expiration_hours: i64,
    /// Lifetime of a "remember me" session.
    pub remember_hours: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            expiration_hours: 24,
            remember_hours: 24 * 30,
            issuer: "forum-api".to_string(),
        }
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_id
    email: String,
    exp: i64,    // expiration timestamp
    iat: i64,    // issued at
    iss: String, // issuer
}

/// JWT-based session token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-in-production".to_string());

        if secret == "change-me-in-production" {
            tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
        }

        let config = JwtConfig {
            secret,
            expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(24),
            remember_hours: std::env::var("JWT_REMEMBER_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(24 * 30),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "forum-api".to_string()),
        };
        Self::new(config)
    }

    fn lifetime_hours(&self, remember: bool) -> i64 {
        if remember {
            self.config.remember_hours
        } else {
            self.config.expiration_hours
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue_token(
        &self,
        user_id: Uuid,
        email: &str,
        remember: bool,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::hours(self.lifetime_hours(remember));

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        let user_id = Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(TokenClaims {
            user_id,
            email: token_data.claims.email,
            exp: token_data.claims.exp,
        })
    }

    fn expiration_seconds(&self, remember: bool) -> i64 {
        self.lifetime_hours(remember) * 3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            expiration_hours: 1,
            remember_hours: 720,
            issuer: "test-issuer".to_string(),
        }
    }

    #[test]
    fn issue_and_validate_round_trip() {
        let service = JwtTokenService::new(test_config());
        let user_id = Uuid::new_v4();
        let email = "alice@u.rochester.edu";

        let token = service.issue_token(user_id, email, false).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, email);
    }

    #[test]
    fn remember_extends_lifetime() {
        let service = JwtTokenService::new(test_config());

        assert_eq!(service.expiration_seconds(false), 3600);
        assert_eq!(service.expiration_seconds(true), 720 * 3600);

        let user_id = Uuid::new_v4();
        let short = service.issue_token(user_id, "a@u.rochester.edu", false).unwrap();
        let long = service.issue_token(user_id, "a@u.rochester.edu", true).unwrap();

        let short_exp = service.validate_token(&short).unwrap().exp;
        let long_exp = service.validate_token(&long).unwrap().exp;
        assert!(long_exp > short_exp);
    }

    #[test]
    fn rejects_garbage_token() {
        let service = JwtTokenService::new(test_config());

        let result = service.validate_token("invalid-token");

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken(_)));
    }

    #[test]
    fn rejects_wrong_issuer() {
        let service1 = JwtTokenService::new(JwtConfig {
            secret: "same-secret".to_string(),
            issuer: "issuer1".to_string(),
            ..test_config()
        });
        let service2 = JwtTokenService::new(JwtConfig {
            secret: "same-secret".to_string(),
            issuer: "issuer2".to_string(),
            ..test_config()
        });

        let token = service1
            .issue_token(Uuid::new_v4(), "a@u.rochester.edu", false)
            .unwrap();

        assert!(service2.validate_token(&token).is_err());
    }
}
