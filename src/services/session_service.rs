//! Session verification.
//!
//! Sessions are issued by the external identity platform; this service only
//! verifies the HS256 signature and expiry of bearer tokens presented to the
//! API. Roles are never trusted from token claims, they are loaded fresh
//! from the profiles table on every request.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, Result};

/// Claims carried by a verified session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (profile ID)
    pub sub: Uuid,
    /// Email, when the issuer includes it
    pub email: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Verifies session tokens against the shared signing secret.
pub struct SessionService {
    decoding_key: DecodingKey,
}

impl SessionService {
    pub fn new(config: &Config) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        }
    }

    /// Verify signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| AppError::Unauthenticated("Invalid or expired session".to_string()))?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn service_with_secret(secret: &str) -> SessionService {
        let config = Config {
            database_url: "postgres://localhost/test".to_string(),
            bind_address: "127.0.0.1:0".to_string(),
            log_level: "debug".to_string(),
            jwt_secret: secret.to_string(),
        };
        SessionService::new(&config)
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn accepts_a_valid_token() {
        let service = service_with_secret("test-secret");
        let sub = Uuid::new_v4();
        let token = sign(
            &Claims {
                sub,
                email: Some("analyst@example.com".to_string()),
                exp: (Utc::now() + Duration::hours(1)).timestamp(),
            },
            "test-secret",
        );

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, sub);
        assert_eq!(claims.email.as_deref(), Some("analyst@example.com"));
    }

    #[test]
    fn rejects_an_expired_token() {
        let service = service_with_secret("test-secret");
        let token = sign(
            &Claims {
                sub: Uuid::new_v4(),
                email: None,
                exp: (Utc::now() - Duration::hours(1)).timestamp(),
            },
            "test-secret",
        );

        assert!(matches!(
            service.verify(&token),
            Err(AppError::Unauthenticated(_))
        ));
    }

    #[test]
    fn rejects_a_token_signed_with_another_secret() {
        let service = service_with_secret("test-secret");
        let token = sign(
            &Claims {
                sub: Uuid::new_v4(),
                email: None,
                exp: (Utc::now() + Duration::hours(1)).timestamp(),
            },
            "other-secret",
        );

        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn rejects_garbage() {
        let service = service_with_secret("test-secret");
        assert!(service.verify("not-a-jwt").is_err());
        assert!(service.verify("").is_err());
    }
}
