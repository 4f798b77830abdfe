//! Signed access token issuance and validation.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use costdeck_core::config::AuthConfig;
use costdeck_core::error::AppError;
use costdeck_entity::user::User;

use super::claims::Claims;

/// Issues and validates HMAC-SHA256 signed access tokens.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_minutes: i64,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a new codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds, for clock skew

        Self {
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            validation,
            ttl_minutes: config.token_ttl_minutes as i64,
        }
    }

    /// Issues a signed access token for the given user.
    pub fn issue(&self, user: &User) -> Result<(String, Claims), AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::minutes(self.ttl_minutes)).timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok((token, claims))
    }

    /// Decodes and validates a token string.
    ///
    /// Any failure — bad signature, malformed payload, expired — surfaces
    /// as a single token-invalid error; callers never learn which check
    /// rejected the token.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::token_invalid("Invalid or expired token"))
    }
}
