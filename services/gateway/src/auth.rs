use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use jsonwebtoken::{decode, encode, get_current_timestamp, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use types::ids::UserId;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: u64,
    pub user_id: UserId,
}

/// HS256 session tokens issued at login
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    pub fn issue(&self, user_id: UserId) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: get_current_timestamp() + self.ttl_secs,
            user_id,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::InternalError(e.into()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }
}

/// Caller identity taken from the `Authorization: Bearer` header
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing authentication credentials".into()))?;
        let header = header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid header string".into()))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Expected a bearer token".into()))?;

        let claims = state.tokens.verify(token)?;
        Ok(AuthenticatedUser {
            user_id: claims.user_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_then_verify() {
        let keys = TokenKeys::new("secret", 60);
        let token = keys.issue(UserId::new(2)).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.user_id, UserId::new(2));
        assert_eq!(claims.sub, "2");
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let token = TokenKeys::new("other", 60).issue(UserId::new(2)).unwrap();
        assert!(matches!(
            TokenKeys::new("secret", 60).verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let keys = TokenKeys::new("secret", 0);
        let claims = Claims {
            sub: "2".to_string(),
            exp: get_current_timestamp() - 3600,
            user_id: UserId::new(2),
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).unwrap();
        assert!(keys.verify(&token).is_err());
    }
}
