use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session token claims.
///
/// `access_token` is the OAuth2 bearer token the identity provider delegated
/// for the user's Google Drive; it rides along in the session so the upload
/// endpoint can act on the user's behalf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(
        user_id: impl Into<String>,
        access_token: Option<String>,
        expiry_hours: u64,
    ) -> Result<Self, AuthError> {
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(AuthError::InvalidExpiry(expiry_hours))?;

        Ok(Self {
            sub: user_id.into(),
            access_token,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingHeader,
    #[error("Authorization header must use Bearer token format")]
    InvalidHeader,
    #[error("Empty session token")]
    EmptyToken,
    #[error("Session secret not configured")]
    InvalidSecret,
    #[error("Invalid session token: {0}")]
    InvalidToken(String),
    #[error("Session lifetime of {0} hours is out of range")]
    InvalidExpiry(u64),
    #[error("Session token generation error: {0}")]
    TokenGeneration(String),
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn round_trips_claims() {
        let claims = Claims::new("u1", Some("ya29.token".to_string()), 1).unwrap();
        let token = generate_jwt(&claims, SECRET).unwrap();
        let decoded = validate_jwt(&token, SECRET).unwrap();
        assert_eq!(decoded.sub, "u1");
        assert_eq!(decoded.access_token.as_deref(), Some("ya29.token"));
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = generate_jwt(&Claims::new("u1", None, 1).unwrap(), SECRET).unwrap();
        assert!(matches!(
            validate_jwt(&token, "other-secret"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn rejects_expired_token() {
        let mut claims = Claims::new("u1", None, 1).unwrap();
        claims.exp = Utc::now().timestamp() - 3600;
        let token = generate_jwt(&claims, SECRET).unwrap();
        assert!(validate_jwt(&token, SECRET).is_err());
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(matches!(
            generate_jwt(&Claims::new("u1", None, 1).unwrap(), ""),
            Err(AuthError::InvalidSecret)
        ));
    }

    #[test]
    fn out_of_range_lifetime_is_an_error() {
        assert!(matches!(
            Claims::new("u1", None, 10_000_000_000_000),
            Err(AuthError::InvalidExpiry(10_000_000_000_000))
        ));
        assert!(matches!(
            Claims::new("u1", None, u64::MAX),
            Err(AuthError::InvalidExpiry(_))
        ));
    }
}
