use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::SessionClaims;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error};
use uuid::Uuid;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .unwrap_or_default()
}

pub fn generate_session_token(
    username: &str,
    secret: &str,
    ttl: usize,
) -> Result<(String, SessionClaims), Error> {
    let issued_at = now();
    let claims = SessionClaims {
        sub: username.to_string(),
        iat: issued_at,
        exp: issued_at + ttl,
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode_claims(&claims, secret)?;
    Ok((token, claims))
}

pub fn encode_claims(claims: &SessionClaims, secret: &str) -> Result<String, Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify_session_token(token: &str, secret: &str) -> Result<SessionClaims, Error> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}
