use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Resolve the authenticated requester from a bearer token. Identity
/// issuance lives elsewhere; this service only verifies and extracts the
/// subject id.
pub fn requester_id(token: &str, secret: &str) -> Result<Uuid, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| AppError::Authentication(e.to_string()))?;

    Uuid::parse_str(&token_data.claims.sub)
        .map_err(|_| AppError::Authentication("Invalid token subject".to_string()))
}
