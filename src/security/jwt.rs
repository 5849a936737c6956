/// Bearer-token verification for tokens issued by the organization's
/// external identity provider (RS256). This service holds only the
/// provider's public key and never issues tokens of its own.
use anyhow::{anyhow, Result};
use jsonwebtoken::{decode, Algorithm, DecodingKey, TokenData, Validation};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Claims supplied by the identity provider. `sub` is the opaque subject
/// identifier; `email` is the provider-verified address.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

lazy_static! {
    static ref DECODING_KEY: RwLock<Option<DecodingKey>> = RwLock::new(None);
}

/// Load the identity provider's public key. Must be called during
/// application startup before any token validation.
pub fn initialize_key(public_key_pem: &str) -> Result<()> {
    let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
        .map_err(|e| anyhow!("Failed to load identity provider public key: {}", e))?;

    let mut key = DECODING_KEY
        .write()
        .map_err(|e| anyhow!("Failed to acquire write lock on decoding key: {}", e))?;
    *key = Some(decoding_key);

    Ok(())
}

fn get_decoding_key() -> Result<DecodingKey> {
    let key = DECODING_KEY
        .read()
        .map_err(|e| anyhow!("Failed to acquire read lock on decoding key: {}", e))?;

    key.clone()
        .ok_or_else(|| anyhow!("Decoding key not initialized. Call initialize_key() during startup"))
}

/// Validate a bearer token and return its claims
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let decoding_key = get_decoding_key()?;
    let validation = Validation::new(Algorithm::RS256);

    decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| anyhow!("Token validation failed: {}", e))
}
