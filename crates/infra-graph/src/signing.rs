// appsecret_proof: proves the caller holds the app secret for a token

use hmac::{Hmac, Mac};
use relay_core::port::ApiError;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded HMAC-SHA256 of `access_token`, keyed by `app_secret`
pub fn appsecret_proof(app_secret: &str, access_token: &str) -> Result<String, ApiError> {
    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .map_err(|e| ApiError::InvalidResponse(format!("Cannot sign request: {}", e)))?;
    mac.update(access_token.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
