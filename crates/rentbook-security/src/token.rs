//! Opaque session tokens

use rand::RngCore;
use rentbook_shared::constants::SESSION_TOKEN_BYTES;
use sha2::{Digest, Sha256};

/// Fresh token from the thread-local CSPRNG, hex encoded.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// SHA-256 of the token. Sessions are stored under this key, never the raw token.
pub fn digest_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
