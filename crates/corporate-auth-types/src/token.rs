//! Opaque session tokens.
//!
//! The plaintext token is handed to the client exactly once; only its SHA-256 digest is
//! stored, so a leaked table cannot be replayed as bearer credentials.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngExt;
use sha2::{Digest, Sha256};

/// Random bytes per token (256 bits).
pub const TOKEN_BYTES: usize = 32;

/// Generate a fresh URL-safe bearer token.
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; TOKEN_BYTES] = rng.random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Digest under which a token is stored and looked up.
pub fn hash_token(token: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().to_vec()
}
