use std::sync::Arc;

use anyhow::Context as _;
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version,
    password_hash::{self, SaltString, rand_core::OsRng},
};

use crate::domain::repository::PasswordHasher;
use crate::error::AdminServiceError;

/// Argon2id hashing on the blocking pool, optionally peppered with a server-side secret.
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    secret: Option<Arc<[u8]>>,
}

impl Argon2Hasher {
    pub fn new(secret: Option<Vec<u8>>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()).map(Arc::from),
        }
    }
}

fn build_argon2(secret: Option<&[u8]>) -> Result<Argon2<'_>, argon2::Error> {
    match secret {
        Some(secret) => Argon2::new_with_secret(
            secret,
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        ),
        None => Ok(Argon2::default()),
    }
}

impl PasswordHasher for Argon2Hasher {
    async fn hash(&self, password: &str) -> Result<String, AdminServiceError> {
        let secret = self.secret.clone();
        let password = password.to_owned();
        let hashed = tokio::task::spawn_blocking(move || -> anyhow::Result<String> {
            let argon2 = build_argon2(secret.as_deref())
                .map_err(|e| anyhow::anyhow!("argon2 setup: {e}"))?;
            let salt = SaltString::generate(&mut OsRng);
            let hash = argon2
                .hash_password(password.as_bytes(), &salt)
                .map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
            Ok(hash.to_string())
        })
        .await
        .context("join password hashing task")??;
        Ok(hashed)
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AdminServiceError> {
        let secret = self.secret.clone();
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matched = tokio::task::spawn_blocking(move || -> anyhow::Result<bool> {
            let argon2 = build_argon2(secret.as_deref())
                .map_err(|e| anyhow::anyhow!("argon2 setup: {e}"))?;
            let parsed =
                PasswordHash::new(&hash).map_err(|e| anyhow::anyhow!("parse password hash: {e}"))?;
            match argon2.verify_password(password.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(e) => Err(anyhow::anyhow!("verify password: {e}")),
            }
        })
        .await
        .context("join password verification task")??;
        Ok(matched)
    }
}
