//! Credential Verifier: salted Argon2id hashing.
//!
//! Both operations run on the blocking pool so a slow hash never stalls the
//! async workers.

use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use error_location::ErrorLocation;
use log::error;

const SALT_LEN: usize = 16;

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasherConfig {
    /// Argon2 time cost
    pub iterations: u32,
    /// Argon2 memory cost in KiB
    pub memory_kib: u32,
}

#[derive(Clone)]
pub struct CredentialVerifier {
    params: Params,
}

impl CredentialVerifier {
    #[track_caller]
    pub fn new(config: PasswordHasherConfig) -> AuthErrorResult<Self> {
        let params = Params::new(config.memory_kib, config.iterations, 1, None).map_err(|e| {
            AuthError::Hashing {
                message: format!("Invalid argon2 parameters: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        Ok(Self { params })
    }

    /// Hash with a fresh random salt. Returns a PHC string that embeds the
    /// salt and cost parameters.
    pub async fn hash(&self, plaintext: &str) -> AuthErrorResult<String> {
        let params = self.params.clone();
        let plaintext = plaintext.to_owned();

        tokio::task::spawn_blocking(move || hash_blocking(&plaintext, params))
            .await
            .map_err(|e| AuthError::Hashing {
                message: format!("Hashing task failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
    }

    /// True only when `plaintext` produced `stored_hash`. A malformed hash is
    /// a mismatch, never an error.
    pub async fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        let plaintext = plaintext.to_owned();
        let stored_hash = stored_hash.to_owned();

        match tokio::task::spawn_blocking(move || verify_blocking(&plaintext, &stored_hash)).await
        {
            Ok(matched) => matched,
            Err(e) => {
                error!("Password verification task failed: {}", e);
                false
            }
        }
    }
}

#[track_caller]
fn hash_blocking(plaintext: &str, params: Params) -> AuthErrorResult<String> {
    let mut salt_bytes = [0u8; SALT_LEN];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| AuthError::Hashing {
        message: format!("Salt generation failed: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Hashing {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let phc = argon2
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?
        .to_string();

    Ok(phc)
}

fn verify_blocking(plaintext: &str, stored_hash: &str) -> bool {
    // Cost parameters come from the PHC string, not from our config
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
