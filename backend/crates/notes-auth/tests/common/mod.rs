#![allow(dead_code)]

mod keys;
mod test_db;

pub use keys::{
    AUDIENCE, ISSUER, KEY_A_N, KEY_B_N, RSA_A_PEM, RSA_B_PEM, federated_claims, jwk, jwks_body,
    sign_federated, sign_hs256,
};
pub use test_db::{create_file_pool, create_test_pool};

use notes_auth::{CredentialVerifier, PasswordHasherConfig};

pub const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

pub fn fast_verifier() -> CredentialVerifier {
    CredentialVerifier::new(PasswordHasherConfig {
        iterations: 1,
        memory_kib: 8,
    })
    .unwrap()
}
