
use crate::{CredentialVerifier, PasswordHasherConfig};

pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

/// Cheapest valid argon2 cost so tests stay fast in debug builds
pub(crate) fn fast_verifier() -> CredentialVerifier {
    CredentialVerifier::new(PasswordHasherConfig {
        iterations: 1,
        memory_kib: 8,
    })
    .unwrap()
}
