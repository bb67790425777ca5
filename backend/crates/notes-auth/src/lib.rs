pub mod accounts;
pub mod authenticator;
pub mod claims;
pub mod error;
pub mod federated_verifier;
pub mod identity_resolver;
pub mod key_directory;
pub mod local_token;
pub mod password;
pub mod token_inspection;

pub use accounts::{AccountService, IssuedSession};
pub use authenticator::{AuthState, Authenticator};
pub use claims::{FederatedClaims, IdentityClaims, LocalClaims, VerifiedClaims};
pub use error::{AuthError, Result};
pub use federated_verifier::{FederatedVerifier, FederatedVerifierConfig};
pub use identity_resolver::IdentityResolver;
pub use key_directory::{KeySource, SigningKeyDirectory};
pub use local_token::{LOCAL_TOKEN_TTL_DAYS, LocalTokenIssuer};
pub use password::{CredentialVerifier, PasswordHasherConfig};
pub use token_inspection::{extract_bearer, peek_issuer};

#[cfg(test)]
mod tests;
