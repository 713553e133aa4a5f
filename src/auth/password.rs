use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

const TOKEN_ENTROPY_BYTES: usize = 32;

/// Salted SHA-256 digest used for both stored passwords and session tokens.
///
/// The salt is a single server-wide secret handed in at construction.
#[derive(Clone)]
pub struct PasswordHasher {
    salt: String,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

impl PasswordHasher {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// Lowercase hex of `SHA-256("{salt}:{password}")`, always 64 characters.
    pub fn hash(&self, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(b":");
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Fresh opaque session token: OS randomness run through [`Self::hash`].
    pub fn generate_token(&self) -> String {
        let mut bytes = [0u8; TOKEN_ENTROPY_BYTES];
        OsRng.fill_bytes(&mut bytes);
        self.hash(&hex::encode(bytes))
    }
}
