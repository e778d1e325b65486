//! Password hashing behind a verification seam.

pub mod hasher;

pub use hasher::PasswordHasher;

use linkfolio_core::result::AppResult;

/// One-way, salted hash-and-verify of plaintext credentials.
///
/// Modeled as a pure function pair so the login flow is independent of
/// the hashing algorithm; production wiring uses [`PasswordHasher`]
/// (Argon2id), tests may substitute a fake.
pub trait CredentialVerifier: Send + Sync + 'static {
    /// Hashes a plaintext password with a fresh random salt.
    fn hash(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
    fn verify(&self, password: &str, hash: &str) -> AppResult<bool>;
}
