//! # linkfolio-auth
//!
//! Authentication building blocks: stateless JWT access/refresh tokens
//! and Argon2id password hashing behind the [`password::CredentialVerifier`]
//! seam.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenType};
pub use password::{CredentialVerifier, PasswordHasher};
