//! # linkfolio-service
//!
//! Business logic services for Linkfolio. Each service takes the store
//! traits and auth primitives it needs and enforces the request contract:
//! fixed-order field validation, credential verification, and per-resource
//! ownership checks.

pub mod context;
pub mod link;
pub mod session;
pub mod user;
pub mod validate;

pub use context::Principal;
