//! User signup, public profile lookup, and owner-gated updates.

pub mod service;

pub use service::{SignupRequest, UpdateUserRequest, UserService};
