//! Session lifecycle: login, logout, refresh.

pub mod service;

pub use service::{LoginRequest, LoginResult, SessionService};
