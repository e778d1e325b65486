//! # linkfolio-api
//!
//! HTTP API layer for Linkfolio using Axum: routes, handlers, the
//! authentication extractor, and response DTOs.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use state::AppState;
