//! Owner-gated link curation.

pub mod service;

pub use service::{CreateLinkRequest, LinkService, UpdateLinkRequest};
