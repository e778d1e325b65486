//! Link entity.

pub mod model;

pub use model::{CreateLink, Link, UpdateLink};
