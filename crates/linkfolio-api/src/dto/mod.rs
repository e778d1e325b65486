//! Wire DTOs.
//!
//! Request bodies deserialize directly into the service-layer request
//! structs; only responses need dedicated projections here.

pub mod response;
