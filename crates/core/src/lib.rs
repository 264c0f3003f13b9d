//! Domain layer for the Knowledge+ course platform.
//!
//! Zero internal dependencies so the constants and validation helpers
//! can be used by both the repository layer and the HTTP layer.

pub mod course;
pub mod error;
pub mod roles;
pub mod support;
pub mod types;
