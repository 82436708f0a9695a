//! API types shared by every geoproc service
//!
//! Each service wraps these with its own axum handlers.

pub mod types;

pub use types::{ErrorResponse, HealthResponse};
