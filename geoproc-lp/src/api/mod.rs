//! HTTP API handlers for geoproc-lp

pub mod cors;
pub mod health;
pub mod location;

pub use cors::cors_middleware;
pub use health::health_routes;
pub use location::{get_stats, optimize_route, process_batch};
