//! # Geoproc Common Library
//!
//! Shared code for the geoproc services including:
//! - Error and result types
//! - Configuration file discovery and TOML loading
//! - API response types shared by every service
//! - Timestamp and duration formatting helpers

pub mod api;
pub mod config;
pub mod error;
pub mod human_time;
pub mod time;

pub use error::{Error, Result};
