//! Shared foundation: configuration, errors, and core types

pub mod config;
pub mod error;
pub mod types;

pub use config::CafeConfig;
pub use error::{CafeError, Result};
