//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions (Config, ServerConfig, PolicyConfig, MetricsConfig)
//! - [`validation`]: Startup checks that collect every problem at once

mod types;
mod validation;

pub use types::{Config, ConfigError, MetricsConfig, PolicyConfig, ServerConfig};
pub use validation::{ValidationError, validate};
