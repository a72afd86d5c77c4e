//! Configuration loading and management for the Salary Engine.
//!
//! This module provides functionality to load engine configuration from a
//! YAML file: the field-ops service endpoint and bearer token, and the
//! routing provider's endpoints and client credentials.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/engine.yaml").unwrap();
//! println!("Field-ops endpoint: {}", config.field_ops().base_url);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, FieldOpsConfig, RoutingConfig};
