//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, FieldOpsConfig, RoutingConfig};

/// Loads and provides access to engine configuration.
///
/// # File structure
///
/// ```text
/// field_ops:
///   base_url: "https://fieldops.example.com"
///   bearer_token: "..."
/// routing:
///   base_url: "https://routing.example.com"
///   token_url: "https://account.example.com/realms/routing/token"
///   client_id: "..."
///   client_secret: "..."
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/engine.yaml")?;
/// let routing = loader.routing();
/// println!("Routing endpoint: {}", routing.base_url);
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] if the file cannot be read
    /// and [`EngineError::ConfigParseError`] if it is not valid YAML or is
    /// missing required fields.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self { config })
    }

    /// The full engine configuration.
    pub fn engine(&self) -> &EngineConfig {
        &self.config
    }

    /// The field-ops service configuration.
    pub fn field_ops(&self) -> &FieldOpsConfig {
        &self.config.field_ops
    }

    /// The routing provider configuration.
    pub fn routing(&self) -> &RoutingConfig {
        &self.config.routing
    }
}
