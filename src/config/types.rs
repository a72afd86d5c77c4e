//! Configuration types for the Salary Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use serde::Deserialize;

/// Top-level engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Field-ops service configuration.
    pub field_ops: FieldOpsConfig,
    /// Routing provider configuration.
    pub routing: RoutingConfig,
}

/// Field-ops service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldOpsConfig {
    /// Base URL of the field-ops REST API.
    pub base_url: String,
    /// Opaque bearer token supplied by the operator.
    pub bearer_token: String,
}

/// Routing provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    /// Base URL of the routing API.
    pub base_url: String,
    /// Token endpoint for the client-credentials grant.
    pub token_url: String,
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
}
