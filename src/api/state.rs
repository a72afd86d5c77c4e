//! Application state for the Salary Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tracing::warn;

use crate::clients::{
    FieldOpsClient, HttpFieldOpsClient, HttpRoutingClient, RoutingCredential, RoutingProvider,
};
use crate::config::ConfigLoader;
use crate::resolver::AnomalyResolver;

/// Shared application state.
///
/// Holds the remote collaborators, the anomaly resolver, and the
/// session-scoped routing credential. The credential is obtained once at
/// construction and never refreshed; a session without one can still
/// compute salaries but cannot resolve anomalies.
#[derive(Clone)]
pub struct AppState {
    field_ops: Arc<dyn FieldOpsClient>,
    resolver: Arc<AnomalyResolver>,
    routing_credential: Option<RoutingCredential>,
}

impl AppState {
    /// Creates application state over the given collaborators.
    pub fn new(
        field_ops: Arc<dyn FieldOpsClient>,
        routing: Arc<dyn RoutingProvider>,
        routing_credential: Option<RoutingCredential>,
    ) -> Self {
        let resolver = Arc::new(AnomalyResolver::new(Arc::clone(&field_ops), routing));
        Self {
            field_ops,
            resolver,
            routing_credential,
        }
    }

    /// Builds HTTP collaborators from configuration and obtains the
    /// session routing credential.
    ///
    /// A failed token grant is logged and leaves the session without a
    /// credential rather than failing startup; anomaly resolution then
    /// reports the missing credential per run.
    pub async fn connect(config: &ConfigLoader) -> Self {
        let field_ops: Arc<dyn FieldOpsClient> =
            Arc::new(HttpFieldOpsClient::new(config.field_ops()));
        let routing: Arc<dyn RoutingProvider> =
            Arc::new(HttpRoutingClient::new(config.routing()));

        let routing_credential = match routing.fetch_credential().await {
            Ok(credential) => Some(credential),
            Err(error) => {
                warn!(%error, "routing credential grant failed; anomaly resolution disabled");
                None
            }
        };

        Self::new(field_ops, routing, routing_credential)
    }

    /// Returns the field-ops client.
    pub fn field_ops(&self) -> &Arc<dyn FieldOpsClient> {
        &self.field_ops
    }

    /// Returns the anomaly resolver.
    pub fn resolver(&self) -> &AnomalyResolver {
        &self.resolver
    }

    /// Returns the session routing credential, if one was obtained.
    pub fn routing_credential(&self) -> Option<&RoutingCredential> {
        self.routing_credential.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
