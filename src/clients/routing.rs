//! Routing provider client.
//!
//! This module defines the [`RoutingProvider`] trait for road-distance
//! lookups between coordinate pairs, the session credential obtained via
//! a client-credentials grant, and the reqwest-backed
//! [`HttpRoutingClient`] implementation.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use uuid::Uuid;

use crate::config::RoutingConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::GeoPoint;

/// A short-lived access credential for the routing provider.
///
/// Obtained once per session via [`RoutingProvider::fetch_credential`];
/// the engine does not refresh it automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingCredential {
    access_token: String,
}

impl RoutingCredential {
    /// Wraps an already-obtained access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// The opaque bearer token.
    pub fn token(&self) -> &str {
        &self.access_token
    }
}

/// Road-distance lookups against an external routing service.
#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Obtains a session credential via the client-credentials grant.
    async fn fetch_credential(&self) -> EngineResult<RoutingCredential>;

    /// The road-network distance between two points, in kilometres.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RoutingUnavailable`] when the provider
    /// cannot be reached or returns no route.
    async fn road_distance_km(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        credential: &RoutingCredential,
    ) -> EngineResult<Decimal>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// HTTP implementation of [`RoutingProvider`].
///
/// The directions endpoint reports leg distances in metres; this client
/// converts them to kilometres. Every request carries fresh request and
/// correlation ids so provider-side traces line up with the engine's logs.
#[derive(Debug, Clone)]
pub struct HttpRoutingClient {
    http: reqwest::Client,
    base_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl HttpRoutingClient {
    /// Creates a client for the configured routing provider.
    pub fn new(config: &RoutingConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }
}

fn routing_unavailable(message: impl Into<String>) -> EngineError {
    EngineError::RoutingUnavailable {
        message: message.into(),
    }
}

#[async_trait]
impl RoutingProvider for HttpRoutingClient {
    async fn fetch_credential(&self) -> EngineResult<RoutingCredential> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", "openid"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| routing_unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(routing_unavailable(format!(
                "token grant failed with status {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| routing_unavailable(e.to_string()))?;
        Ok(RoutingCredential::new(token.access_token))
    }

    async fn road_distance_km(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        credential: &RoutingCredential,
    ) -> EngineResult<Decimal> {
        let response = self
            .http
            .post(format!("{}/routing/v1/directions", self.base_url))
            .query(&[
                (
                    "origin",
                    format!("{},{}", origin.latitude, origin.longitude),
                ),
                (
                    "destination",
                    format!("{},{}", destination.latitude, destination.longitude),
                ),
                ("alternatives", "false".to_string()),
                ("steps", "false".to_string()),
                ("overview", "full".to_string()),
                ("language", "en".to_string()),
                ("traffic_metadata", "false".to_string()),
            ])
            .bearer_auth(credential.token())
            .header("X-Request-Id", Uuid::new_v4().to_string())
            .header("X-Correlation-Id", Uuid::new_v4().to_string())
            .send()
            .await
            .map_err(|e| routing_unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(routing_unavailable(format!(
                "directions request failed with status {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| routing_unavailable(e.to_string()))?;

        let metres = body["routes"][0]["legs"][0]["distance"]
            .as_f64()
            .ok_or_else(|| routing_unavailable("no route in response"))?;

        let metres = Decimal::from_f64(metres)
            .ok_or_else(|| routing_unavailable(format!("unrepresentable distance {metres}")))?;
        Ok(metres / Decimal::from(1000))
    }
}
