// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server state management module
//!
//! Shared application state for the gallery server: configuration, the catalog
//! access layer and the cancellation token used for coordinated shutdown.

use std::sync::Arc;

use catalog_api::{ArtistProfileLoader, CatalogClient};
use relay_client::{HealthStatus, RelayFetcher, RelayHealth};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::{
    config::{Environment, ServerConfig},
    error::ServerResult,
};

/// Shared application state with cancellation token support
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    config: ServerConfig,
    /// Catalog client plus biography resolver
    profiles: Arc<ArtistProfileLoader<RelayFetcher>>,
    /// Cancellation token for coordinated shutdown
    pub cancellation_token: CancellationToken,
}

impl ServerState {
    /// Create new server state
    pub fn new(
        config: ServerConfig,
        profiles: Arc<ArtistProfileLoader<RelayFetcher>>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            config,
            profiles,
            cancellation_token,
        }
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Artist profile loader
    pub fn profiles(&self) -> &ArtistProfileLoader<RelayFetcher> {
        &self.profiles
    }

    /// Catalog client
    pub fn catalog(&self) -> &CatalogClient<RelayFetcher> {
        self.profiles.catalog()
    }

    /// Probe every relay and summarise
    ///
    /// The service is up when every relay answers, degraded while at least one
    /// is usable, and down otherwise.
    pub async fn health_check(&self) -> ServerResult<HealthCheck> {
        let catalog = self.catalog();
        let target = catalog.probe_target()?;
        let relays = catalog.source().probe_relays(&target).await;

        let available = relays.iter().filter(|r| r.status.is_available()).count();
        let status = if relays.iter().all(|r| r.status == HealthStatus::Up) {
            HealthStatus::Up
        } else if available > 0 {
            HealthStatus::Degraded {
                reason: format!("{available} of {} relays available", relays.len()),
            }
        } else {
            HealthStatus::Down {
                reason: "no relay is reachable".to_string(),
            }
        };

        Ok(HealthCheck {
            status,
            version: Box::from(env!("CARGO_PKG_VERSION")),
            environment: self.config.environment,
            timestamp: chrono::Utc::now().to_rfc3339(),
            preferred_relay: catalog.source().rotator().cursor(),
            relays,
        })
    }
}

/// Health check status
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Service status
    pub status: HealthStatus,
    /// Service version
    pub version: Box<str>,
    /// Environment
    pub environment: Environment,
    /// Timestamp
    pub timestamp: String,
    /// Index of the relay tried first
    pub preferred_relay: usize,
    /// Per-relay probe results, in configured order
    pub relays: Vec<RelayHealth>,
}
