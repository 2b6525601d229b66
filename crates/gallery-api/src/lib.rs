// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Music Gallery API Server
//!
//! HTTP front for the catalog access layer, built with Axum. Every catalog
//! request goes through rotating relays; the server adds configuration,
//! request tracing, metrics, error mapping and coordinated shutdown.
//!
//! # Module Structure
//!
//! - [`config`]: Server and catalog configuration with hierarchical loading
//! - [`error`]: Error types and HTTP response mapping
//! - [`extractors`]: Query and path extractors with JSON rejections
//! - [`metrics`]: Prometheus request counters and catalog timings
//! - [`state`]: Shared application state and relay health reporting
//! - [`server`]: Server lifecycle and coordinated shutdown
//! - [`routes`]: Route table and handlers
//!
//! # Key Features
//!
//! - **Relay Failover**: catalog calls survive individual relays going away
//! - **Graceful Shutdown**: a `CancellationToken` also aborts relay attempts in flight
//! - **Health Monitoring**: `/health` probes every relay and reports the preferred one
//! - **Consistent Errors**: every failure answers with the same JSON shape

pub mod config;
pub mod error;
pub mod extractors;
pub mod metrics;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{CatalogSettings, Environment, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::{Server, ShutdownConfig};
pub use state::{HealthCheck, ServerState};
