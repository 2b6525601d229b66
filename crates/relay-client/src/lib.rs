// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Rotating CORS-relay access for browser-hostile catalog APIs
//!
//! The music catalog forbids direct browser calls, so every request is wrapped
//! in one of several public relay endpoints. Relays are untrusted and come and
//! go; this crate turns one logical target URL into a parsed JSON value by
//! trying them in a deterministic order.
//!
//! # Core Abstractions
//!
//! - **[`JsonSource`] Trait**: seam between domain clients and the transport
//! - **[`RelaySet`] / [`RelayEndpoint`]**: the ordered, immutable relay list and its
//!   `prefix + percent_encode(target)` wrapping contract
//! - **[`ProxyRotator`]**: attempt order starting at the last relay that succeeded
//! - **[`RelayFetcher`]**: sequential attempts with per-attempt timeouts, JSON
//!   parsing, sticky affinity, optional whole-rotation retry and cancellation
//! - **Health Reporting**: [`RelayHealth`] probes for monitoring
//!
//! # Behavior
//!
//! - Attempts for one target are strictly sequential and stop at the first relay
//!   that returns a success status with a parseable JSON body
//! - A non-success status, transport error, timeout or unparseable body moves on
//!   to the next relay
//! - Only a successful fetch moves the rotation cursor
//! - When every relay fails, [`RelayError::AllRelaysFailed`] carries the last reason

use serde_json::Value;
use url::Url;

pub mod config;
pub mod endpoint;
pub mod error;
pub mod fetcher;
pub mod health;
pub mod rotation;

pub use config::RelayConfig;
pub use endpoint::{RelayEndpoint, RelaySet};
pub use error::{RelayAttemptFailure, RelayError, RelayResult};
pub use fetcher::RelayFetcher;
pub use health::{HealthStatus, RelayHealth};
pub use rotation::{ProxyRotator, RotationState};

/// Source of JSON documents for a target URL
///
/// Domain clients are written against this trait so that the transport can be
/// swapped in tests or for deployments that reach the catalog directly.
pub trait JsonSource: Send + Sync {
    /// Fetch and parse the JSON document behind `target`
    ///
    /// # Errors
    ///
    /// Returns an error if no attempt produced a parseable JSON body, or if the
    /// operation was cancelled
    fn fetch_json(&self, target: &Url) -> impl Future<Output = RelayResult<Value>> + Send;

    /// Get the name/identifier of this source
    fn name(&self) -> &'static str;
}
