// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Relay fetcher configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    endpoint::RelayEndpoint,
    error::{RelayError, RelayResult},
};

const DEFAULT_ATTEMPT_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_MAX_ROTATION_PASSES: u32 = 1;
const DEFAULT_ROTATION_BACKOFF_MILLIS: u64 = 250;
const MAX_ATTEMPT_TIMEOUT_SECONDS: u64 = 300;
const MAX_ROTATION_PASSES: u32 = 5;

/// Configuration for [`crate::RelayFetcher`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Relays in default order of preference
    pub relays: Vec<RelayEndpoint>,
    /// Upper bound for one relay attempt, including reading the body
    pub attempt_timeout_seconds: u64,
    /// How many times the whole rotation may be walked for one request
    ///
    /// `1` means a single pass, after which the failure is surfaced.
    pub max_rotation_passes: u32,
    /// Base delay between rotation passes; grows exponentially with jitter
    pub rotation_backoff_millis: u64,
    /// User agent sent to relays
    pub user_agent: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            relays: RelayEndpoint::defaults(),
            attempt_timeout_seconds: DEFAULT_ATTEMPT_TIMEOUT_SECONDS,
            max_rotation_passes: DEFAULT_MAX_ROTATION_PASSES,
            rotation_backoff_millis: DEFAULT_ROTATION_BACKOFF_MILLIS,
            user_agent: concat!("music-gallery/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl RelayConfig {
    /// Replace the relay list
    #[must_use]
    pub fn with_relays(mut self, relays: Vec<RelayEndpoint>) -> Self {
        self.relays = relays;
        self
    }

    /// Set the per-attempt timeout
    #[must_use]
    pub fn with_attempt_timeout(mut self, seconds: u64) -> Self {
        self.attempt_timeout_seconds = seconds;
        self
    }

    /// Allow the whole rotation to be retried up to `passes` times in total
    #[must_use]
    pub fn with_max_rotation_passes(mut self, passes: u32) -> Self {
        self.max_rotation_passes = passes;
        self
    }

    /// Set the base backoff between rotation passes
    #[must_use]
    pub fn with_rotation_backoff(mut self, millis: u64) -> Self {
        self.rotation_backoff_millis = millis;
        self
    }

    /// Per-attempt timeout as a duration
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.attempt_timeout_seconds)
    }

    /// Validate the configuration
    pub fn validate(&self) -> RelayResult<()> {
        if self.relays.is_empty() {
            return Err(RelayError::configuration(
                "at least one relay endpoint is required",
            ));
        }

        if self.attempt_timeout_seconds == 0
            || self.attempt_timeout_seconds > MAX_ATTEMPT_TIMEOUT_SECONDS
        {
            return Err(RelayError::configuration(format!(
                "Invalid attempt timeout: {} seconds (must be 1-{MAX_ATTEMPT_TIMEOUT_SECONDS})",
                self.attempt_timeout_seconds
            )));
        }

        if self.max_rotation_passes == 0 || self.max_rotation_passes > MAX_ROTATION_PASSES {
            return Err(RelayError::configuration(format!(
                "Invalid rotation passes: {} (must be 1-{MAX_ROTATION_PASSES})",
                self.max_rotation_passes
            )));
        }

        if self.user_agent.trim().is_empty() {
            return Err(RelayError::configuration("user agent cannot be empty"));
        }

        Ok(())
    }
}
