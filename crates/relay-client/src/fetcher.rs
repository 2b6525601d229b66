// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Relay fetcher
//!
//! Turns a target URL into a parsed JSON value by walking the rotation order
//! one relay at a time. The first relay that answers with a success status and
//! a parseable body wins and becomes the first candidate for the next request.

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::{Duration, Instant},
};

use futures::future::join_all;
use reqwest::{
    Client,
    header::{ACCEPT, CACHE_CONTROL},
};
use serde_json::Value;
use tokio::time::timeout;
use tokio_retry::{
    RetryIf,
    strategy::{ExponentialBackoff, jitter},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};
use url::Url;
use uuid::Uuid;

use crate::{
    JsonSource,
    config::RelayConfig,
    endpoint::{RelayEndpoint, RelaySet},
    error::{RelayAttemptFailure, RelayError, RelayResult},
    health::{HealthStatus, RelayHealth},
    rotation::ProxyRotator,
};

const MAX_PASS_BACKOFF: Duration = Duration::from_secs(5);

/// Fetches JSON documents through rotating relays
///
/// Clones share the HTTP connection pool, the rotation cursor and the
/// cancellation token.
#[derive(Debug, Clone)]
pub struct RelayFetcher {
    client: Client,
    rotator: ProxyRotator,
    config: RelayConfig,
    cancellation_token: CancellationToken,
}

impl RelayFetcher {
    /// Create a fetcher from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if validation fails or the HTTP client
    /// cannot be built
    pub fn new(config: RelayConfig) -> RelayResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| RelayError::configuration(format!("failed to build HTTP client: {e}")))?;

        let relays = RelaySet::new(config.relays.clone())?;

        Ok(Self {
            client,
            rotator: ProxyRotator::new(relays),
            config,
            cancellation_token: CancellationToken::new(),
        })
    }

    /// Abort in-flight and future fetches when `token` is cancelled
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = token;
        self
    }

    /// The rotation shared by this fetcher and its clones
    pub fn rotator(&self) -> &ProxyRotator {
        &self.rotator
    }

    /// Active configuration
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Fetch `target` through the relays and parse the body as JSON
    ///
    /// # Errors
    ///
    /// - [`RelayError::InvalidTarget`] if `target` is not an http(s) URL
    /// - [`RelayError::AllRelaysFailed`] once every allowed pass has failed
    /// - [`RelayError::Cancelled`] if the cancellation token fires first
    #[instrument(skip(self), fields(target = %target, request_id = %Uuid::new_v4()))]
    pub async fn fetch(&self, target: &Url) -> RelayResult<Value> {
        if !matches!(target.scheme(), "http" | "https") {
            return Err(RelayError::invalid_target(format!(
                "unsupported scheme {}",
                target.scheme()
            )));
        }

        let passes = usize::try_from(self.config.max_rotation_passes).unwrap_or(1);
        if passes <= 1 {
            return self.fetch_once(target).await;
        }

        let strategy = ExponentialBackoff::from_millis(2)
            .factor((self.config.rotation_backoff_millis / 2).max(1))
            .max_delay(MAX_PASS_BACKOFF)
            .map(jitter)
            .take(passes - 1);

        let passes_run = AtomicUsize::new(0);
        let retry = RetryIf::spawn(
            strategy,
            || {
                passes_run.fetch_add(1, Ordering::Relaxed);
                self.fetch_once(target)
            },
            RelayError::is_retryable,
        );

        // Backoff sleeps between passes are cancellable too
        let result = tokio::select! {
            biased;
            () = self.cancellation_token.cancelled() => Err(RelayError::Cancelled),
            result = retry => result,
        };

        result.map_err(|error| match error {
            RelayError::AllRelaysFailed { attempts, last } => RelayError::AllRelaysFailed {
                attempts: attempts * passes_run.load(Ordering::Relaxed).max(1),
                last,
            },
            other => other,
        })
    }

    /// One pass over the rotation order
    async fn fetch_once(&self, target: &Url) -> RelayResult<Value> {
        let order = self.rotator.order_for_attempt();
        let attempts = order.len();
        let mut last_failure = None;

        for (index, relay) in order {
            let outcome = tokio::select! {
                biased;
                () = self.cancellation_token.cancelled() => {
                    debug!(relay = %relay, "cancelled before relay answered");
                    return Err(RelayError::Cancelled);
                }
                outcome = self.attempt(relay, target) => outcome,
            };

            match outcome {
                Ok(value) => {
                    self.rotator.record_success(index);
                    info!(relay = %relay, index, "relay fetch succeeded");
                    return Ok(value);
                }
                Err(failure) => {
                    warn!(relay = %relay, index, error = %failure, "relay attempt failed");
                    last_failure = Some(failure);
                }
            }
        }

        let Some(last) = last_failure else {
            return Err(RelayError::configuration("relay rotation is empty"));
        };

        error!(attempts, last_error = %last, "all relays failed");
        Err(RelayError::AllRelaysFailed { attempts, last })
    }

    /// A single GET through `relay`, bounded by the attempt timeout
    async fn attempt(
        &self,
        relay: &RelayEndpoint,
        target: &Url,
    ) -> Result<Value, RelayAttemptFailure> {
        let url = relay.wrap(target.as_str());
        debug!(relay = %relay, url, "trying relay");

        let request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-cache");

        let body = timeout(self.config.attempt_timeout(), async {
            let response = request.send().await.map_err(RelayAttemptFailure::transport)?;
            let status = response.status();
            if !status.is_success() {
                return Err(RelayAttemptFailure::Status {
                    status: status.as_u16(),
                });
            }
            response.text().await.map_err(RelayAttemptFailure::transport)
        })
        .await
        .map_err(|_| RelayAttemptFailure::Timeout {
            seconds: self.config.attempt_timeout_seconds,
        })??;

        serde_json::from_str(&body).map_err(RelayAttemptFailure::invalid_json)
    }

    /// Probe every relay concurrently with `target`
    ///
    /// Reports come back in configured relay order. Probing never moves the
    /// rotation cursor. Probes still running when the cancellation token
    /// fires report the relay as down.
    pub async fn probe_relays(&self, target: &Url) -> Vec<RelayHealth> {
        let preferred = self.rotator.cursor();

        let probes = self
            .rotator
            .relays()
            .iter()
            .enumerate()
            .map(|(index, relay)| async move {
                let started = Instant::now();
                let outcome = tokio::select! {
                    biased;
                    () = self.cancellation_token.cancelled() => None,
                    outcome = self.attempt(relay, target) => Some(outcome),
                };
                let response_time_ms =
                    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

                let status = match &outcome {
                    Some(Ok(_)) => HealthStatus::Up,
                    Some(Err(failure)) => HealthStatus::from(failure),
                    None => HealthStatus::Down {
                        reason: RelayError::Cancelled.to_string(),
                    },
                };

                RelayHealth {
                    name: relay.name().to_string(),
                    index,
                    status,
                    response_time_ms,
                    preferred: index == preferred,
                }
            });

        join_all(probes).await
    }
}

impl JsonSource for RelayFetcher {
    fn fetch_json(&self, target: &Url) -> impl Future<Output = RelayResult<Value>> + Send {
        self.fetch(target)
    }

    fn name(&self) -> &'static str {
        "relay"
    }
}
