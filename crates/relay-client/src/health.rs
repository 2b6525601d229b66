// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Health types for relay probes

use serde::{Deserialize, Serialize};

use crate::error::RelayAttemptFailure;

/// Health status of a relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum HealthStatus {
    /// Relay answered with a JSON body
    Up,
    /// Relay is reachable but not usable right now
    Degraded { reason: String },
    /// Relay is unreachable or failing
    Down { reason: String },
}

impl HealthStatus {
    /// Check if this health status indicates the relay is reachable
    pub fn is_available(&self) -> bool {
        matches!(self, HealthStatus::Up | HealthStatus::Degraded { .. })
    }

    /// Check if this health status indicates the relay is completely down
    pub fn is_down(&self) -> bool {
        matches!(self, HealthStatus::Down { .. })
    }

    /// Get a human-readable description of the status
    pub fn description(&self) -> &str {
        match self {
            HealthStatus::Up => "Relay is healthy",
            HealthStatus::Degraded { reason } | HealthStatus::Down { reason } => reason,
        }
    }
}

impl From<&RelayAttemptFailure> for HealthStatus {
    fn from(failure: &RelayAttemptFailure) -> Self {
        let reason = failure.to_string();
        // The relay is alive, it just refused or mangled the payload
        let mangled = matches!(failure, RelayAttemptFailure::InvalidJson { .. });
        if failure.is_rate_limited() || mangled {
            HealthStatus::Degraded { reason }
        } else {
            HealthStatus::Down { reason }
        }
    }
}

/// Probe result for one relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayHealth {
    /// Relay name
    pub name: String,
    /// Index in the configured relay order
    pub index: usize,
    /// Probe outcome
    pub status: HealthStatus,
    /// Wall time of the probe in milliseconds
    pub response_time_ms: u64,
    /// Whether this relay is currently tried first
    pub preferred: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_status_availability() {
        assert!(HealthStatus::Up.is_available());
        assert!(
            HealthStatus::Degraded {
                reason: "rate limited".to_string()
            }
            .is_available()
        );
        assert!(
            !HealthStatus::Down {
                reason: "offline".to_string()
            }
            .is_available()
        );
        assert!(HealthStatus::Down { reason: String::new() }.is_down());
    }

    #[test]
    fn attempt_failures_map_to_status() {
        let limited = HealthStatus::from(&RelayAttemptFailure::Status { status: 429 });
        assert!(matches!(limited, HealthStatus::Degraded { .. }));

        let html = HealthStatus::from(&RelayAttemptFailure::invalid_json("expected value"));
        assert!(matches!(html, HealthStatus::Degraded { .. }));

        let failing = HealthStatus::from(&RelayAttemptFailure::Status { status: 502 });
        assert_eq!(failing.description(), "HTTP 502");
        assert!(failing.is_down());

        let slow = HealthStatus::from(&RelayAttemptFailure::Timeout { seconds: 10 });
        assert!(slow.is_down());
    }

    #[test]
    fn serializes_with_state_tag() {
        let json = serde_json::to_value(HealthStatus::Down {
            reason: "HTTP 500".to_string(),
        })
        .unwrap();
        assert_eq!(json["state"], "down");
        assert_eq!(json["reason"], "HTTP 500");
    }
}
