// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for relay access

use thiserror::Error;

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;

/// Why a single relay attempt failed
///
/// Attempt failures are always recovered locally by moving on to the next
/// relay; only the last one is kept for the surfaced error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum RelayAttemptFailure {
    /// Relay answered with a non-success status
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// Connection, TLS or body transfer failed
    #[error("transport error: {message}")]
    Transport { message: String },

    /// Attempt exceeded the per-attempt timeout
    #[error("timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Relay answered with a success status but the body is not JSON
    #[error("invalid JSON body: {message}")]
    InvalidJson { message: String },
}

impl RelayAttemptFailure {
    /// Create a transport failure
    pub fn transport<T: ToString>(message: T) -> Self {
        Self::Transport {
            message: message.to_string(),
        }
    }

    /// Create an invalid JSON failure
    pub fn invalid_json<T: ToString>(message: T) -> Self {
        Self::InvalidJson {
            message: message.to_string(),
        }
    }

    /// Whether the relay refused us for sending too many requests
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Status { status: 429 })
    }
}

/// Errors surfaced by relay access
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum RelayError {
    /// Every relay in the rotation failed for one logical request
    ///
    /// `attempts` counts relay attempts across every rotation pass.
    #[error("All relays failed after {attempts} attempts. Last error: {last}")]
    AllRelaysFailed {
        attempts: usize,
        last: RelayAttemptFailure,
    },

    /// The operation was cancelled before a relay answered
    #[error("Relay request cancelled")]
    Cancelled,

    /// Relay list or client settings are invalid
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The target URL cannot be wrapped
    #[error("Invalid target URL: {message}")]
    InvalidTarget { message: String },
}

impl RelayError {
    /// Create a configuration error
    pub fn configuration<T: ToString>(message: T) -> Self {
        Self::Configuration {
            message: message.to_string(),
        }
    }

    /// Create an invalid target error
    pub fn invalid_target<T: ToString>(message: T) -> Self {
        Self::InvalidTarget {
            message: message.to_string(),
        }
    }

    /// Whether repeating the whole rotation could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::AllRelaysFailed { .. })
    }

    /// The last per-attempt failure, if relays were actually tried
    pub fn last_attempt_failure(&self) -> Option<&RelayAttemptFailure> {
        match self {
            Self::AllRelaysFailed { last, .. } => Some(last),
            _ => None,
        }
    }
}
