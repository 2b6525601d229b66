// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for catalog access

use relay_client::RelayError;
use thiserror::Error;

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Deezer error code for "no data" (unknown artist, genre, ...)
pub const UPSTREAM_NO_DATA: u32 = 800;

/// Errors surfaced by catalog operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum CatalogError {
    /// The relay layer could not produce a JSON document
    #[error(transparent)]
    Relay(#[from] RelayError),

    /// Search was attempted with a blank query
    #[error("Search query cannot be empty")]
    EmptyQuery,

    /// The JSON document does not match the expected shape
    #[error("Unexpected response shape from {endpoint}: {message}")]
    UpstreamShape { endpoint: String, message: String },

    /// The catalog answered with its own error object
    #[error("Catalog error {code} ({kind}): {message}")]
    Upstream {
        code: u32,
        kind: String,
        message: String,
    },

    /// Client settings are invalid
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl CatalogError {
    /// Create a configuration error
    pub fn configuration<T: ToString>(message: T) -> Self {
        Self::Configuration {
            message: message.to_string(),
        }
    }

    /// Create a shape error for `endpoint`
    pub fn shape<E: ToString, M: ToString>(endpoint: E, message: M) -> Self {
        Self::UpstreamShape {
            endpoint: endpoint.to_string(),
            message: message.to_string(),
        }
    }

    /// Whether asking again might succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Relay(error) => error.is_retryable(),
            Self::UpstreamShape { .. } => true,
            Self::Upstream { code, .. } => *code != UPSTREAM_NO_DATA,
            Self::EmptyQuery | Self::Configuration { .. } => false,
        }
    }

    /// Whether the catalog reported that the requested entity does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Upstream { code, .. } if *code == UPSTREAM_NO_DATA)
    }

    /// Message suitable for showing to a listener
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "Type something to search for.",
            Self::Upstream { code, .. } if *code == UPSTREAM_NO_DATA => {
                "Nothing was found for this request."
            }
            Self::Relay(RelayError::Cancelled) => "The request was cancelled.",
            Self::Configuration { .. } | Self::Relay(RelayError::Configuration { .. }) => {
                "The music catalog is not configured correctly."
            }
            _ => "Could not load music right now. Please try again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use relay_client::RelayAttemptFailure;

    use super::*;

    fn exhausted() -> CatalogError {
        CatalogError::Relay(RelayError::AllRelaysFailed {
            attempts: 3,
            last: RelayAttemptFailure::Status { status: 502 },
        })
    }

    #[test]
    fn relay_errors_keep_their_message() {
        assert_eq!(
            exhausted().to_string(),
            "All relays failed after 3 attempts. Last error: HTTP 502"
        );
    }

    #[test]
    fn retryability() {
        assert!(exhausted().is_retryable());
        assert!(CatalogError::shape("/chart/0/tracks", "missing field `data`").is_retryable());
        assert!(!CatalogError::EmptyQuery.is_retryable());
        assert!(!CatalogError::Relay(RelayError::Cancelled).is_retryable());

        let no_data = CatalogError::Upstream {
            code: UPSTREAM_NO_DATA,
            kind: "DataException".to_string(),
            message: "no data".to_string(),
        };
        assert!(!no_data.is_retryable());
        assert!(no_data.is_not_found());
    }

    #[test]
    fn user_messages() {
        assert_eq!(
            exhausted().user_message(),
            "Could not load music right now. Please try again."
        );
        assert_eq!(
            CatalogError::EmptyQuery.user_message(),
            "Type something to search for."
        );
    }
}
