// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error handling module
//!
//! Server lifecycle errors plus the HTTP mapping of catalog failures.

use std::net::SocketAddr;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog_api::CatalogError;
use relay_client::RelayError;
use thiserror::Error;

/// Error types for server operations
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Network binding errors
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        /// Socket address that failed to bind
        address: SocketAddr,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server startup errors
    #[error("Server startup failed: {source}")]
    Startup {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server shutdown errors
    #[error("Server shutdown failed: {source}")]
    Shutdown {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catalog access failures
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Catalog(error) => catalog_status(error),
            Self::Config { .. }
            | Self::Bind { .. }
            | Self::Startup { .. }
            | Self::Shutdown { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn catalog_status(error: &CatalogError) -> StatusCode {
    match error {
        CatalogError::EmptyQuery => StatusCode::BAD_REQUEST,
        error if error.is_not_found() => StatusCode::NOT_FOUND,
        CatalogError::Upstream { .. }
        | CatalogError::UpstreamShape { .. }
        | CatalogError::Relay(RelayError::AllRelaysFailed { .. }) => StatusCode::BAD_GATEWAY,
        CatalogError::Relay(RelayError::Cancelled) => StatusCode::SERVICE_UNAVAILABLE,
        CatalogError::Configuration { .. }
        | CatalogError::Relay(RelayError::Configuration { .. } | RelayError::InvalidTarget { .. }) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let json_body = match &self {
            ServerError::Catalog(error) => serde_json::json!({
                "error": error.to_string(),
                "message": error.user_message(),
                "retryable": error.is_retryable(),
                "status": status.as_u16()
            }),
            _ => serde_json::json!({
                "error": self.to_string(),
                "status": status.as_u16()
            }),
        };

        (status, Json(json_body)).into_response()
    }
}
