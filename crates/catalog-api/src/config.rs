// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client configuration

use std::time::Duration;

use relay_client::RelayConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CatalogError, CatalogResult};

const DEFAULT_CATALOG_BASE_URL: &str = "https://api.deezer.com";
const DEFAULT_BIOGRAPHY_BASE_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/summary/";
const DEFAULT_BIOGRAPHY_TIMEOUT_SECONDS: u64 = 10;

/// Configuration for [`crate::CatalogClient`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog API root, without a trailing slash
    pub base_url: String,
    /// Relay transport settings
    pub relay: RelayConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            relay: RelayConfig::default(),
        }
    }
}

impl CatalogConfig {
    /// Point the client at another catalog host
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the relay settings
    #[must_use]
    pub fn with_relay(mut self, relay: RelayConfig) -> Self {
        self.relay = relay;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> CatalogResult<()> {
        parse_base_url(&self.base_url)?;
        self.relay.validate()?;
        Ok(())
    }

    pub(crate) fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Configuration for [`crate::BiographyResolver`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiographyConfig {
    /// Summary endpoint; the encoded artist name is appended to it
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for BiographyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BIOGRAPHY_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_BIOGRAPHY_TIMEOUT_SECONDS,
        }
    }
}

impl BiographyConfig {
    /// Point the resolver at another summary endpoint
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Summary URL for `artist_name`, with or without a trailing slash on
    /// the base URL
    pub fn summary_url(&self, artist_name: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(artist_name)
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> CatalogResult<()> {
        parse_base_url(&self.base_url)?;
        if self.timeout_seconds == 0 {
            return Err(CatalogError::configuration(
                "biography timeout must be at least one second",
            ));
        }
        Ok(())
    }
}

fn parse_base_url(base_url: &str) -> CatalogResult<Url> {
    let url = Url::parse(base_url)
        .map_err(|e| CatalogError::configuration(format!("invalid base URL {base_url}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CatalogError::configuration(format!(
            "base URL must use http or https: {base_url}"
        )));
    }
    Ok(url)
}
