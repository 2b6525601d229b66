// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Best-effort artist biographies from the encyclopedia summary endpoint
//!
//! The encyclopedia allows direct calls, so no relay is involved. Every
//! failure degrades to a generated paragraph that names the artist; callers
//! always get text back.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::{config::BiographyConfig, error::CatalogResult};

/// Extracts shorter than this get the short description prepended
const PREPEND_DESCRIPTION_BELOW: usize = 200;
/// Biographies shorter than this are replaced by the generated paragraph
const MINIMUM_BIOGRAPHY_CHARS: usize = 150;

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Error)]
enum SummaryError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("timed out after {0}s")]
    Timeout(u64),
}

/// Resolves a short biography for an artist name
#[derive(Debug, Clone)]
pub struct BiographyResolver {
    client: Client,
    config: BiographyConfig,
}

impl BiographyResolver {
    /// Create a resolver
    ///
    /// # Errors
    ///
    /// Returns a configuration error if validation fails or the HTTP client
    /// cannot be built
    pub fn new(config: BiographyConfig) -> CatalogResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("music-gallery/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                crate::CatalogError::configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Get a biography for `artist_name`; never fails
    #[instrument(skip(self))]
    pub async fn get_biography(&self, artist_name: &str) -> String {
        match self.fetch_summary(artist_name).await {
            Ok(summary) => shape_biography(artist_name, summary),
            Err(error) => {
                warn!(artist = artist_name, %error, "biography lookup failed, using generated text");
                fallback_biography(artist_name)
            }
        }
    }

    async fn fetch_summary(&self, artist_name: &str) -> Result<PageSummary, SummaryError> {
        let url = self.config.summary_url(artist_name);
        debug!(url, "fetching page summary");

        let response = timeout(self.config.timeout(), self.client.get(&url).send())
            .await
            .map_err(|_| SummaryError::Timeout(self.config.timeout_seconds))??;

        if !response.status().is_success() {
            return Err(SummaryError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }
}

fn shape_biography(artist_name: &str, summary: PageSummary) -> String {
    let mut biography = summary.extract.unwrap_or_default();

    if !biography.is_empty()
        && biography.chars().count() < PREPEND_DESCRIPTION_BELOW
        && let Some(description) = summary.description.filter(|d| !d.is_empty())
    {
        biography = format!("{description}. {biography}");
    }

    if biography.chars().count() < MINIMUM_BIOGRAPHY_CHARS {
        debug!(artist = artist_name, "summary too short, using generated text");
        return fallback_biography(artist_name);
    }

    biography
}

/// Generated paragraph used when no usable summary exists
pub fn fallback_biography(artist_name: &str) -> String {
    format!(
        "{artist_name} is a renowned musical artist known for their distinctive style and \
         significant contributions to the music industry. With a diverse catalog spanning \
         multiple albums and genres, {artist_name} has captivated audiences worldwide. Their \
         work showcases exceptional artistic vision and technical prowess, establishing them \
         as an influential figure in contemporary music. Through innovative compositions and \
         memorable performances, they have built a dedicated following and earned critical \
         acclaim throughout their career."
    )
}
