// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Deezer catalog client
//!
//! Builds catalog URLs, fetches them through a [`JsonSource`] and shapes the
//! JSON into catalog entities. List endpoints answer with a
//! `{ "data": [...], "total"?, "next"? }` envelope; failures the catalog
//! reports itself arrive as a success status with an `error` object body.

use catalog_types::{Album, Artist, CatalogPage, Track};
use relay_client::{JsonSource, RelayFetcher};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{
    config::CatalogConfig,
    error::{CatalogError, CatalogResult},
    search_query::SearchQuery,
    shaping::{dedupe_by_id, shuffle_tracks},
};

/// Curated genre ids used to seed genre browsing
pub const GENRE_IDS: [u32; 10] = [132, 113, 116, 152, 165, 85, 106, 144, 173, 189];

/// Default number of top tracks per artist
pub const DEFAULT_TOP_TRACKS_LIMIT: u32 = 10;
/// Default number of albums per artist
pub const DEFAULT_ALBUMS_LIMIT: u32 = 12;
/// Default number of search results
pub const DEFAULT_SEARCH_LIMIT: u32 = 50;
/// Number of chart tracks requested
pub const CHART_LIMIT: u32 = 100;
/// Upper bound of the random selection
pub const RANDOM_SONGS_LIMIT: usize = 100;

/// In-body error object, e.g. `{"type":"DataException","message":"no data","code":800}`
#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: u32,
}

/// Typed access to the catalog through a JSON source
#[derive(Debug, Clone)]
pub struct CatalogClient<S = RelayFetcher> {
    source: S,
    base_url: String,
}

impl CatalogClient<RelayFetcher> {
    /// Create a client that reaches the catalog through rotating relays
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the catalog or relay settings are invalid
    pub fn new(config: CatalogConfig) -> CatalogResult<Self> {
        config.validate()?;
        let fetcher = RelayFetcher::new(config.relay.clone())?;
        Ok(Self::with_source(fetcher, config.base_url()))
    }
}

impl<S: JsonSource> CatalogClient<S> {
    /// Create a client on top of any JSON source
    pub fn with_source(source: S, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { source, base_url }
    }

    /// The underlying JSON source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Catalog API root
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// A cheap catalog URL suitable for relay health probes
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL cannot be joined
    pub fn probe_target(&self) -> CatalogResult<Url> {
        self.target("/chart/0/tracks?limit=1")
    }

    /// Get an artist by id
    ///
    /// # Errors
    ///
    /// Returns an error if no relay produced JSON, the catalog reported an
    /// error, or the body is not an artist object
    #[instrument(skip(self))]
    pub async fn get_artist(&self, artist_id: u64) -> CatalogResult<Artist> {
        self.fetch(&format!("/artist/{artist_id}")).await
    }

    /// Get an artist's most popular tracks in catalog order
    ///
    /// `limit` defaults to 10.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::get_artist`]
    #[instrument(skip(self))]
    pub async fn get_artist_top_tracks(
        &self,
        artist_id: u64,
        limit: Option<u32>,
    ) -> CatalogResult<Vec<Track>> {
        let limit = limit.unwrap_or(DEFAULT_TOP_TRACKS_LIMIT);
        self.fetch_list(&format!("/artist/{artist_id}/top?limit={limit}"))
            .await
    }

    /// Get an artist's albums with duplicate ids removed
    ///
    /// `limit` defaults to 12 and applies before de-duplication.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::get_artist`]
    #[instrument(skip(self))]
    pub async fn get_artist_albums(
        &self,
        artist_id: u64,
        limit: Option<u32>,
    ) -> CatalogResult<Vec<Album>> {
        let limit = limit.unwrap_or(DEFAULT_ALBUMS_LIMIT);
        let albums: Vec<Album> = self
            .fetch_list(&format!("/artist/{artist_id}/albums?limit={limit}"))
            .await?;

        let received = albums.len();
        let albums = dedupe_by_id(albums, |album| album.id);
        if albums.len() < received {
            debug!(received, kept = albums.len(), "dropped duplicate albums");
        }
        Ok(albums)
    }

    /// Search tracks by free text
    ///
    /// `limit` defaults to 50. Blank queries fail locally.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyQuery`] for a blank query without any
    /// network traffic, otherwise the same errors as [`CatalogClient::get_artist`]
    #[instrument(skip(self))]
    pub async fn search_tracks(&self, query: &str, limit: Option<u32>) -> CatalogResult<Vec<Track>> {
        let query = SearchQuery::new(query)?;
        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        self.fetch_list(&format!(
            "/search?q={}&limit={limit}",
            urlencoding::encode(query.as_str())
        ))
        .await
    }

    /// Get the current chart, up to 100 tracks
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::get_artist`]
    #[instrument(skip(self))]
    pub async fn get_chart_songs(&self) -> CatalogResult<Vec<Track>> {
        self.fetch_list(&format!("/chart/0/tracks?limit={CHART_LIMIT}"))
            .await
    }

    /// Chart tracks in uniformly random order, at most 100
    ///
    /// # Errors
    ///
    /// Chart failures propagate unchanged
    #[instrument(skip(self))]
    pub async fn get_random_songs(&self) -> CatalogResult<Vec<Track>> {
        let chart = self.get_chart_songs().await?;
        Ok(shuffle_tracks(chart, RANDOM_SONGS_LIMIT))
    }

    /// Get the artists of a genre
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::get_artist`]
    #[instrument(skip(self))]
    pub async fn get_genre_artists(&self, genre_id: u32) -> CatalogResult<Vec<Artist>> {
        self.fetch_list(&format!("/genre/{genre_id}/artists")).await
    }

    fn target(&self, path_and_query: &str) -> CatalogResult<Url> {
        let raw = format!("{}{path_and_query}", self.base_url);
        Url::parse(&raw)
            .map_err(|e| CatalogError::configuration(format!("invalid catalog URL {raw}: {e}")))
    }

    async fn fetch<T: DeserializeOwned>(&self, path_and_query: &str) -> CatalogResult<T> {
        let target = self.target(path_and_query)?;
        debug!(source = self.source.name(), %target, "fetching catalog document");
        let value = self.source.fetch_json(&target).await?;
        decode(endpoint(path_and_query), value)
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path_and_query: &str) -> CatalogResult<Vec<T>> {
        let page: CatalogPage<T> = self.fetch(path_and_query).await?;
        Ok(page.into_items())
    }
}

/// Path part of a catalog request, for error reports
fn endpoint(path_and_query: &str) -> &str {
    path_and_query
        .split_once('?')
        .map_or(path_and_query, |(path, _)| path)
}

fn decode<T: DeserializeOwned>(endpoint: &str, value: Value) -> CatalogResult<T> {
    if let Some(error) = value.get("error") {
        let body: UpstreamErrorBody = serde_json::from_value(error.clone())
            .map_err(|e| CatalogError::shape(endpoint, format!("malformed error object: {e}")))?;
        warn!(endpoint, code = body.code, kind = %body.kind, message = %body.message, "catalog reported an error");
        return Err(CatalogError::Upstream {
            code: body.code,
            kind: body.kind,
            message: body.message,
        });
    }

    serde_json::from_value(value).map_err(|e| {
        warn!(endpoint, error = %e, "unexpected catalog response shape");
        CatalogError::shape(endpoint, e)
    })
}
