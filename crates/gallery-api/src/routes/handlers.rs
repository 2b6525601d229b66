// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP request handlers module
//!
//! Handlers stay thin: they validate query parameters, call the catalog
//! layer and shape the result. Catalog failures become [`ServerError::Catalog`]
//! and are mapped to statuses in one place.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use catalog_api::{ArtistProfile, sort_tracks};
use catalog_types::{Album, Artist, Track, TrackSort};
use relay_client::HealthStatus;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::ServerError,
    extractors::{PathExtractor, QueryExtractor},
    metrics::track,
    state::ServerState,
};

/// Largest `limit` accepted by list endpoints
pub const MAX_LIMIT: u32 = 100;

/// Health check endpoint handler
///
/// Answers 503 when no relay is usable so load balancers can react.
pub async fn health_handler(
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let health = state.health_check().await?;
    let status = if health.status.is_down() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    debug!(
        available = health.relays.iter().filter(|r| r.status.is_available()).count(),
        up = matches!(health.status, HealthStatus::Up),
        "health probed"
    );
    Ok((status, Json(health)))
}

/// `?limit=` query
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    /// Number of items, 1-100
    pub limit: Option<u32>,
}

/// `?sort=` query
#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    /// Track ordering wire name, e.g. `title-asc`
    pub sort: Option<String>,
}

/// Search query string
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Free text; a missing value is treated as blank
    pub q: Option<String>,
    /// Number of results, 1-100
    pub limit: Option<u32>,
    /// Track ordering wire name
    pub sort: Option<String>,
}

fn check_limit(limit: Option<u32>) -> Result<Option<u32>, ServerError> {
    match limit {
        Some(n) if n == 0 || n > MAX_LIMIT => Err(ServerError::Validation(format!(
            "limit must be between 1 and {MAX_LIMIT}, got {n}"
        ))),
        other => Ok(other),
    }
}

fn parse_sort(sort: Option<&str>) -> Result<TrackSort, ServerError> {
    sort.map_or(Ok(TrackSort::Default), |s| {
        s.parse()
            .map_err(|e: catalog_types::TrackSortParseError| ServerError::Validation(e.to_string()))
    })
}

/// Artist page: artist, top tracks, albums and biography
pub async fn artist_profile_handler(
    State(state): State<ServerState>,
    PathExtractor(artist_id): PathExtractor<u64>,
) -> Result<Json<ArtistProfile>, ServerError> {
    let profile = track(
        "artist_profile",
        state.profiles().load_artist_profile(artist_id),
    )
    .await?;
    Ok(Json(profile))
}

/// Most popular tracks of an artist
pub async fn artist_top_tracks_handler(
    State(state): State<ServerState>,
    PathExtractor(artist_id): PathExtractor<u64>,
    QueryExtractor(query): QueryExtractor<LimitQuery>,
) -> Result<Json<Vec<Track>>, ServerError> {
    let limit = check_limit(query.limit)?;
    let tracks = track(
        "artist_top_tracks",
        state.catalog().get_artist_top_tracks(artist_id, limit),
    )
    .await?;
    Ok(Json(tracks))
}

/// Albums of an artist, without duplicates
pub async fn artist_albums_handler(
    State(state): State<ServerState>,
    PathExtractor(artist_id): PathExtractor<u64>,
    QueryExtractor(query): QueryExtractor<LimitQuery>,
) -> Result<Json<Vec<Album>>, ServerError> {
    let limit = check_limit(query.limit)?;
    let albums = track(
        "artist_albums",
        state.catalog().get_artist_albums(artist_id, limit),
    )
    .await?;
    Ok(Json(albums))
}

/// Track search with optional ordering
pub async fn search_handler(
    State(state): State<ServerState>,
    QueryExtractor(params): QueryExtractor<SearchParams>,
) -> Result<Json<Vec<Track>>, ServerError> {
    let limit = check_limit(params.limit)?;
    let sort = parse_sort(params.sort.as_deref())?;
    let query = params.q.unwrap_or_default();

    let tracks = track("search", state.catalog().search_tracks(&query, limit)).await?;
    Ok(Json(sort_tracks(tracks, sort)))
}

/// Global chart with optional ordering
pub async fn chart_handler(
    State(state): State<ServerState>,
    QueryExtractor(query): QueryExtractor<SortQuery>,
) -> Result<Json<Vec<Track>>, ServerError> {
    let sort = parse_sort(query.sort.as_deref())?;
    let tracks = track("chart", state.catalog().get_chart_songs()).await?;
    Ok(Json(sort_tracks(tracks, sort)))
}

/// Shuffled selection from the chart
pub async fn random_handler(
    State(state): State<ServerState>,
) -> Result<Json<Vec<Track>>, ServerError> {
    let tracks = track("random", state.catalog().get_random_songs()).await?;
    Ok(Json(tracks))
}

/// Artists of a genre
pub async fn genre_artists_handler(
    State(state): State<ServerState>,
    PathExtractor(genre_id): PathExtractor<u32>,
) -> Result<Json<Vec<Artist>>, ServerError> {
    let artists = track(
        "genre_artists",
        state.catalog().get_genre_artists(genre_id),
    )
    .await?;
    Ok(Json(artists))
}
