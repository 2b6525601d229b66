// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Routes module
//!
//! Route table for the music gallery server.

pub mod handlers;

use axum::{Router, routing::get};
use handlers::{
    artist_albums_handler, artist_profile_handler, artist_top_tracks_handler, chart_handler,
    genre_artists_handler, health_handler, random_handler, search_handler,
};

use crate::{metrics::metrics_handler, state::ServerState};

/// Create application routes
pub fn create_routes() -> Router<ServerState> {
    // Monitoring endpoints stay outside the versioned API
    let monitoring_routes = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler));

    let api_routes = Router::new()
        .route("/artists/{id}", get(artist_profile_handler))
        .route("/artists/{id}/top", get(artist_top_tracks_handler))
        .route("/artists/{id}/albums", get(artist_albums_handler))
        .route("/search", get(search_handler))
        .route("/chart", get(chart_handler))
        .route("/random", get(random_handler))
        .route("/genres/{id}/artists", get(genre_artists_handler));

    Router::new()
        .merge(monitoring_routes)
        .nest("/v1", api_routes)
}
