// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Joint artist page loading
//!
//! An artist page needs the artist, their top tracks and their albums. The
//! three catalog calls run concurrently and the load fails as a whole if any
//! of them fails; the biography is resolved afterwards and never fails.

use catalog_types::{Album, Artist, Track};
use relay_client::{JsonSource, RelayFetcher};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    biography::BiographyResolver,
    deezer::{CatalogClient, DEFAULT_ALBUMS_LIMIT, DEFAULT_TOP_TRACKS_LIMIT},
    error::CatalogResult,
};

/// Everything the artist page shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistProfile {
    /// The artist
    pub artist: Artist,
    /// Most popular tracks, catalog order
    pub top_tracks: Vec<Track>,
    /// Albums without duplicates
    pub albums: Vec<Album>,
    /// Encyclopedia summary or generated text
    pub biography: String,
}

/// Loads [`ArtistProfile`]s
#[derive(Debug, Clone)]
pub struct ArtistProfileLoader<S = RelayFetcher> {
    catalog: CatalogClient<S>,
    biography: BiographyResolver,
}

impl<S: JsonSource> ArtistProfileLoader<S> {
    /// Create a loader from a catalog client and a biography resolver
    pub fn new(catalog: CatalogClient<S>, biography: BiographyResolver) -> Self {
        Self { catalog, biography }
    }

    /// The catalog client used for the joint load
    pub fn catalog(&self) -> &CatalogClient<S> {
        &self.catalog
    }

    /// Load the artist page for `artist_id`
    ///
    /// # Errors
    ///
    /// Returns the first error among the three catalog calls
    #[instrument(skip(self))]
    pub async fn load_artist_profile(&self, artist_id: u64) -> CatalogResult<ArtistProfile> {
        let (artist, top_tracks, albums) = tokio::try_join!(
            self.catalog.get_artist(artist_id),
            self.catalog
                .get_artist_top_tracks(artist_id, Some(DEFAULT_TOP_TRACKS_LIMIT)),
            self.catalog
                .get_artist_albums(artist_id, Some(DEFAULT_ALBUMS_LIMIT)),
        )?;

        let biography = self.biography.get_biography(&artist.name).await;

        info!(
            artist = %artist.name,
            top_tracks = top_tracks.len(),
            albums = albums.len(),
            "loaded artist profile"
        );

        Ok(ArtistProfile {
            artist,
            top_tracks,
            albums,
            biography,
        })
    }
}
