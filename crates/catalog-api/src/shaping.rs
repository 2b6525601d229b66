// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Pure list shaping: de-duplication, ordering and shuffling

use std::{cmp::Reverse, collections::HashSet};

use catalog_types::{Track, TrackSort};
use rand::seq::SliceRandom;

/// Drop items whose id was already seen, keeping first occurrences in order
pub fn dedupe_by_id<T>(items: Vec<T>, id: impl Fn(&T) -> u64) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.into_iter().filter(|item| seen.insert(id(item))).collect()
}

/// Order tracks for display
///
/// All orderings except [`TrackSort::Random`] are stable. Title and artist
/// comparisons ignore case.
pub fn sort_tracks(mut tracks: Vec<Track>, sort: TrackSort) -> Vec<Track> {
    match sort {
        TrackSort::Default => {}
        TrackSort::TitleAsc => tracks.sort_by_cached_key(|t| t.title.to_lowercase()),
        TrackSort::TitleDesc => tracks.sort_by_cached_key(|t| Reverse(t.title.to_lowercase())),
        TrackSort::ArtistAsc => tracks.sort_by_cached_key(|t| t.artist.name.to_lowercase()),
        TrackSort::ArtistDesc => {
            tracks.sort_by_cached_key(|t| Reverse(t.artist.name.to_lowercase()));
        }
        TrackSort::DurationAsc => tracks.sort_by_key(|t| t.duration),
        TrackSort::DurationDesc => tracks.sort_by_key(|t| Reverse(t.duration)),
        TrackSort::Random => tracks.shuffle(&mut rand::rng()),
    }
    tracks
}

/// Uniformly shuffle `tracks` and keep at most `limit` of them
pub fn shuffle_tracks(mut tracks: Vec<Track>, limit: usize) -> Vec<Track> {
    tracks.shuffle(&mut rand::rng());
    tracks.truncate(limit);
    tracks
}
