// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Catalog entities: artists, albums and tracks
//!
//! Field names follow the upstream catalog wire format. Tracks embed full
//! artist and album snapshots exactly as the catalog returns them; nothing is
//! re-normalized into references.

use serde::{Deserialize, Deserializer, Serialize};

/// Artwork resolution available for artist pictures and album covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Original upstream URL (unspecified size)
    #[default]
    Default,
    /// 56x56
    Small,
    /// 250x250
    Medium,
    /// 500x500
    Big,
    /// 1000x1000
    Xl,
}

/// Artist picture URLs at the five catalog resolutions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ArtistPictures {
    /// Default picture URL
    #[serde(rename = "picture", default, deserialize_with = "nullable_string")]
    pub default: String,
    /// Small picture URL
    #[serde(rename = "picture_small", default, deserialize_with = "nullable_string")]
    pub small: String,
    /// Medium picture URL
    #[serde(rename = "picture_medium", default, deserialize_with = "nullable_string")]
    pub medium: String,
    /// Big picture URL
    #[serde(rename = "picture_big", default, deserialize_with = "nullable_string")]
    pub big: String,
    /// Extra-large picture URL
    #[serde(rename = "picture_xl", default, deserialize_with = "nullable_string")]
    pub xl: String,
}

impl ArtistPictures {
    /// Picture URL at the requested resolution (empty when upstream omitted it)
    pub fn at(&self, resolution: Resolution) -> &str {
        match resolution {
            Resolution::Default => &self.default,
            Resolution::Small => &self.small,
            Resolution::Medium => &self.medium,
            Resolution::Big => &self.big,
            Resolution::Xl => &self.xl,
        }
    }
}

/// Album cover URLs at the five catalog resolutions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AlbumCovers {
    /// Default cover URL
    #[serde(rename = "cover", default, deserialize_with = "nullable_string")]
    pub default: String,
    /// Small cover URL
    #[serde(rename = "cover_small", default, deserialize_with = "nullable_string")]
    pub small: String,
    /// Medium cover URL
    #[serde(rename = "cover_medium", default, deserialize_with = "nullable_string")]
    pub medium: String,
    /// Big cover URL
    #[serde(rename = "cover_big", default, deserialize_with = "nullable_string")]
    pub big: String,
    /// Extra-large cover URL
    #[serde(rename = "cover_xl", default, deserialize_with = "nullable_string")]
    pub xl: String,
}

impl AlbumCovers {
    /// Cover URL at the requested resolution (empty when upstream omitted it)
    pub fn at(&self, resolution: Resolution) -> &str {
        match resolution {
            Resolution::Default => &self.default,
            Resolution::Small => &self.small,
            Resolution::Medium => &self.medium,
            Resolution::Big => &self.big,
            Resolution::Xl => &self.xl,
        }
    }
}

/// A catalog artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    /// Catalog artist id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Picture URLs
    #[serde(flatten)]
    pub pictures: ArtistPictures,
    /// Number of albums, when the endpoint reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nb_album: Option<u32>,
    /// Number of fans, when the endpoint reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nb_fan: Option<u64>,
    /// Track-listing reference URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracklist: Option<String>,
}

/// A catalog album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    /// Catalog album id
    pub id: u64,
    /// Album title
    pub title: String,
    /// Cover URLs
    #[serde(flatten)]
    pub covers: AlbumCovers,
    /// Release date as reported upstream (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Track-listing reference URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracklist: Option<String>,
}

/// A catalog track with embedded artist and album snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Catalog track id
    pub id: u64,
    /// Track title
    pub title: String,
    /// Duration in seconds
    #[serde(default)]
    pub duration: u32,
    /// Preview audio URL; empty when no preview is available
    #[serde(default, deserialize_with = "nullable_string")]
    pub preview: String,
    /// Owning artist snapshot
    pub artist: Artist,
    /// Owning album snapshot
    pub album: Album,
    /// Popularity rank, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u64>,
}

impl Track {
    /// Whether the track has a playable preview
    pub fn has_preview(&self) -> bool {
        !self.preview.is_empty()
    }
}

/// Treat an explicit JSON `null` the same as a missing string
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
