// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Track orderings offered by the gallery sort menu

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordering applied to a track listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TrackSort {
    /// Upstream order
    #[default]
    Default,
    /// Title, A to Z
    TitleAsc,
    /// Title, Z to A
    TitleDesc,
    /// Artist name, A to Z
    ArtistAsc,
    /// Artist name, Z to A
    ArtistDesc,
    /// Shortest first
    DurationAsc,
    /// Longest first
    DurationDesc,
    /// Uniform shuffle
    Random,
}

/// Error returned when a sort name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown track sort: {0}")]
pub struct TrackSortParseError(pub String);

impl TrackSort {
    /// Wire name of this ordering
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::TitleAsc => "title-asc",
            Self::TitleDesc => "title-desc",
            Self::ArtistAsc => "artist-asc",
            Self::ArtistDesc => "artist-desc",
            Self::DurationAsc => "duration-asc",
            Self::DurationDesc => "duration-desc",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for TrackSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TrackSort {
    type Err = TrackSortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "default" => Ok(Self::Default),
            "title-asc" => Ok(Self::TitleAsc),
            "title-desc" => Ok(Self::TitleDesc),
            "artist-asc" => Ok(Self::ArtistAsc),
            "artist-desc" => Ok(Self::ArtistDesc),
            "duration-asc" => Ok(Self::DurationAsc),
            "duration-desc" => Ok(Self::DurationDesc),
            "random" | "shuffle" => Ok(Self::Random),
            _ => Err(TrackSortParseError(s.to_string())),
        }
    }
}
