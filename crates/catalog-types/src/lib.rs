// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared music catalog types
//!
//! This crate provides the plain data values handed to gallery consumers:
//! catalog entities as the upstream catalog serves them, the list envelope
//! wrapping every list endpoint, and the track orderings offered by the
//! gallery's sort menu.

pub mod entities;
pub mod page;
pub mod sort;

pub use entities::{Album, AlbumCovers, Artist, ArtistPictures, Resolution, Track};
pub use page::CatalogPage;
pub use sort::{TrackSort, TrackSortParseError};
