// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Music catalog access for the gallery
//!
//! This crate wraps the public Deezer catalog behind typed operations and adds
//! the presentation helpers the gallery needs.
//!
//! # Architecture
//!
//! - **Catalog Client**: [`deezer::CatalogClient`] - builds catalog URLs, fetches them
//!   through any [`relay_client::JsonSource`] and shapes the JSON into entities
//! - **Biography**: [`biography::BiographyResolver`] - best-effort artist summaries
//!   that never fail outward
//! - **Profile Loading**: [`profile::ArtistProfileLoader`] - joint artist page load
//! - **Shaping Utilities**: [`shaping`] and [`format`] - pure list and text helpers
//! - **Validation Utilities**: [`search_query::SearchQuery`] - non-blank search terms
//!
//! # Features
//!
//! - **Relay Failover**: every catalog call inherits rotation and sticky affinity
//! - **Upstream Error Envelopes**: Deezer's in-body `error` objects become typed errors
//! - **Local Guards**: blank searches fail before any network traffic
//! - **Testing Support**: wiremock stands in for relays and the encyclopedia

pub mod biography;
pub mod config;
pub mod deezer;
pub mod error;
pub mod format;
pub mod profile;
pub mod search_query;
pub mod shaping;

pub use biography::BiographyResolver;
pub use config::{BiographyConfig, CatalogConfig};
pub use deezer::{CatalogClient, GENRE_IDS};
pub use error::{CatalogError, CatalogResult};
pub use format::{format_compact_number, format_duration};
pub use profile::{ArtistProfile, ArtistProfileLoader};
pub use search_query::SearchQuery;
pub use shaping::{dedupe_by_id, shuffle_tracks, sort_tracks};
