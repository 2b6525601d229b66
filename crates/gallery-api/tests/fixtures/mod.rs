// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(dead_code)]

//! Test fixtures for the gallery server
//!
//! A wiremock server plays both the relays and the encyclopedia. Relays answer
//! for catalog URLs on the real catalog host, which is never contacted.

use std::net::SocketAddr;

use gallery_api::{CatalogSettings, Server, ServerConfig, ShutdownConfig};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use wiremock::{
    Mock, MockServer, ResponseTemplate, Times,
    matchers::{method, path, query_param},
};

pub const CATALOG: &str = "https://api.deezer.com";

pub fn catalog_url(path_and_query: &str) -> String {
    format!("{CATALOG}{path_and_query}")
}

/// Catalog settings pointing every relay and the encyclopedia at `mock`
pub fn catalog_settings(mock: &MockServer, relays: &[&str]) -> CatalogSettings {
    CatalogSettings {
        relays: relays
            .iter()
            .map(|name| format!("{}/{name}?url=", mock.uri()))
            .collect(),
        attempt_timeout_seconds: 2,
        biography_base_url: format!("{}/page/summary/", mock.uri()),
        biography_timeout_seconds: 2,
        ..CatalogSettings::default()
    }
}

/// Start a gallery server whose relays live on `mock`
pub async fn start_server(mock: &MockServer, relays: &[&str]) -> (SocketAddr, CancellationToken) {
    let config = ServerConfig::for_testing().with_catalog(catalog_settings(mock, relays));
    Server::new(config, ShutdownConfig::default())
        .expect("Failed to create server")
        .run_for_testing()
        .await
        .expect("Failed to start test server")
}

/// Make relay `relay` answer the catalog request `path_and_query`
pub async fn mount_catalog(
    mock: &MockServer,
    relay: &str,
    path_and_query: &str,
    response: ResponseTemplate,
    calls: impl Into<Times>,
) {
    Mock::given(method("GET"))
        .and(path(format!("/{relay}")))
        .and(query_param("url", catalog_url(path_and_query)))
        .respond_with(response)
        .expect(calls)
        .mount(mock)
        .await;
}

/// Make relay `relay` answer anything with `response`
pub async fn mount_relay(
    mock: &MockServer,
    relay: &str,
    response: ResponseTemplate,
    calls: impl Into<Times>,
) {
    Mock::given(method("GET"))
        .and(path(format!("/{relay}")))
        .respond_with(response)
        .expect(calls)
        .mount(mock)
        .await;
}

pub async fn mount_summary(mock: &MockServer, page: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/page/summary/{page}")))
        .respond_with(json_ok(body))
        .mount(mock)
        .await;
}

pub fn json_ok(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

pub fn artist(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "picture": format!("https://cdn.example/artist/{id}.jpg"),
        "picture_medium": format!("https://cdn.example/artist/{id}/250.jpg"),
        "nb_album": 31,
        "nb_fan": 4_512_339,
        "type": "artist"
    })
}

pub fn album(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "cover_medium": format!("https://cdn.example/album/{id}/250.jpg"),
        "release_date": "2001-03-12",
        "type": "album"
    })
}

pub fn track(id: u64, title: &str, artist_name: &str, duration: u32) -> Value {
    json!({
        "id": id,
        "title": title,
        "duration": duration,
        "preview": format!("https://cdn.example/preview/{id}.mp3"),
        "artist": { "id": id * 10, "name": artist_name },
        "album": { "id": id * 100, "title": format!("{title} (Single)") },
        "type": "track"
    })
}

pub fn page(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({ "data": items, "total": total })
}

pub fn no_data_error() -> Value {
    json!({ "error": { "type": "DataException", "message": "no data", "code": 800 } })
}

pub fn titles(tracks: &Value) -> Vec<&str> {
    tracks
        .as_array()
        .expect("track list")
        .iter()
        .map(|t| t["title"].as_str().expect("title"))
        .collect()
}
