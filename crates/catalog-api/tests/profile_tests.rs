// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for `ArtistProfileLoader`

use catalog_api::{ArtistProfileLoader, BiographyResolver, CatalogError};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use fixtures::*;

fn loader(server: &MockServer) -> ArtistProfileLoader {
    ArtistProfileLoader::new(
        catalog_client(server, &["relay-a"]),
        BiographyResolver::new(biography_config(server)).unwrap(),
    )
}

async fn mount_biography(server: &MockServer, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/page/summary/Daft%20Punk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "extract": long_extract() })))
        .expect(calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn profile_combines_all_sources() {
    let server = MockServer::start().await;
    mount_catalog(&server, "relay-a", "/artist/27", json_ok(artist(27, "Daft Punk")), 1).await;
    mount_catalog(
        &server,
        "relay-a",
        "/artist/27/top?limit=10",
        json_ok(page(tracks(10))),
        1,
    )
    .await;
    mount_catalog(
        &server,
        "relay-a",
        "/artist/27/albums?limit=12",
        json_ok(page(vec![
            album(302_127, "Discovery"),
            album(302_127, "Discovery"),
            album(301_775, "Homework"),
        ])),
        1,
    )
    .await;
    mount_biography(&server, 1).await;

    let profile = loader(&server).load_artist_profile(27).await.unwrap();

    assert_eq!(profile.artist.name, "Daft Punk");
    assert_eq!(profile.top_tracks.len(), 10);
    assert_eq!(profile.albums.len(), 2);
    assert_eq!(profile.biography, long_extract());
}

#[tokio::test]
async fn failing_album_call_fails_whole_profile() {
    let server = MockServer::start().await;
    mount_catalog(&server, "relay-a", "/artist/27", json_ok(artist(27, "Daft Punk")), 0..=1).await;
    mount_catalog(
        &server,
        "relay-a",
        "/artist/27/top?limit=10",
        json_ok(page(tracks(3))),
        0..=1,
    )
    .await;
    mount_catalog(
        &server,
        "relay-a",
        "/artist/27/albums?limit=12",
        ResponseTemplate::new(502),
        1,
    )
    .await;
    mount_biography(&server, 0).await;

    let error = loader(&server).load_artist_profile(27).await.unwrap_err();
    assert!(matches!(error, CatalogError::Relay(_)));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn unknown_artist_fails_profile() {
    let server = MockServer::start().await;
    mount_catalog(&server, "relay-a", "/artist/1", json_ok(no_data_error()), 1).await;
    mount_catalog(&server, "relay-a", "/artist/1/top?limit=10", json_ok(no_data_error()), 0..=1).await;
    mount_catalog(&server, "relay-a", "/artist/1/albums?limit=12", json_ok(no_data_error()), 0..=1).await;

    let error = loader(&server).load_artist_profile(1).await.unwrap_err();
    assert!(error.is_not_found());
}
