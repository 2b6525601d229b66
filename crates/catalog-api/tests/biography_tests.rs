// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for `BiographyResolver`

use std::time::Duration;

use catalog_api::{BiographyResolver, biography::fallback_biography};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use fixtures::*;

fn resolver(server: &MockServer) -> BiographyResolver {
    BiographyResolver::new(biography_config(server)).unwrap()
}

#[tokio::test]
async fn long_summary_is_returned_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page/summary/Daft%20Punk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Daft Punk",
            "description": "French electronic music duo",
            "extract": long_extract()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let biography = resolver(&server).get_biography("Daft Punk").await;
    assert_eq!(biography, long_extract());
}

#[tokio::test]
async fn short_summary_gets_description_prepended() {
    let server = MockServer::start().await;
    let extract = "Justice is a French electronic music duo consisting of Gaspard Augé and \
                   Xavier de Rosnay, known for a rock-influenced take on French house.";
    Mock::given(method("GET"))
        .and(path("/page/summary/Justice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "description": "French electronic music duo",
            "extract": extract
        })))
        .mount(&server)
        .await;

    let biography = resolver(&server).get_biography("Justice").await;
    assert_eq!(biography, format!("French electronic music duo. {extract}"));
}

#[tokio::test]
async fn base_url_without_trailing_slash() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page/summary/Daft%20Punk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "extract": long_extract()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = biography_config(&server).with_base_url(format!("{}/page/summary", server.uri()));
    let biography = BiographyResolver::new(config)
        .unwrap()
        .get_biography("Daft Punk")
        .await;
    assert_eq!(biography, long_extract());
}

#[tokio::test]
async fn missing_page_falls_back_with_artist_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let biography = resolver(&server).get_biography("Unknown Artist").await;
    assert!(biography.contains("Unknown Artist"));
    assert_eq!(biography, fallback_biography("Unknown Artist"));
}

#[tokio::test]
async fn invalid_json_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let biography = resolver(&server).get_biography("Moby").await;
    assert_eq!(biography, fallback_biography("Moby"));
}

#[tokio::test]
async fn slow_encyclopedia_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "extract": long_extract() }))
                .set_delay(Duration::from_secs(4)),
        )
        .mount(&server)
        .await;

    let biography = resolver(&server).get_biography("Daft Punk").await;
    assert_eq!(biography, fallback_biography("Daft Punk"));
}

#[tokio::test]
async fn unreachable_host_falls_back() {
    let config = catalog_api::BiographyConfig::default()
        .with_base_url("http://127.0.0.1:9/page/summary/")
        .with_timeout(1);
    let resolver = BiographyResolver::new(config).unwrap();

    let biography = resolver.get_biography("Air").await;
    assert!(biography.starts_with("Air is a renowned musical artist"));
}

#[tokio::test]
async fn names_are_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page/summary/Sigur%20R%C3%B3s"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "extract": long_extract() })))
        .expect(1)
        .mount(&server)
        .await;

    resolver(&server).get_biography("Sigur Rós").await;
}
