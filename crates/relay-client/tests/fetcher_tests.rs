// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for `RelayFetcher`
//!
//! Fake relays are mounted on a wiremock server; each test checks both the
//! outcome and how many times every relay was hit.

use std::time::Duration;

use relay_client::{HealthStatus, JsonSource, RelayAttemptFailure, RelayError, RelayFetcher};
use tokio_util::sync::CancellationToken;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

use fixtures::*;

/// First relay answering with JSON wins and later relays are not contacted
#[tokio::test]
async fn first_healthy_relay_short_circuits() {
    let server = MockServer::start().await;
    mount_relay(&server, "relay-a", ok_json(), 1).await;
    mount_relay(&server, "relay-b", ok_json(), 0).await;

    let fetcher = fetcher(&server, &["relay-a", "relay-b"]);
    let value = fetcher.fetch(&target()).await.unwrap();

    assert_eq!(value, search_payload());
    assert_eq!(fetcher.rotator().cursor(), 0);
}

/// Failing relay is skipped and the one that answered becomes sticky
#[tokio::test]
async fn failover_moves_cursor_to_successful_relay() {
    let server = MockServer::start().await;
    mount_relay(&server, "relay-a", ResponseTemplate::new(503), 1).await;
    mount_relay(&server, "relay-b", ok_json(), 2).await;
    mount_relay(&server, "relay-c", ok_json(), 0).await;

    let fetcher = fetcher(&server, &["relay-a", "relay-b", "relay-c"]);

    let first = fetcher.fetch(&target()).await.unwrap();
    assert_eq!(first, search_payload());
    assert_eq!(fetcher.rotator().cursor(), 1);

    // relay-b is now tried first, relay-a is not contacted again
    let second = fetcher.fetch(&target()).await.unwrap();
    assert_eq!(second, search_payload());
    assert_eq!(fetcher.rotator().cursor(), 1);
}

/// Non-JSON body with a success status counts as a failed attempt
#[tokio::test]
async fn html_body_moves_on_to_next_relay() {
    let server = MockServer::start().await;
    mount_relay(&server, "relay-a", html_page(), 1).await;
    mount_relay(&server, "relay-b", ok_json(), 1).await;

    let fetcher = fetcher(&server, &["relay-a", "relay-b"]);
    let value = fetcher.fetch(&target()).await.unwrap();

    assert_eq!(value, search_payload());
    assert_eq!(fetcher.rotator().cursor(), 1);
}

/// Every relay failing surfaces the last reason and leaves the cursor alone
#[tokio::test]
async fn exhaustion_reports_last_failure() {
    let server = MockServer::start().await;
    mount_relay(&server, "relay-a", ResponseTemplate::new(500), 1).await;
    mount_relay(&server, "relay-b", ResponseTemplate::new(429), 1).await;

    let fetcher = fetcher(&server, &["relay-a", "relay-b"]);
    let error = fetcher.fetch(&target()).await.unwrap_err();

    assert_eq!(
        error,
        RelayError::AllRelaysFailed {
            attempts: 2,
            last: RelayAttemptFailure::Status { status: 429 },
        }
    );
    assert!(error.is_retryable());
    assert_eq!(fetcher.rotator().cursor(), 0);
}

/// Slow relay is abandoned after the attempt timeout
#[tokio::test]
async fn slow_relay_times_out() {
    let server = MockServer::start().await;
    mount_relay(
        &server,
        "relay-a",
        ok_json().set_delay(Duration::from_secs(3)),
        1,
    )
    .await;
    mount_relay(&server, "relay-b", ok_json(), 1).await;

    let fetcher = fetcher(&server, &["relay-a", "relay-b"]);
    let value = fetcher.fetch(&target()).await.unwrap();

    assert_eq!(value, search_payload());
    assert_eq!(fetcher.rotator().cursor(), 1);
}

/// Timeout is the reported reason when it is the last failure
#[tokio::test]
async fn timeout_surfaces_as_last_failure() {
    let server = MockServer::start().await;
    mount_relay(
        &server,
        "relay-a",
        ok_json().set_delay(Duration::from_secs(3)),
        1,
    )
    .await;

    let fetcher = fetcher(&server, &["relay-a"]);
    let error = fetcher.fetch(&target()).await.unwrap_err();

    assert_eq!(
        error.last_attempt_failure(),
        Some(&RelayAttemptFailure::Timeout { seconds: 1 })
    );
}

/// Relays are asked for a fresh JSON document
#[tokio::test]
async fn requests_fresh_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/relay-a"))
        .and(header("accept", "application/json"))
        .and(header("cache-control", "no-cache"))
        .respond_with(ok_json())
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = fetcher(&server, &["relay-a"]);
    let value = fetcher.fetch(&target()).await.unwrap();

    assert_eq!(value, search_payload());
}

/// Extra rotation passes walk the whole order again
#[tokio::test]
async fn additional_passes_retry_whole_rotation() {
    let server = MockServer::start().await;
    mount_relay(&server, "relay-a", ResponseTemplate::new(502), 3).await;
    mount_relay(&server, "relay-b", ResponseTemplate::new(502), 3).await;

    let fetcher =
        RelayFetcher::new(config(&server, &["relay-a", "relay-b"]).with_max_rotation_passes(3))
            .unwrap();
    let error = fetcher.fetch(&target()).await.unwrap_err();

    assert_eq!(
        error,
        RelayError::AllRelaysFailed {
            attempts: 6,
            last: RelayAttemptFailure::Status { status: 502 },
        }
    );
}

/// Cancelled token stops the fetch before any relay is contacted
#[tokio::test]
async fn cancelled_fetch_contacts_no_relay() {
    let server = MockServer::start().await;
    mount_relay(&server, "relay-a", ok_json(), 0).await;

    let token = CancellationToken::new();
    let fetcher = fetcher(&server, &["relay-a"]).with_cancellation(token.clone());
    token.cancel();

    let error = fetcher.fetch(&target()).await.unwrap_err();
    assert_eq!(error, RelayError::Cancelled);
    assert!(!error.is_retryable());
    assert_eq!(fetcher.rotator().cursor(), 0);
}

/// Cancelling while a relay is still answering aborts the attempt
#[tokio::test]
async fn cancellation_interrupts_slow_attempt() {
    let server = MockServer::start().await;
    mount_relay(
        &server,
        "relay-a",
        ok_json().set_delay(Duration::from_millis(800)),
        0..=1,
    )
    .await;

    let token = CancellationToken::new();
    let fetcher = fetcher(&server, &["relay-a"]).with_cancellation(token.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let error = fetcher.fetch(&target()).await.unwrap_err();
    canceller.await.unwrap();

    assert_eq!(error, RelayError::Cancelled);
    assert_eq!(fetcher.rotator().cursor(), 0);
}

/// Non-http targets are rejected without touching the network
#[tokio::test]
async fn non_http_target_is_rejected() {
    let server = MockServer::start().await;
    let fetcher = fetcher(&server, &["relay-a"]);

    let target = url::Url::parse("ftp://api.deezer.com/artist/27").unwrap();
    let error = fetcher.fetch(&target).await.unwrap_err();

    assert!(matches!(error, RelayError::InvalidTarget { .. }));
}

/// Clones share the rotation cursor
#[tokio::test]
async fn clones_share_affinity() {
    let server = MockServer::start().await;
    mount_relay(&server, "relay-a", ResponseTemplate::new(500), 1).await;
    mount_relay(&server, "relay-b", ok_json(), 1).await;

    let fetcher = fetcher(&server, &["relay-a", "relay-b"]);
    let clone = fetcher.clone();

    clone.fetch(&target()).await.unwrap();
    assert_eq!(fetcher.rotator().cursor(), 1);
}

/// Trait object path behaves like the inherent method
#[tokio::test]
async fn json_source_delegates_to_fetch() {
    let server = MockServer::start().await;
    mount_relay(&server, "relay-a", ok_json(), 1).await;

    let fetcher = fetcher(&server, &["relay-a"]);
    assert_eq!(fetcher.name(), "relay");

    let value = fetcher.fetch_json(&target()).await.unwrap();
    assert_eq!(value, search_payload());
}

/// Probing reports every relay in configured order without moving the cursor
#[tokio::test]
async fn probe_reports_each_relay() {
    let server = MockServer::start().await;
    mount_relay(&server, "relay-a", ResponseTemplate::new(500), 1).await;
    mount_relay(&server, "relay-b", ResponseTemplate::new(429), 1).await;
    mount_relay(&server, "relay-c", ok_json(), 1).await;

    let fetcher = fetcher(&server, &["relay-a", "relay-b", "relay-c"]);
    let report = fetcher.probe_relays(&target()).await;

    assert_eq!(report.len(), 3);
    assert_eq!(report[0].name, "relay-a");
    assert!(report[0].status.is_down());
    assert!(matches!(report[1].status, HealthStatus::Degraded { .. }));
    assert_eq!(report[2].status, HealthStatus::Up);
    assert!(report[0].preferred);
    assert!(!report[2].preferred);
    assert_eq!(fetcher.rotator().cursor(), 0);
}

/// Probing after cancellation reports every relay down without contacting it
#[tokio::test]
async fn cancelled_probe_contacts_no_relay() {
    let server = MockServer::start().await;
    mount_relay(&server, "relay-a", ok_json(), 0).await;
    mount_relay(&server, "relay-b", ok_json(), 0).await;

    let token = CancellationToken::new();
    let fetcher = fetcher(&server, &["relay-a", "relay-b"]).with_cancellation(token.clone());
    token.cancel();

    let report = fetcher.probe_relays(&target()).await;

    assert_eq!(report.len(), 2);
    assert!(report.iter().all(|relay| relay.status.is_down()));
    assert_eq!(report[0].status.description(), "Relay request cancelled");
}
