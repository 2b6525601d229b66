// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics module
//!
//! Provides global metrics using the default Prometheus registry via macros and
//! an Axum-compatible metrics handler.

use std::{sync::LazyLock, time::Instant};

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use catalog_api::CatalogResult;
use prometheus::{
    Encoder, HistogramVec, IntCounterVec, TextEncoder, register_histogram_vec,
    register_int_counter_vec,
};

/// Total number of API requests received, labeled by route.
pub static REQUESTS_BY_ROUTE: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "music_gallery_requests_total",
        "Total number of API requests, labeled by route",
        &["route"]
    )
    .expect("Failed to create music_gallery_requests_total counter vec")
});

/// Histogram for catalog operation durations in seconds.
pub static CATALOG_OPERATION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "music_gallery_catalog_operation_duration",
        "Catalog operation durations in seconds, relay attempts included",
        &["operation", "result"],
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0]
    )
    .expect("Failed to create catalog operation duration histogram")
});

/// Increment the requests counter for `route`
pub fn inc_requests(route: &str) {
    REQUESTS_BY_ROUTE.with_label_values(&[route]).inc();
}

/// Observe the duration of a catalog operation
///
/// # Arguments
/// * `operation` - The catalog operation name
/// * `result` - `ok`, `not_found` or `error`
/// * `duration_secs` - The duration of the operation in seconds
pub fn observe_catalog_duration(operation: &str, result: &str, duration_secs: f64) {
    CATALOG_OPERATION_DURATION
        .with_label_values(&[operation, result])
        .observe(duration_secs);
}

/// Run a catalog operation, counting the route and timing the outcome
pub async fn track<T>(
    operation: &str,
    fut: impl Future<Output = CatalogResult<T>>,
) -> CatalogResult<T> {
    inc_requests(operation);
    let started = Instant::now();
    let result = fut.await;

    let outcome = match &result {
        Ok(_) => "ok",
        Err(error) if error.is_not_found() => "not_found",
        Err(_) => "error",
    };
    observe_catalog_duration(operation, outcome, started.elapsed().as_secs_f64());

    result
}

/// Axum handler that exports metrics in Prometheus text format
pub async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];

    if let Err(error) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to encode metrics: {error}"),
        )
            .into_response();
    }

    (
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        String::from_utf8_lossy(&buffer).into_owned(),
    )
        .into_response()
}
