// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Custom extractors for consistent error bodies
//!
//! Axum's own query and path rejections answer with plain text. These wrappers
//! turn them into [`ServerError::Validation`] so every failure shares the JSON
//! error shape.

use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ServerError;

/// Query string extractor with JSON error responses
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryExtractor<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryExtractor<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection| ServerError::Validation(rejection.body_text()))
    }
}

/// Path parameter extractor with JSON error responses
#[derive(Debug, Clone, Copy, Default)]
pub struct PathExtractor<T>(pub T);

impl<T, S> FromRequestParts<S> for PathExtractor<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| Self(value))
            .map_err(|rejection| ServerError::Validation(rejection.body_text()))
    }
}
