// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! List envelope used by every list-returning catalog endpoint

use serde::{Deserialize, Serialize};

/// One page of catalog results: `{ "data": [...], "total"?, "next"? }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage<T> {
    /// Items in upstream order
    #[serde(rename = "data")]
    pub items: Vec<T>,
    /// Total number of items available upstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// URL of the next page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl<T> CatalogPage<T> {
    /// Unwrap the page into its items
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
