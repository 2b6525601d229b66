// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Validated search terms
//!
//! [`SearchQuery`] makes a blank search unrepresentable: once a value exists
//! it holds at least one non-whitespace character, so the catalog client can
//! reject blank input before any relay is contacted.
//!
//! ```rust
//! use catalog_api::SearchQuery;
//!
//! let query = SearchQuery::new("daft punk").unwrap();
//! assert_eq!(query.as_str(), "daft punk");
//!
//! assert!(SearchQuery::new("").is_err());
//! assert!(SearchQuery::new(" \t\n ").is_err());
//! ```

use core::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// A search term with at least one non-whitespace character
///
/// The text is kept exactly as typed, surrounding whitespace included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(Box<str>);

impl SearchQuery {
    /// Validate a search term
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyQuery`] for empty or whitespace-only input
    pub fn new(s: impl Into<String>) -> Result<Self, CatalogError> {
        let s = s.into();
        if s.trim().is_empty() {
            Err(CatalogError::EmptyQuery)
        } else {
            Ok(Self(s.into_boxed_str()))
        }
    }

    /// The search term as typed
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SearchQuery {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SearchQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
