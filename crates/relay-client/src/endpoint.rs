// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Relay endpoint descriptors
//!
//! A relay is a public intermediary that forwards a wrapped target URL. Every
//! relay uses the same templating contract: the target URL is percent-encoded
//! as a whole and appended to the relay's prefix.

use std::{fmt, ops::Index, sync::Arc};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{RelayError, RelayResult};

/// Built-in relays, in default order of preference
const DEFAULT_RELAYS: &[(&str, &str)] = &[
    ("allorigins", "https://api.allorigins.win/raw?url="),
    ("corsproxy", "https://corsproxy.io/?"),
    ("codetabs", "https://api.codetabs.com/v1/proxy?quest="),
];

/// A single relay endpoint
///
/// Deserialization goes through [`RelayEndpoint::new`], so a loaded endpoint
/// is validated the same way as one built in code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRelayEndpoint")]
pub struct RelayEndpoint {
    name: String,
    prefix: String,
}

/// Unvalidated wire form of [`RelayEndpoint`]
#[derive(Deserialize)]
struct RawRelayEndpoint {
    name: String,
    prefix: String,
}

impl TryFrom<RawRelayEndpoint> for RelayEndpoint {
    type Error = RelayError;

    fn try_from(raw: RawRelayEndpoint) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.prefix)
    }
}

impl RelayEndpoint {
    /// Create a relay endpoint with an explicit name
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the name is blank or the prefix is not
    /// an absolute `http`/`https` URL prefix
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> RelayResult<Self> {
        let name = name.into();
        let prefix = prefix.into();

        if name.trim().is_empty() {
            return Err(RelayError::configuration("relay name cannot be empty"));
        }
        Self::check_prefix(&prefix)?;

        Ok(Self { name, prefix })
    }

    /// Create a relay endpoint named after the host of its prefix
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the prefix is not an absolute
    /// `http`/`https` URL prefix
    pub fn from_prefix(prefix: impl Into<String>) -> RelayResult<Self> {
        let prefix = prefix.into();
        let url = Self::check_prefix(&prefix)?;
        let name = url
            .host_str()
            .map(ToString::to_string)
            .ok_or_else(|| RelayError::configuration(format!("relay prefix has no host: {prefix}")))?;

        Ok(Self { name, prefix })
    }

    /// The built-in relay list
    pub fn defaults() -> Vec<Self> {
        DEFAULT_RELAYS
            .iter()
            .map(|(name, prefix)| Self {
                name: (*name).to_string(),
                prefix: (*prefix).to_string(),
            })
            .collect()
    }

    /// Relay name, used in logs and health reports
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw URL prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Wrap a target URL for this relay: `prefix + percent_encode(target)`
    pub fn wrap(&self, target: &str) -> String {
        format!("{}{}", self.prefix, urlencoding::encode(target))
    }

    fn check_prefix(prefix: &str) -> RelayResult<Url> {
        let url = Url::parse(prefix)
            .map_err(|e| RelayError::configuration(format!("invalid relay prefix {prefix}: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(RelayError::configuration(format!(
                "relay prefix must use http or https: {prefix}"
            )));
        }

        Ok(url)
    }
}

impl fmt::Display for RelayEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Ordered, immutable, non-empty sequence of relays
///
/// Cloning is cheap; clones share the same endpoint storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySet(Arc<[RelayEndpoint]>);

impl RelaySet {
    /// Create a relay set, keeping the given order
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no relay is given
    pub fn new(relays: Vec<RelayEndpoint>) -> RelayResult<Self> {
        if relays.is_empty() {
            return Err(RelayError::configuration(
                "at least one relay endpoint is required",
            ));
        }
        Ok(Self(relays.into()))
    }

    /// Number of relays
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Relays in their original order
    pub fn iter(&self) -> impl Iterator<Item = &RelayEndpoint> {
        self.0.iter()
    }

    /// Relay at an original index, if any
    pub fn get(&self, index: usize) -> Option<&RelayEndpoint> {
        self.0.get(index)
    }
}

impl Default for RelaySet {
    fn default() -> Self {
        Self(RelayEndpoint::defaults().into())
    }
}

impl Index<usize> for RelaySet {
    type Output = RelayEndpoint;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}
