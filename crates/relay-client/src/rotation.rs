// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Sticky relay rotation
//!
//! The rotator remembers which relay answered last and tries it first next
//! time, keeping the relative order of the others. There is no scoring, no
//! eviction and no backoff: membership never changes, only attempt order.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use crate::endpoint::{RelayEndpoint, RelaySet};

/// Cursor pointing at the relay that most recently succeeded
///
/// Starts at 0 and lives as long as the fetcher that owns it. Concurrent
/// writers race; the last successful relay observed wins.
#[derive(Debug, Default)]
pub struct RotationState {
    cursor: AtomicUsize,
}

impl RotationState {
    /// Create a cursor starting at the first relay
    pub fn new() -> Self {
        Self::default()
    }

    fn load(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }

    fn store(&self, index: usize) {
        self.cursor.store(index, Ordering::Relaxed);
    }
}

/// Decides the attempt order of relays for one request
#[derive(Debug, Clone)]
pub struct ProxyRotator {
    relays: RelaySet,
    state: Arc<RotationState>,
}

impl ProxyRotator {
    /// Create a rotator over `relays` with a fresh cursor
    pub fn new(relays: RelaySet) -> Self {
        Self {
            relays,
            state: Arc::new(RotationState::new()),
        }
    }

    /// The relays in their original order
    pub fn relays(&self) -> &RelaySet {
        &self.relays
    }

    /// Original index of the relay that will be tried first
    pub fn cursor(&self) -> usize {
        self.state.load() % self.relays.len()
    }

    /// Full relay sequence rotated to start at the cursor
    ///
    /// Each entry carries the relay's index in the original sequence, which is
    /// what [`ProxyRotator::record_success`] expects back.
    pub fn order_for_attempt(&self) -> Vec<(usize, &RelayEndpoint)> {
        let len = self.relays.len();
        let start = self.cursor();

        (0..len)
            .map(|offset| {
                let index = (start + offset) % len;
                (index, &self.relays[index])
            })
            .collect()
    }

    /// Make the relay at `index` (original order) the first to be tried
    ///
    /// Only the fetcher records successes.
    pub(crate) fn record_success(&self, index: usize) {
        self.state.store(index % self.relays.len());
    }
}
