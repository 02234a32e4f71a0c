//! Bounded memo of block-count → duration conversions.
//!
//! Only the raw breakdown is cached. The formatted string is rebuilt on every
//! call with the caller's formatter, since localisation can change between
//! calls while the arithmetic cannot.

use lru::LruCache;
use parking_lot::Mutex;
use serde::Serialize;
use std::num::NonZeroUsize;
use tracing::debug;

use govclock_core::constants::TIME_CACHE_CAPACITY;
use govclock_core::types::{BlockDuration, BlockNumber};

use crate::convert::BlockTimeConverter;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    blocks: BlockNumber,
    network: String,
}

/// A conversion result together with its rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedDuration {
    pub formatted: String,
    pub raw: BlockDuration,
}

/// Least-recently-used cache keyed by `(blocks, network)`.
///
/// Safe to share between threads; the map sits behind a mutex.
pub struct TimeConversionCache {
    entries: Mutex<LruCache<CacheKey, BlockDuration>>,
}

impl TimeConversionCache {
    /// Cache holding `TIME_CACHE_CAPACITY` entries.
    pub fn new() -> Self {
        Self::with_capacity(TIME_CACHE_CAPACITY)
    }

    /// Cache holding at most `capacity` entries (minimum one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Convert `blocks` with `converter`, reusing a cached breakdown when present,
    /// then render it with `format`.
    pub fn convert<F>(
        &self,
        converter: &BlockTimeConverter,
        blocks: BlockNumber,
        format: F,
    ) -> FormattedDuration
    where
        F: Fn(&BlockDuration) -> String,
    {
        let raw = self.raw(converter, blocks);
        FormattedDuration {
            formatted: format(&raw),
            raw,
        }
    }

    /// Cached breakdown only.
    pub fn raw(&self, converter: &BlockTimeConverter, blocks: BlockNumber) -> BlockDuration {
        let key = CacheKey {
            blocks,
            network: converter.network().to_string(),
        };
        let mut entries = self.entries.lock();
        if let Some(hit) = entries.get(&key) {
            debug!(blocks, network = %key.network, "time conversion cache hit");
            return *hit;
        }

        let raw = converter.blocks_to_duration(blocks);
        if let Some((evicted, _)) = entries.push(key, raw) {
            debug!(
                blocks = evicted.blocks,
                network = %evicted.network,
                "time conversion cache evicted entry"
            );
        }
        raw
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    pub fn contains(&self, network: &str, blocks: BlockNumber) -> bool {
        self.entries.lock().contains(&CacheKey {
            blocks,
            network: network.to_string(),
        })
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for TimeConversionCache {
    fn default() -> Self {
        Self::new()
    }
}
