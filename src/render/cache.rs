//! In-memory cache of render results keyed by the current selection.
//!
//! Entries are bounded by a configurable capacity and evicted least recently
//! used first. All access goes through a mutex so one cache can back several
//! UI sessions in the same process.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::RenderResult;

/// Default number of cached selections
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Cache key: the set of selected regions plus the extrema toggle.
///
/// Region order does not matter; two selections with the same regions and
/// flag are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SelectionKey {
    regions: BTreeSet<String>,
    show_extrema: bool,
}

impl SelectionKey {
    pub fn new<I, S>(regions: I, show_extrema: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            regions: regions.into_iter().map(Into::into).collect(),
            show_extrema,
        }
    }

    /// Selected regions in sorted order
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(String::as_str)
    }

    pub fn show_extrema(&self) -> bool {
        self.show_extrema
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    fn estimated_size(&self) -> usize {
        std::mem::size_of::<Self>()
            + self
                .regions
                .iter()
                .map(|r| r.len() + std::mem::size_of::<String>())
                .sum::<usize>()
    }
}

/// Hit/miss counters for diagnostics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

struct CacheSlot {
    value: Arc<RenderResult>,
    last_used: u64,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<SelectionKey, CacheSlot>,
    clock: u64,
    stats: CacheStats,
}

impl CacheState {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

/// Bounded LRU cache of render results.
///
/// A capacity of zero disables caching: every `get` misses and `put` is a no-op.
pub struct SelectionCache {
    capacity: usize,
    state: Mutex<CacheState>,
}

impl Default for SelectionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl SelectionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(CacheState::default()),
        }
    }

    // The state stays consistent even if a holder panicked, so recover from poisoning
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a previously stored result, marking it as recently used
    pub fn get(&self, key: &SelectionKey) -> Option<Arc<RenderResult>> {
        let mut state = self.lock();
        let now = state.tick();

        let found = state.entries.get_mut(key).map(|slot| {
            slot.last_used = now;
            Arc::clone(&slot.value)
        });

        if found.is_some() {
            state.stats.hits += 1;
        } else {
            state.stats.misses += 1;
        }
        found
    }

    /// Store a result, overwriting any entry with an equal key
    pub fn put(&self, key: SelectionKey, value: Arc<RenderResult>) {
        if self.capacity == 0 {
            return;
        }

        let mut state = self.lock();
        let now = state.tick();
        state.entries.insert(
            key,
            CacheSlot {
                value,
                last_used: now,
            },
        );

        while state.entries.len() > self.capacity {
            let oldest = state
                .entries
                .iter()
                .min_by_key(|(_, slot)| slot.last_used)
                .map(|(key, _)| key.clone());

            let Some(oldest) = oldest else {
                break;
            };
            state.entries.remove(&oldest);
            state.stats.evictions += 1;
            tracing::debug!("Evicted cached selection {:?}", oldest);
        }
    }

    /// Rough number of bytes held by cached entries. Diagnostic only.
    pub fn memory_footprint_estimate(&self) -> usize {
        let state = self.lock();
        state
            .entries
            .iter()
            .map(|(key, slot)| key.estimated_size() + slot.value.estimated_size())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&self) {
        self.lock().entries.clear();
    }
}
