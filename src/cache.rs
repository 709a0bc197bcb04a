//! Concurrent memoisation of computed zone sets

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam::queue::SegQueue;
use dashmap::DashMap;

use crate::zones::{ZoneRequest, ZoneSet};

/// Recency records kept per cached entry before compaction
const QUEUE_SLACK: usize = 4;

/// Exact bit pattern of a request, usable as a hash key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestKey {
    bits: [u64; 5],
    orientation: crate::types::Orientation,
}

impl From<&ZoneRequest> for RequestKey {
    fn from(req: &ZoneRequest) -> Self {
        Self {
            bits: [
                req.latitude.to_bits(),
                req.longitude.to_bits(),
                req.altitude.to_bits(),
                req.width.to_bits(),
                req.height.to_bits(),
            ],
            orientation: req.orientation,
        }
    }
}

/// Cached value tagged with the tick of its last use
struct Entry {
    zones: Arc<ZoneSet>,
    generation: u64,
}

/// Bounded cache of zone sets shared between request handlers
///
/// Recency is tracked by pushing `(key, generation)` onto a queue on every
/// use. Only the queue entry carrying a key's current generation is live;
/// older ones are skipped on eviction and dropped when the queue is compacted.
pub struct ZoneCache {
    cache: Arc<DashMap<RequestKey, Entry>>,
    lru: Arc<SegQueue<(RequestKey, u64)>>,
    clock: Arc<AtomicU64>,
    max_entries: usize,
}

impl ZoneCache {
    /// Creates a new cache holding at most `max_entries` zone sets
    pub fn new(max_entries: usize) -> Self {
        Self {
            cache: Arc::new(DashMap::new()),
            lru: Arc::new(SegQueue::new()),
            clock: Arc::new(AtomicU64::new(0)),
            max_entries: max_entries.max(1),
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Queue length above which stale recency records are purged
    fn queue_limit(&self) -> usize {
        self.max_entries.saturating_mul(QUEUE_SLACK)
    }

    fn is_current(&self, key: &RequestKey, generation: u64) -> bool {
        self.cache
            .get(key)
            .is_some_and(|entry| entry.generation == generation)
    }

    fn touch(&self, key: RequestKey, generation: u64) {
        self.lru.push((key, generation));
        if self.lru.len() > self.queue_limit() {
            self.compact();
        }
    }

    /// Drops queue records whose key was used again or evicted since
    fn compact(&self) {
        for _ in 0..self.lru.len() {
            let Some((key, generation)) = self.lru.pop() else { break };
            if self.is_current(&key, generation) {
                self.lru.push((key, generation));
            }
        }
        log::trace!("zone cache queue compacted to {}", self.lru.len());
    }

    /// Evicts least recently used entries until fewer than `max_entries` remain
    fn make_room(&self) {
        while self.cache.len() >= self.max_entries {
            let Some((key, generation)) = self.lru.pop() else { break };
            if self
                .cache
                .remove_if(&key, |_, entry| entry.generation == generation)
                .is_some()
            {
                log::trace!("zone cache evicted one entry");
            }
        }
    }

    /// Looks up the zone set previously stored for `request`
    pub fn get(&self, request: &ZoneRequest) -> Option<Arc<ZoneSet>> {
        let key = RequestKey::from(request);
        let generation = self.tick();

        let zones = {
            let mut entry = self.cache.get_mut(&key)?;
            entry.generation = generation;
            Arc::clone(&entry.zones)
        };

        self.touch(key, generation);
        Some(zones)
    }

    /// Stores a zone set, evicting the least recently used entries when full
    pub fn put(&self, request: &ZoneRequest, zones: ZoneSet) -> Arc<ZoneSet> {
        let key = RequestKey::from(request);
        let zones = Arc::new(zones);
        let generation = self.tick();

        if !self.cache.contains_key(&key) {
            self.make_room();
        }

        self.cache.insert(
            key,
            Entry {
                zones: Arc::clone(&zones),
                generation,
            },
        );
        self.touch(key, generation);
        zones
    }

    /// Returns the cached zone set or computes and stores it
    pub fn get_or_try_insert<E>(
        &self,
        request: &ZoneRequest,
        build: impl FnOnce() -> Result<ZoneSet, E>,
    ) -> Result<Arc<ZoneSet>, E> {
        if let Some(hit) = self.get(request) {
            log::trace!("zone cache hit");
            return Ok(hit);
        }
        Ok(self.put(request, build()?))
    }

    /// Removes every entry and recency record
    pub fn clear(&self) {
        self.cache.clear();
        while self.lru.pop().is_some() {}
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Entry and point counts
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.cache.len(),
            total_points: self
                .cache
                .iter()
                .map(|entry| entry.zones.point_count())
                .sum(),
            max_entries: self.max_entries,
        }
    }
}

impl Clone for ZoneCache {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            lru: Arc::clone(&self.lru),
            clock: Arc::clone(&self.clock),
            max_entries: self.max_entries,
        }
    }
}

impl Default for ZoneCache {
    fn default() -> Self {
        Self::new(256)
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of zone sets currently cached
    pub entry_count: usize,
    /// Points held across all cached curves
    pub total_points: usize,
    /// Maximum number of zone sets
    pub max_entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Orientation;
    use crate::zones::ZoneBuilder;

    fn request(width: f64) -> ZoneRequest {
        ZoneRequest {
            latitude: 33.687607,
            longitude: -117.782648,
            altitude: 0.0,
            width,
            height: 1.0,
            orientation: Orientation::North,
        }
    }

    fn zones(req: &ZoneRequest) -> ZoneSet {
        ZoneBuilder::default().build_all(req).unwrap()
    }

    #[test]
    fn test_cache_basic() {
        let cache = ZoneCache::new(2);
        let req = request(2.0);

        let stored = cache.put(&req, zones(&req));

        assert_eq!(cache.len(), 1);
        assert_eq!(*cache.get(&req).unwrap(), *stored);
        assert!(cache.get(&request(3.0)).is_none());
    }

    #[test]
    fn test_cache_lru_eviction() {
        let cache = ZoneCache::new(2);

        for w in [1.0, 2.0, 3.0] {
            let req = request(w);
            cache.put(&req, zones(&req));
        }

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&request(1.0)).is_none());
    }

    #[test]
    fn test_recently_read_entry_survives_eviction() {
        let cache = ZoneCache::new(2);
        let (hot, cold) = (request(1.0), request(2.0));

        cache.put(&hot, zones(&hot));
        cache.put(&cold, zones(&cold));
        assert!(cache.get(&hot).is_some());

        let newest = request(3.0);
        cache.put(&newest, zones(&newest));

        assert!(cache.get(&hot).is_some());
        assert!(cache.get(&cold).is_none());
        assert!(cache.get(&newest).is_some());
    }

    #[test]
    fn test_repeated_hits_keep_queue_bounded() {
        let cache = ZoneCache::new(4);
        let req = request(2.0);
        cache.put(&req, zones(&req));

        for _ in 0..100_000 {
            assert!(cache.get(&req).is_some());
        }

        assert_eq!(cache.len(), 1);
        assert!(cache.lru.len() <= cache.queue_limit());
    }

    #[test]
    fn test_reinsert_does_not_evict() {
        let cache = ZoneCache::new(2);
        let (a, b) = (request(1.0), request(2.0));
        cache.put(&a, zones(&a));
        cache.put(&b, zones(&b));
        cache.put(&b, zones(&b));

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&a).is_some());
    }

    #[test]
    fn test_get_or_try_insert_builds_once() {
        let cache = ZoneCache::new(4);
        let req = request(2.0);
        let mut calls = 0;

        for _ in 0..3 {
            let got: Result<_, ()> = cache.get_or_try_insert(&req, || {
                calls += 1;
                Ok(zones(&req))
            });
            assert!(got.is_ok());
        }

        assert_eq!(calls, 1);
    }

    #[test]
    fn test_get_or_try_insert_does_not_store_errors() {
        let cache = ZoneCache::new(4);
        let got: Result<_, &str> = cache.get_or_try_insert(&request(2.0), || Err("boom"));
        assert_eq!(got.unwrap_err(), "boom");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_concurrent_access() {
        use std::thread;

        let cache = ZoneCache::new(16);
        let set = zones(&request(2.0));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache_clone = cache.clone();
                let set = set.clone();
                thread::spawn(move || {
                    for j in 0..20 {
                        let req = request(1.0 + (i * 20 + j) as f64);
                        cache_clone.put(&req, set.clone());
                        let _ = cache_clone.get(&req);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= 16 + 8);
        assert!(cache.lru.len() <= cache.queue_limit() + 8);
    }

    #[test]
    fn test_cache_clear_and_stats() {
        let cache = ZoneCache::new(10);
        let req = request(2.0);
        cache.put(&req, zones(&req));

        let stats = cache.stats();
        assert_eq!(stats.entry_count, 1);
        assert_eq!(stats.total_points, 45);
        assert_eq!(stats.max_entries, 10);

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.lru.is_empty());
    }
}
