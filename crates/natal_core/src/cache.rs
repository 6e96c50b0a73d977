//! Caller-owned memoization of provider answers.
//!
//! The cache is an explicit object: nothing is global. Share it between
//! threads behind an `Arc`. Entries are keyed by `(body, jd_tt.to_bits())`
//! because repeated chart requests for the same instant produce
//! bit-identical Julian Dates.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::error::EngineError;
use crate::provider::{EclipticPosition, EphemerisProvider};

/// Cache sizing and expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries; the oldest insertion is evicted first.
    pub capacity: usize,
    /// Entries older than this are treated as absent. `None` keeps them
    /// until evicted by capacity.
    pub ttl_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            ttl_secs: Some(300),
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.capacity == 0 {
            return Err(EngineError::InvalidConfig(
                "cache capacity must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Counters since construction or the last [`EphemerisCache::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
}

type Key = (i32, u64);

struct Entry {
    value: EclipticPosition,
    inserted_at: Instant,
}

struct Inner {
    entries: HashMap<Key, Entry>,
    order: VecDeque<Key>,
    stats: CacheStats,
}

pub struct EphemerisCache {
    capacity: usize,
    ttl: Option<Duration>,
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for EphemerisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EphemerisCache")
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .field("len", &self.len())
            .finish()
    }
}

impl EphemerisCache {
    pub fn new(config: CacheConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            capacity: config.capacity,
            ttl: config.ttl_secs.map(Duration::from_secs),
            inner: Mutex::new(Inner {
                entries: HashMap::with_capacity(config.capacity.min(4096)),
                order: VecDeque::new(),
                stats: CacheStats::default(),
            }),
        })
    }

    /// A cache holding entries for exactly `ttl`.
    pub fn with_ttl(capacity: usize, ttl: Duration) -> Result<Self, EngineError> {
        let mut cache = Self::new(CacheConfig {
            capacity,
            ttl_secs: None,
        })?;
        cache.ttl = Some(ttl);
        Ok(cache)
    }

    // A panic while holding the lock cannot leave the map half-written,
    // so a poisoned guard is still usable.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        self.ttl
            .is_some_and(|ttl| now.saturating_duration_since(entry.inserted_at) >= ttl)
    }

    pub fn get(&self, body: Body, jd_tt: f64) -> Option<EclipticPosition> {
        let key = (body.code(), jd_tt.to_bits());
        let now = Instant::now();
        let mut inner = self.lock();

        let state = inner
            .entries
            .get(&key)
            .map(|entry| (entry.value, self.is_expired(entry, now)));
        match state {
            Some((value, false)) => {
                inner.stats.hits += 1;
                Some(value)
            }
            Some((_, true)) => {
                inner.entries.remove(&key);
                inner.order.retain(|k| *k != key);
                inner.stats.expirations += 1;
                inner.stats.misses += 1;
                None
            }
            None => {
                inner.stats.misses += 1;
                None
            }
        }
    }

    pub fn insert(&self, body: Body, jd_tt: f64, value: EclipticPosition) {
        let key = (body.code(), jd_tt.to_bits());
        let mut inner = self.lock();

        if inner.entries.contains_key(&key) {
            inner.order.retain(|k| *k != key);
        } else {
            while inner.entries.len() >= self.capacity {
                let Some(oldest) = inner.order.pop_front() else {
                    break;
                };
                inner.entries.remove(&oldest);
                inner.stats.evictions += 1;
            }
        }
        inner.order.push_back(key);
        inner.entries.insert(
            key,
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut inner = self.lock();
        let expired: Vec<Key> = inner
            .entries
            .iter()
            .filter(|(_, e)| self.is_expired(e, now))
            .map(|(k, _)| *k)
            .collect();
        for key in &expired {
            inner.entries.remove(key);
        }
        inner.order.retain(|k| !expired.contains(k));
        inner.stats.expirations += expired.len() as u64;
        if !expired.is_empty() {
            debug!("ephemeris cache purged {} expired entries", expired.len());
        }
        expired.len()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }

    /// Remove all entries and reset the counters, returning the number removed.
    pub fn clear(&self) -> usize {
        let mut inner = self.lock();
        let n = inner.entries.len();
        inner.entries.clear();
        inner.order.clear();
        inner.stats = CacheStats::default();
        n
    }
}

/// A provider whose answers pass through an [`EphemerisCache`].
#[derive(Debug, Clone)]
pub struct CachedEphemeris<P> {
    inner: P,
    cache: Arc<EphemerisCache>,
}

impl<P: EphemerisProvider> CachedEphemeris<P> {
    pub fn new(inner: P, cache: Arc<EphemerisCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<EphemerisCache> {
        &self.cache
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: EphemerisProvider> EphemerisProvider for CachedEphemeris<P> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn ecliptic_position(&self, body: Body, jd_tt: f64) -> Result<EclipticPosition, EngineError> {
        if let Some(hit) = self.cache.get(body, jd_tt) {
            return Ok(hit);
        }
        let value = self.inner.ecliptic_position(body, jd_tt)?;
        self.cache.insert(body, jd_tt, value);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Counting {
        calls: AtomicU32,
    }

    impl EphemerisProvider for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn ecliptic_position(&self, _: Body, jd: f64) -> Result<EclipticPosition, EngineError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(EclipticPosition {
                lon_deg: jd.rem_euclid(360.0),
                lat_deg: 0.0,
                distance_au: 1.0,
            })
        }
    }

    fn pos(lon: f64) -> EclipticPosition {
        EclipticPosition {
            lon_deg: lon,
            lat_deg: 0.0,
            distance_au: 1.0,
        }
    }

    #[test]
    fn zero_capacity_rejected() {
        let config = CacheConfig {
            capacity: 0,
            ttl_secs: None,
        };
        assert!(matches!(
            EphemerisCache::new(config),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn hit_after_insert() {
        let cache = EphemerisCache::new(CacheConfig::default()).unwrap();
        assert!(cache.get(Body::Sun, 1.0).is_none());
        cache.insert(Body::Sun, 1.0, pos(10.0));
        assert_eq!(cache.get(Body::Sun, 1.0), Some(pos(10.0)));
        assert!(cache.get(Body::Moon, 1.0).is_none());
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (1, 2));
    }

    #[test]
    fn oldest_evicted_at_capacity() {
        let cache = EphemerisCache::new(CacheConfig {
            capacity: 2,
            ttl_secs: None,
        })
        .unwrap();
        cache.insert(Body::Sun, 1.0, pos(1.0));
        cache.insert(Body::Sun, 2.0, pos(2.0));
        cache.insert(Body::Sun, 3.0, pos(3.0));
        assert_eq!(cache.len(), 2);
        assert!(cache.get(Body::Sun, 1.0).is_none());
        assert!(cache.get(Body::Sun, 3.0).is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn reinsert_refreshes_position_in_queue() {
        let cache = EphemerisCache::new(CacheConfig {
            capacity: 2,
            ttl_secs: None,
        })
        .unwrap();
        cache.insert(Body::Sun, 1.0, pos(1.0));
        cache.insert(Body::Sun, 2.0, pos(2.0));
        cache.insert(Body::Sun, 1.0, pos(1.5));
        cache.insert(Body::Sun, 3.0, pos(3.0));
        assert_eq!(cache.get(Body::Sun, 1.0), Some(pos(1.5)));
        assert!(cache.get(Body::Sun, 2.0).is_none());
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let cache = EphemerisCache::with_ttl(8, Duration::ZERO).unwrap();
        cache.insert(Body::Mars, 1.0, pos(1.0));
        assert!(cache.get(Body::Mars, 1.0).is_none());
        assert_eq!(cache.stats().expirations, 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn purge_removes_expired() {
        let cache = EphemerisCache::with_ttl(8, Duration::ZERO).unwrap();
        cache.insert(Body::Mars, 1.0, pos(1.0));
        cache.insert(Body::Venus, 1.0, pos(2.0));
        assert_eq!(cache.purge_expired(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn cached_provider_calls_inner_once() {
        let cache = Arc::new(EphemerisCache::new(CacheConfig::default()).unwrap());
        let provider = CachedEphemeris::new(
            Counting {
                calls: AtomicU32::new(0),
            },
            Arc::clone(&cache),
        );
        for _ in 0..5 {
            provider.ecliptic_position(Body::Jupiter, 42.0).unwrap();
        }
        assert_eq!(provider.inner().calls.load(Ordering::Relaxed), 1);
        assert_eq!(cache.stats().hits, 4);
    }

    #[test]
    fn clear_resets() {
        let cache = EphemerisCache::new(CacheConfig::default()).unwrap();
        cache.insert(Body::Sun, 1.0, pos(1.0));
        assert_eq!(cache.clear(), 1);
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
