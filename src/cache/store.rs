//! Expiring key-value store for backend responses
//!
//! Provides a `ResponseCache` that holds opaque JSON payloads keyed by
//! request path, each stamped with the moment it was stored. Entries are
//! reported as absent once their TTL elapses; they are never actively
//! evicted, just overwritten by the next store for the same key.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use serde_json::Value;

/// A cached payload and the moment it was stored
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached payload
    value: Value,
    /// When the payload was stored
    stored_at: Instant,
}

/// Process-wide expiring cache for GET responses
///
/// Cloning shares the underlying store, so every request handler in the
/// process observes the same cache. Concurrent stores for one key are
/// last-write-wins; readers always observe a whole value, never a torn one.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    /// Shared map of path -> cached payload
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    /// How long an entry stays fresh
    ttl: Duration,
}

impl ResponseCache {
    /// Creates an empty cache whose entries stay fresh for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Returns the freshness window entries are held for
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the payload stored under `key` if it is still fresh
    ///
    /// An expired entry is left in place and reported as absent; the next
    /// `set` for the key overwrites it.
    pub fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().ok()?;
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Stores `value` under `key`, overwriting any previous entry
    pub fn set(&self, key: &str, value: &Value) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                key.to_string(),
                CacheEntry {
                    value: value.clone(),
                    stored_at: Instant::now(),
                },
            );
        }
    }
}
