//! Explicit memoizing cache for loaded datasets and models
//!
//! Entries live until they are invalidated by the owner. Failed loads are
//! not cached, so the next lookup retries.

use crate::error::Result;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

/// Cache of shared values keyed by `K`
#[derive(Debug)]
pub struct MemoCache<K, V> {
    entries: HashMap<K, Arc<V>>,
}

impl<K, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`, if any
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.entries.get(key).cloned()
    }

    /// Cached value for `key`, loading and storing it on a miss
    pub fn get_or_try_insert_with<F>(&mut self, key: &K, load: F) -> Result<Arc<V>>
    where
        F: FnOnce() -> Result<V>,
    {
        if let Some(value) = self.entries.get(key) {
            debug!(?key, "Cache hit");
            return Ok(Arc::clone(value));
        }

        debug!(?key, "Cache miss");
        let value = Arc::new(load()?);
        self.entries.insert(key.clone(), Arc::clone(&value));
        Ok(value)
    }

    /// Drop one entry, returning whether it was present
    pub fn invalidate(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;

    #[test]
    fn test_loads_once() {
        let mut cache: MemoCache<String, u32> = MemoCache::new();
        let mut loads = 0;

        for _ in 0..3 {
            let value = cache
                .get_or_try_insert_with(&"a".to_string(), || {
                    loads += 1;
                    Ok(7)
                })
                .unwrap();
            assert_eq!(*value, 7);
        }

        assert_eq!(loads, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut cache: MemoCache<&str, u32> = MemoCache::new();
        let failed = cache.get_or_try_insert_with(&"a", || {
            Err(ForecastError::DataError("boom".to_string()))
        });
        assert!(failed.is_err());
        assert!(cache.is_empty());

        let value = cache.get_or_try_insert_with(&"a", || Ok(1)).unwrap();
        assert_eq!(*value, 1);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let mut cache: MemoCache<&str, u32> = MemoCache::new();
        cache.get_or_try_insert_with(&"a", || Ok(1)).unwrap();

        assert!(cache.invalidate(&"a"));
        assert!(!cache.invalidate(&"a"));
        assert!(cache.get(&"a").is_none());

        let value = cache.get_or_try_insert_with(&"a", || Ok(2)).unwrap();
        assert_eq!(*value, 2);

        cache.clear();
        assert!(cache.is_empty());
    }
}
