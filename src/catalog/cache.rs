//! In-memory catalog cache.
//!
//! Holds the last successfully fetched list per entity collection. There is
//! no TTL and no eviction; entries live until [`CatalogCache::invalidate`]
//! or [`CatalogCache::clear`] is called. A single instance is shared (via
//! `Arc`) by every service adapter and screen in the process.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::domain::{Album, Artist, Collector};

/// Entity collections the cache knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Albums,
    Artists,
    Collectors,
}

/// Stored list for one key.
#[derive(Debug, Clone)]
pub enum CachedList {
    Albums(Vec<Album>),
    Artists(Vec<Artist>),
    Collectors(Vec<Collector>),
}

/// Domain types that can be cached as a list.
pub trait Cacheable: Clone + Sized {
    const KEY: CacheKey;

    fn wrap(items: Vec<Self>) -> CachedList;

    fn unwrap(list: &CachedList) -> Option<&[Self]>;
}

impl Cacheable for Album {
    const KEY: CacheKey = CacheKey::Albums;

    fn wrap(items: Vec<Self>) -> CachedList {
        CachedList::Albums(items)
    }

    fn unwrap(list: &CachedList) -> Option<&[Self]> {
        match list {
            CachedList::Albums(items) => Some(items),
            _ => None,
        }
    }
}

impl Cacheable for Artist {
    const KEY: CacheKey = CacheKey::Artists;

    fn wrap(items: Vec<Self>) -> CachedList {
        CachedList::Artists(items)
    }

    fn unwrap(list: &CachedList) -> Option<&[Self]> {
        match list {
            CachedList::Artists(items) => Some(items),
            _ => None,
        }
    }
}

impl Cacheable for Collector {
    const KEY: CacheKey = CacheKey::Collectors;

    fn wrap(items: Vec<Self>) -> CachedList {
        CachedList::Collectors(items)
    }

    fn unwrap(list: &CachedList) -> Option<&[Self]> {
        match list {
            CachedList::Collectors(items) => Some(items),
            _ => None,
        }
    }
}

/// Process-wide list cache, keyed by entity collection.
#[derive(Debug, Default)]
pub struct CatalogCache {
    entries: RwLock<HashMap<CacheKey, CachedList>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached list for `T`, if any.
    pub fn get<T: Cacheable>(&self) -> Option<Vec<T>> {
        let entries = self.entries.read();
        entries
            .get(&T::KEY)
            .and_then(T::unwrap)
            .map(<[T]>::to_vec)
    }

    /// Store a list for `T`, replacing any previous entry.
    pub fn put<T: Cacheable>(&self, items: Vec<T>) {
        self.entries.write().insert(T::KEY, T::wrap(items));
    }

    /// Check if a collection is cached.
    #[cfg(test)]
    pub fn contains(&self, key: CacheKey) -> bool {
        self.entries.read().contains_key(&key)
    }

    /// Drop one collection; the next fetch goes to the network.
    ///
    /// Returns whether an entry was present.
    pub fn invalidate(&self, key: CacheKey) -> bool {
        let removed = self.entries.write().remove(&key).is_some();
        if removed {
            tracing::debug!("Invalidated cache entry {:?}", key);
        }
        removed
    }
}
