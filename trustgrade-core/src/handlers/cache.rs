//! Per-handler memoization of network lookups.
//!
//! Each handler owns one [`ResourceCache`]; it lives exactly as long as the
//! handler (one evaluation batch). Entries are written once and never
//! invalidated.

use crate::hub::{DatasetInfo, ModelInfo, RepoInfo};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// What a cached entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    ModelInfo,
    Readme,
    SizeMb,
    LicenseScore,
    DatasetInfo,
    RepoInfo,
}

/// A cached lookup result.
#[derive(Debug, Clone)]
pub enum CachedValue {
    ModelInfo(Arc<ModelInfo>),
    Readme(Arc<str>),
    SizeMb(f64),
    LicenseScore(f64),
    DatasetInfo(Arc<DatasetInfo>),
    RepoInfo(Arc<RepoInfo>),
}

/// Typed key/value memo table.
#[derive(Debug, Default)]
pub struct ResourceCache {
    entries: Mutex<HashMap<CacheKey, CachedValue>>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: CacheKey) -> Option<CachedValue> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
            .cloned()
    }

    /// Store `value` unless the key is already populated, returning the
    /// value that ends up cached.
    pub fn insert(&self, key: CacheKey, value: CachedValue) -> CachedValue {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(key)
            .or_insert(value)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
