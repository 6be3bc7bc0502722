//! # Result Cache
//!
//! Last verified value per storage slot, keyed by
//! `keccak256(be256(chain) ++ address ++ slot)`.
//!
//! Writes overwrite unconditionally. A proof for an older height may
//! replace a newer value; readers asking for an explicit height only see
//! exact matches.

use serde::{Deserialize, Serialize};
use shared_types::{Hash, U256};
use std::collections::HashMap;

/// A cached value and the height it was proven at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedValue {
    /// Height the value was proven at.
    pub height: U256,
    /// The value.
    pub value: Vec<u8>,
}

/// Storage-slot result cache.
#[derive(Debug, Clone, Default)]
pub struct ResultCache {
    entries: HashMap<Hash, CachedValue>,
}

impl ResultCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached entry for `key`.
    pub fn get(&self, key: &Hash) -> Option<&CachedValue> {
        self.entries.get(key)
    }

    /// Store `value` proven at `height`, replacing whatever was there.
    pub fn put(&mut self, key: Hash, height: U256, value: Vec<u8>) {
        self.entries.insert(key, CachedValue { height, value });
    }

    /// Value for `key` at `height`; `height == 0` means whatever is cached.
    pub fn lookup(&self, key: &Hash, height: U256) -> Option<&[u8]> {
        self.get(key)
            .filter(|entry| height.is_zero() || entry.height == height)
            .map(|entry| entry.value.as_slice())
    }

    /// Number of cached slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
