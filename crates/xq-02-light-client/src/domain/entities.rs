//! # Domain Entities
//!
//! Approved state roots and outstanding oracle requests.

use shared_types::{ChainId, Hash, HeightRequest, OracleResponse, H256, U256};
use std::collections::HashMap;

/// State roots approved by the oracle principal, keyed by (chain, height).
///
/// Writes overwrite unconditionally; a conflicting rewrite is reported to
/// the caller but not prevented.
#[derive(Clone, Debug, Default)]
pub struct ApprovedStateRoots {
    roots: HashMap<(ChainId, U256), Hash>,
}

impl ApprovedStateRoots {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a root. Returns the previous root if it differed.
    pub fn approve(&mut self, response: &OracleResponse) -> Option<Hash> {
        self.roots
            .insert((response.dst_chain_id, response.height), response.root)
            .filter(|previous| *previous != response.root)
    }

    /// Approved root for (chain, height).
    pub fn get(&self, chain_id: ChainId, height: U256) -> Option<Hash> {
        self.roots.get(&(chain_id, height)).copied()
    }

    /// Number of approved roots.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// True when nothing was approved yet.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Oracle requests sent and not yet fulfilled.
#[derive(Clone, Debug, Default)]
pub struct PendingRequests {
    requests: HashMap<H256, Vec<HeightRequest>>,
}

impl PendingRequests {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request.
    pub fn insert(&mut self, request_id: H256, requests: Vec<HeightRequest>) {
        self.requests.insert(request_id, requests);
    }

    /// Whether `request_id` is outstanding.
    pub fn contains(&self, request_id: &H256) -> bool {
        self.requests.contains_key(request_id)
    }

    /// Remove a fulfilled request.
    pub fn remove(&mut self, request_id: &H256) -> Option<Vec<HeightRequest>> {
        self.requests.remove(request_id)
    }

    /// Outstanding request count.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// True when nothing is outstanding.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
