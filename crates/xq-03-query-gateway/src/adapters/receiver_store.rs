//! In-Memory Receiver Adapter
//!
//! A query receiver that keeps the values of every completed query, keyed
//! by query id. The node runtime registers one as its default callback.

use crate::ports::{QueryReceiver, ReceiverError};
use parking_lot::RwLock;
use shared_types::{Address, QueryId};
use std::collections::HashMap;
use tracing::info;

/// Receiver storing results in memory.
#[derive(Default)]
pub struct InMemoryReceiver {
    results: RwLock<HashMap<QueryId, Vec<Vec<u8>>>>,
}

impl InMemoryReceiver {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Values delivered for `query_id`.
    pub fn result(&self, query_id: &QueryId) -> Option<Vec<Vec<u8>>> {
        self.results.read().get(query_id).cloned()
    }

    /// Number of completed queries received.
    pub fn len(&self) -> usize {
        self.results.read().len()
    }

    /// True when nothing was received.
    pub fn is_empty(&self) -> bool {
        self.results.read().is_empty()
    }
}

impl QueryReceiver for InMemoryReceiver {
    fn receive_query(
        &self,
        query_id: QueryId,
        _message: &[u8],
        light_client: Address,
        values: &[Vec<u8>],
    ) -> Result<(), ReceiverError> {
        info!(
            query_id = ?query_id,
            light_client = ?light_client,
            values = values.len(),
            "[xq-03] Results received"
        );
        self.results.write().insert(query_id, values.to_vec());
        Ok(())
    }
}
