//! In-Memory Oracle Network Adapter
//!
//! Implements the `OracleBackend` port by queueing requests in memory.
//! An off-chain operator (or a test) drains the queue, resolves the state
//! roots and answers through the light client's `fulfill`.

use crate::domain::LightClientError;
use crate::ports::outbound::OracleBackend;
use parking_lot::RwLock;
use shared_types::{decode_height_requests, keccak256, Address, HeightRequest, H256};
use std::collections::VecDeque;
use tracing::{info, warn};

/// A request waiting for the oracle operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OracleJob {
    /// Oracle-side request id.
    pub request_id: H256,
    /// Light client that asked.
    pub light_client: Address,
    /// Distinct (chain, height) pairs to resolve.
    pub requests: Vec<HeightRequest>,
}

/// In-memory oracle network.
pub struct InMemoryOracleNetwork {
    name: String,
    queue: RwLock<VecDeque<OracleJob>>,
    sent: RwLock<u64>,
    online: RwLock<bool>,
}

impl InMemoryOracleNetwork {
    /// Create an online network.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            queue: RwLock::new(VecDeque::new()),
            sent: RwLock::new(0),
            online: RwLock::new(true),
        }
    }

    /// Take every queued job, oldest first.
    pub fn drain_jobs(&self) -> Vec<OracleJob> {
        self.queue.write().drain(..).collect()
    }

    /// Number of queued jobs.
    pub fn queued(&self) -> usize {
        self.queue.read().len()
    }

    /// Total requests accepted.
    pub fn requests_sent(&self) -> u64 {
        *self.sent.read()
    }

    /// Simulate an outage.
    pub fn set_online(&self, online: bool) {
        *self.online.write() = online;
    }
}

impl OracleBackend for InMemoryOracleNetwork {
    fn send_request(
        &self,
        light_client: Address,
        encoded_requests: &[u8],
    ) -> Result<H256, LightClientError> {
        if !*self.online.read() {
            warn!("[xq-02] Oracle network {} is offline", self.name);
            return Err(LightClientError::Oracle(format!("{} offline", self.name)));
        }
        let requests = decode_height_requests(encoded_requests)
            .map_err(|e| LightClientError::Oracle(format!("undecodable request: {e}")))?;

        let mut sent = self.sent.write();
        *sent += 1;
        let mut preimage = light_client.as_bytes().to_vec();
        preimage.extend_from_slice(&sent.to_be_bytes());
        preimage.extend_from_slice(encoded_requests);
        let request_id = keccak256(&preimage);

        info!(
            "[xq-02] Oracle {} accepted request {:?} ({} heights)",
            self.name,
            request_id,
            requests.len()
        );
        self.queue.write().push_back(OracleJob {
            request_id,
            light_client,
            requests,
        });
        Ok(request_id)
    }
}
