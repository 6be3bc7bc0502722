//! # Outbound Ports
//!
//! The requester-side receiver the gateway hands verified values to.

use parking_lot::Mutex;
use shared_types::{Address, QueryId};
use thiserror::Error;

/// Failure reported by a receiver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ReceiverError(pub String);

/// Query receiver - outbound port.
pub trait QueryReceiver: Send + Sync {
    /// Accept the verified values of a completed query.
    fn receive_query(
        &self,
        query_id: QueryId,
        message: &[u8],
        light_client: Address,
        values: &[Vec<u8>],
    ) -> Result<(), ReceiverError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// A delivery seen by [`MockReceiver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedQuery {
    /// Query id.
    pub query_id: QueryId,
    /// Echoed message.
    pub message: Vec<u8>,
    /// Verifying light client.
    pub light_client: Address,
    /// Values in subquery order.
    pub values: Vec<Vec<u8>>,
}

/// Mock receiver that records deliveries.
#[derive(Default)]
pub struct MockReceiver {
    /// Recorded deliveries.
    pub received: Mutex<Vec<ReceivedQuery>>,
    /// Reject every delivery with this reason.
    pub fail_with: Option<String>,
    /// Panic on every delivery.
    pub panics: bool,
}

impl MockReceiver {
    /// Receiver that always rejects with `reason`.
    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Default::default()
        }
    }

    /// Receiver that always panics.
    pub fn panicking() -> Self {
        Self {
            panics: true,
            ..Default::default()
        }
    }

    /// Number of deliveries seen, including rejected ones.
    pub fn calls(&self) -> usize {
        self.received.lock().len()
    }
}

impl QueryReceiver for MockReceiver {
    fn receive_query(
        &self,
        query_id: QueryId,
        message: &[u8],
        light_client: Address,
        values: &[Vec<u8>],
    ) -> Result<(), ReceiverError> {
        self.received.lock().push(ReceivedQuery {
            query_id,
            message: message.to_vec(),
            light_client,
            values: values.to_vec(),
        });
        if self.panics {
            panic!("receiver exploded");
        }
        match &self.fail_with {
            Some(reason) => Err(ReceiverError(reason.clone())),
            None => Ok(()),
        }
    }
}
