//! # Domain Value Objects
//!
//! Inputs and outcomes of the ledger operations.

use serde::{Deserialize, Serialize};
use shared_types::{Address, QueryId, SubQuery, U256};

/// Everything a requester attaches to a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySubmission {
    /// Principal submitting the query (the light client's request origin).
    pub submitter: Address,
    /// Ordered subqueries.
    pub queries: Vec<SubQuery>,
    /// Light client that will verify the proof.
    pub light_client: Address,
    /// Receiver of the results.
    pub callback: Address,
    /// Opaque payload echoed back to the receiver.
    pub message: Vec<u8>,
    /// Fee attached.
    pub fee: U256,
}

/// Result of handing values to the requester's receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallbackOutcome {
    /// The receiver accepted the values.
    Delivered,
    /// The receiver returned an error or panicked.
    Failed {
        /// Failure description.
        reason: String,
    },
}

impl CallbackOutcome {
    /// True if the receiver accepted the values.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// What a successful proof delivery did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    /// Completed query.
    pub query_id: QueryId,
    /// Values in subquery order.
    pub values: Vec<Vec<u8>>,
    /// Receiver outcome. A failure does not undo the delivery.
    pub callback: CallbackOutcome,
}
