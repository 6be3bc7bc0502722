//! # Domain Entities
//!
//! Submitted queries and the ledger state that owns them.

use serde::{Deserialize, Serialize};
use shared_types::{Address, QueryId, QueryRequest, QueryStatus, U256};
use std::collections::HashMap;

/// A submitted query.
///
/// Only the encoded request is kept; it is decoded again on delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Query id.
    pub id: QueryId,
    /// Nonce the id was derived with.
    pub nonce: u64,
    /// Lifecycle state.
    pub status: QueryStatus,
    /// Principal that submitted the query.
    pub submitter: Address,
    /// `rlp([callback, queries, message, light_client])`.
    pub encoded_request: Vec<u8>,
}

impl Query {
    /// Decode the stored request.
    pub fn request(&self) -> Result<QueryRequest, rlp::DecoderError> {
        QueryRequest::decode_bytes(&self.encoded_request)
    }

    /// True while waiting for a proof.
    pub fn is_pending(&self) -> bool {
        self.status == QueryStatus::Pending
    }
}

/// Nonce, queries and collected fees, mutated only by the ledger.
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    /// Next nonce.
    pub nonce: u64,
    /// Every query ever submitted.
    pub queries: HashMap<QueryId, Query>,
    /// Sum of submission fees.
    pub collected_fees: U256,
}

impl LedgerState {
    /// Empty state starting at nonce zero.
    pub fn new() -> Self {
        Self::default()
    }
}
