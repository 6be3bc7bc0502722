//! # Core Domain Entities
//!
//! Defines the entities exchanged between the query ledger, the light-client
//! adapters and the off-chain relayer.
//!
//! ## Clusters
//!
//! - **Queries**: `SubQuery`, `QueryRequest`, `QueryStatus`
//! - **Headers**: `HeightRequest`, `OracleResponse`

use serde::{Deserialize, Serialize};

// Re-export the fixed-width primitives used across all crates
pub use primitive_types::{H160, H256, U256};

/// A 32-byte Keccak-256 hash.
pub type Hash = H256;

/// A 20-byte account identifier on any ledger.
pub type Address = H160;

/// Identifier of a destination ledger.
pub type ChainId = u32;

/// Identifier of a submitted query.
pub type QueryId = H256;

// =============================================================================
// QUERIES
// =============================================================================

/// One (chain, address, height, slot) unit within a batched query.
///
/// A `height` of zero means "latest cached" and is only meaningful for
/// cache reads; submissions require an explicit height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubQuery {
    /// Destination ledger the slot lives on.
    pub dst_chain_id: ChainId,
    /// Account whose storage is read.
    pub to: Address,
    /// Block height of the snapshot.
    pub height: U256,
    /// Storage slot (pre-image, not hashed).
    pub slot: H256,
}

impl SubQuery {
    /// Create a subquery.
    pub fn new(dst_chain_id: ChainId, to: Address, height: U256, slot: H256) -> Self {
        Self {
            dst_chain_id,
            to,
            height,
            slot,
        }
    }

    /// The (chain, height) pair whose state root this subquery needs.
    pub fn height_request(&self) -> HeightRequest {
        HeightRequest {
            dst_chain_id: self.dst_chain_id,
            height: self.height,
        }
    }
}

/// The full payload of a submitted query, hashed into its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Receiver that gets the results.
    pub callback: Address,
    /// Ordered subqueries.
    pub queries: Vec<SubQuery>,
    /// Opaque requester payload echoed back on completion.
    pub message: Vec<u8>,
    /// Light client responsible for the state roots.
    pub light_client: Address,
}

/// Lifecycle state of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryStatus {
    /// Waiting for a proof.
    Pending,
    /// Proof verified and results cached.
    Done,
}

impl QueryStatus {
    /// Check whether a transition to `target` is allowed.
    pub fn can_transition_to(&self, target: QueryStatus) -> bool {
        matches!((self, target), (QueryStatus::Pending, QueryStatus::Done))
    }

    /// Check whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, QueryStatus::Done)
    }
}

// =============================================================================
// HEADERS
// =============================================================================

/// A distinct (chain, height) pair the oracle is asked to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeightRequest {
    /// Destination ledger.
    pub dst_chain_id: ChainId,
    /// Block height.
    pub height: U256,
}

/// A state root delivered by an oracle for one (chain, height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleResponse {
    /// Destination ledger.
    pub dst_chain_id: ChainId,
    /// Block height.
    pub height: U256,
    /// State root of that block.
    pub root: H256,
}

/// Collapse subqueries to their distinct (chain, height) pairs, first-seen order.
pub fn distinct_height_requests(queries: &[SubQuery]) -> Vec<HeightRequest> {
    let mut out: Vec<HeightRequest> = Vec::with_capacity(queries.len());
    for query in queries {
        let request = query.height_request();
        if !out.contains(&request) {
            out.push(request);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(chain: ChainId, height: u64, slot: u64) -> SubQuery {
        SubQuery::new(
            chain,
            Address::repeat_byte(0xaa),
            U256::from(height),
            H256::from_low_u64_be(slot),
        )
    }

    #[test]
    fn test_status_transitions() {
        assert!(QueryStatus::Pending.can_transition_to(QueryStatus::Done));
        assert!(!QueryStatus::Done.can_transition_to(QueryStatus::Pending));
        assert!(!QueryStatus::Done.can_transition_to(QueryStatus::Done));
        assert!(QueryStatus::Done.is_terminal());
        assert!(!QueryStatus::Pending.is_terminal());
    }

    #[test]
    fn test_distinct_height_requests_keeps_first_seen_order() {
        let queries = vec![sub(5, 100, 1), sub(1, 7, 2), sub(5, 100, 3), sub(5, 101, 4)];
        let requests = distinct_height_requests(&queries);
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].dst_chain_id, 5);
        assert_eq!(requests[1].dst_chain_id, 1);
        assert_eq!(requests[2].height, U256::from(101));
    }
}
