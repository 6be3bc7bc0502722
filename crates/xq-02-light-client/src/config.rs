//! # Light Client Configuration
//!
//! Configuration for the two light-client backends.

use serde::{Deserialize, Serialize};
use shared_types::U256;

/// Maximum subqueries a node-operator light client forwards in one request.
pub const NODE_OPERATOR_MAX_QUERIES: usize = 10;

/// Maximum principals on a node-operator whitelist.
pub const WHITELIST_CAPACITY: usize = 10;

/// Node-operator (request/response oracle network) configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeOperatorConfig {
    /// Subquery batch cap per oracle request.
    pub max_queries_per_request: usize,

    /// Gas charged per subquery on the delivery path.
    pub per_query_gas: u64,

    /// Fixed gas of a delivery.
    pub base_gas_limit: u64,

    /// Fee paid to the oracle network per request.
    pub oracle_fee: U256,

    /// Budget available for oracle fees at startup.
    pub initial_oracle_budget: U256,

    /// Whitelist capacity.
    pub whitelist_capacity: usize,
}

impl Default for NodeOperatorConfig {
    fn default() -> Self {
        Self {
            max_queries_per_request: NODE_OPERATOR_MAX_QUERIES,
            per_query_gas: 70_000,
            base_gas_limit: 200_000,
            // 0.1 token at 18 decimals
            oracle_fee: U256::from(100_000_000_000_000_000u64),
            initial_oracle_budget: U256::zero(),
            whitelist_capacity: WHITELIST_CAPACITY,
        }
    }
}

impl NodeOperatorConfig {
    /// Create a config for testing (small round numbers, funded budget).
    pub fn for_testing() -> Self {
        Self {
            max_queries_per_request: NODE_OPERATOR_MAX_QUERIES,
            per_query_gas: 10,
            base_gas_limit: 100,
            oracle_fee: U256::from(1_000),
            initial_oracle_budget: U256::from(1_000_000),
            whitelist_capacity: WHITELIST_CAPACITY,
        }
    }
}

/// Push-compute (single trusted compute job) configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushComputeConfig {
    /// Subquery batch cap per compute job.
    pub max_queries_per_request: usize,
}

impl Default for PushComputeConfig {
    fn default() -> Self {
        Self {
            max_queries_per_request: 100,
        }
    }
}

impl PushComputeConfig {
    /// Create a config for testing.
    pub fn for_testing() -> Self {
        Self::default()
    }
}
