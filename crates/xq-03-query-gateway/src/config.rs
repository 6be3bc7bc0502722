//! # Gateway Configuration

use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};

/// Maximum subqueries per submitted query.
pub const MAX_QUERY_BATCH: usize = 100;

/// Maximum subqueries per cache read.
pub const MAX_CACHE_BATCH: usize = 100;

/// Maximum allow-listed relayers.
pub const MAX_RELAYERS: usize = 10;

/// Query gateway configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Principal the gateway acts as when calling light clients.
    pub gateway_address: Address,

    /// Principal allowed to manage relayers.
    pub owner: Address,

    /// Fee added to every light client estimate.
    pub protocol_fee: U256,

    /// Subquery cap of `submit_query`.
    pub max_query_batch: usize,

    /// Subquery cap of `get_cache`.
    pub max_cache_batch: usize,

    /// Relayer allow-list capacity.
    pub max_relayers: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            gateway_address: Address::from_low_u64_be(0x9a7e),
            owner: Address::from_low_u64_be(0x0e),
            protocol_fee: U256::zero(),
            max_query_batch: MAX_QUERY_BATCH,
            max_cache_batch: MAX_CACHE_BATCH,
            max_relayers: MAX_RELAYERS,
        }
    }
}

impl GatewayConfig {
    /// Create a config for testing (non-zero protocol fee).
    pub fn for_testing() -> Self {
        Self {
            protocol_fee: U256::from(5),
            ..Self::default()
        }
    }
}
