//! # Inbound Ports
//!
//! The capability set every light-client backend exposes to the gateway.
//! The push-compute and node-operator adapters are two implementations of
//! this one trait; the gateway only ever holds `dyn LightClient`.

use crate::domain::{LightClientError, VerifiedSlot};
use parking_lot::RwLock;
use shared_types::{Address, ChainId, Hash, OracleResponse, SubQuery, U256};
use std::sync::Arc;

/// Light client API - inbound port.
pub trait LightClient: Send + Sync {
    /// Principal of this light client.
    fn address(&self) -> Address;

    /// Forward a subquery batch to the oracle backend.
    ///
    /// `origin` is the principal that submitted the query to the gateway.
    fn request_query(&mut self, origin: Address, queries: &[SubQuery])
        -> Result<(), LightClientError>;

    /// Store oracle-delivered state roots. Only the oracle principal may call.
    fn update_header(
        &mut self,
        caller: Address,
        responses: &[OracleResponse],
    ) -> Result<(), LightClientError>;

    /// Verify a delivered proof and return the values in delivery order.
    /// Only the bound gateway may call.
    fn verify(&self, caller: Address, proof: &[u8]) -> Result<Vec<VerifiedSlot>, LightClientError>;

    /// Fee this light client charges for `queries`.
    fn estimate_fee(&self, queries: &[SubQuery]) -> Result<U256, LightClientError>;

    /// Current oracle principal.
    fn oracle(&self) -> Address;

    /// Replace the oracle principal. Only the owner may call.
    fn set_oracle(&mut self, caller: Address, oracle: Address) -> Result<(), LightClientError>;

    /// Approved state root for (chain, height), if any.
    fn approved_state_root(&self, chain_id: ChainId, height: U256) -> Option<Hash>;
}

/// How the gateway holds a registered light client.
pub type SharedLightClient = Arc<RwLock<dyn LightClient>>;
