//! # Node-Operator Light Client
//!
//! Classic request/response oracle network. Each request costs a fixed
//! oracle fee paid from a prepaid budget, only whitelisted source
//! principals may request, and a request carries at most
//! `max_queries_per_request` subqueries.

use super::core::{LightClientCore, LightClientRoles};
use crate::algorithms::node_operator_fee;
use crate::config::NodeOperatorConfig;
use crate::domain::{LightClientError, VerifiedSlot};
use crate::ports::{GasPriceFeed, LightClient, OracleBackend};
use shared_bus::{EventPublisher, GatewayEvent};
use shared_types::{AllowList, Address, ChainId, Hash, OracleResponse, SubQuery, H256, U256};
use std::sync::Arc;
use tracing::{debug, info};

/// Light client backed by a node-operator oracle network.
pub struct NodeOperatorLightClient {
    config: NodeOperatorConfig,
    core: LightClientCore,
    whitelist: AllowList,
    gas_feed: Arc<dyn GasPriceFeed>,
    oracle_budget: U256,
}

impl NodeOperatorLightClient {
    /// Create a light client bound to `roles.gateway`.
    pub fn new(
        config: NodeOperatorConfig,
        roles: LightClientRoles,
        backend: Arc<dyn OracleBackend>,
        gas_feed: Arc<dyn GasPriceFeed>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            whitelist: AllowList::new(config.whitelist_capacity),
            oracle_budget: config.initial_oracle_budget,
            config,
            core: LightClientCore::new(roles, backend, publisher),
            gas_feed,
        }
    }

    /// Allow `addresses` to submit queries through this light client. Owner only.
    pub fn add_to_whitelist(
        &mut self,
        caller: Address,
        addresses: &[Address],
    ) -> Result<(), LightClientError> {
        self.core.require_owner(caller)?;
        for address in self.whitelist.add_all(addresses)? {
            info!(address = ?address, "[xq-02] Whitelisted");
            self.core.publish(GatewayEvent::WhitelistAdded {
                light_client: self.core.roles.address,
                address,
            });
        }
        Ok(())
    }

    /// Revoke `addresses`. Owner only.
    pub fn remove_from_whitelist(
        &mut self,
        caller: Address,
        addresses: &[Address],
    ) -> Result<(), LightClientError> {
        self.core.require_owner(caller)?;
        for address in self.whitelist.remove_all(addresses) {
            info!(address = ?address, "[xq-02] Removed from whitelist");
            self.core.publish(GatewayEvent::WhitelistRemoved {
                light_client: self.core.roles.address,
                address,
            });
        }
        Ok(())
    }

    /// Whether `address` may submit queries.
    pub fn is_whitelisted(&self, address: &Address) -> bool {
        self.whitelist.contains(address)
    }

    /// Top up the oracle fee budget.
    pub fn fund(&mut self, amount: U256) {
        self.oracle_budget = self.oracle_budget.saturating_add(amount);
        debug!(budget = %self.oracle_budget, "[xq-02] Oracle budget funded");
    }

    /// Remaining oracle fee budget.
    pub fn oracle_budget(&self) -> U256 {
        self.oracle_budget
    }

    /// Apply an oracle answer for an outstanding request.
    pub fn fulfill(
        &mut self,
        caller: Address,
        request_id: H256,
        responses: &[OracleResponse],
    ) -> Result<(), LightClientError> {
        self.core.check_fulfilment(caller, &request_id)?;
        self.core.apply_responses(caller, responses)?;
        self.core.take_request(&request_id);
        info!(request_id = ?request_id, "[xq-02] Oracle request fulfilled");
        Ok(())
    }

    /// Outstanding oracle requests.
    pub fn pending_requests(&self) -> usize {
        self.core.pending.len()
    }
}

impl LightClient for NodeOperatorLightClient {
    fn address(&self) -> Address {
        self.core.roles.address
    }

    fn request_query(
        &mut self,
        origin: Address,
        queries: &[SubQuery],
    ) -> Result<(), LightClientError> {
        if !self.whitelist.contains(&origin) {
            return Err(LightClientError::NotWhitelisted { origin });
        }
        LightClientCore::check_batch(queries, self.config.max_queries_per_request)?;
        if self.oracle_budget < self.config.oracle_fee {
            return Err(LightClientError::InsufficientOracleBudget {
                required: self.config.oracle_fee,
                available: self.oracle_budget,
            });
        }

        self.core.notify_oracle(queries)?;
        self.oracle_budget -= self.config.oracle_fee;
        Ok(())
    }

    fn update_header(
        &mut self,
        caller: Address,
        responses: &[OracleResponse],
    ) -> Result<(), LightClientError> {
        self.core.apply_responses(caller, responses)
    }

    fn verify(&self, caller: Address, proof: &[u8]) -> Result<Vec<VerifiedSlot>, LightClientError> {
        self.core.verify(caller, proof)
    }

    fn estimate_fee(&self, queries: &[SubQuery]) -> Result<U256, LightClientError> {
        Ok(node_operator_fee(
            queries.len(),
            self.config.per_query_gas,
            self.config.base_gas_limit,
            self.gas_feed.gas_price(),
            self.config.oracle_fee,
        ))
    }

    fn oracle(&self) -> Address {
        self.core.roles.oracle
    }

    fn set_oracle(&mut self, caller: Address, oracle: Address) -> Result<(), LightClientError> {
        self.core.set_oracle(caller, oracle)
    }

    fn approved_state_root(&self, chain_id: ChainId, height: U256) -> Option<Hash> {
        self.core.roots.get(chain_id, height)
    }
}
