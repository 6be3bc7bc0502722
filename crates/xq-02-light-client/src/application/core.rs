//! # Light Client Core
//!
//! State and behaviour shared by both backends: principals, approved
//! roots, outstanding oracle requests, and proof verification.

use crate::algorithms::verify_query_proof;
use crate::domain::{
    ApprovedStateRoots, LightClientError, PendingRequests, QueryProof, VerifiedSlot,
};
use crate::ports::OracleBackend;
use shared_bus::{EventPublisher, GatewayEvent};
use shared_types::{
    distinct_height_requests, encode_height_requests, Address, HeightRequest, OracleResponse,
    SubQuery, H256,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Principals of a light client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightClientRoles {
    /// The light client's own principal.
    pub address: Address,
    /// Gateway allowed to call `verify`.
    pub gateway: Address,
    /// Owner allowed to administer.
    pub owner: Address,
    /// Oracle principal allowed to deliver headers.
    pub oracle: Address,
}

pub(crate) struct LightClientCore {
    pub(crate) roles: LightClientRoles,
    pub(crate) roots: ApprovedStateRoots,
    pub(crate) pending: PendingRequests,
    backend: Arc<dyn OracleBackend>,
    publisher: Arc<dyn EventPublisher>,
}

impl LightClientCore {
    pub(crate) fn new(
        roles: LightClientRoles,
        backend: Arc<dyn OracleBackend>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            roles,
            roots: ApprovedStateRoots::new(),
            pending: PendingRequests::new(),
            backend,
            publisher,
        }
    }

    pub(crate) fn require_owner(&self, caller: Address) -> Result<(), LightClientError> {
        if caller != self.roles.owner {
            return Err(LightClientError::NotOwner { caller });
        }
        Ok(())
    }

    pub(crate) fn require_oracle(&self, caller: Address) -> Result<(), LightClientError> {
        if caller != self.roles.oracle {
            return Err(LightClientError::NotOracle { caller });
        }
        Ok(())
    }

    pub(crate) fn check_batch(queries: &[SubQuery], max: usize) -> Result<(), LightClientError> {
        if queries.is_empty() {
            return Err(LightClientError::EmptyQuery);
        }
        if queries.len() > max {
            return Err(LightClientError::TooManyQueries {
                count: queries.len(),
                max,
            });
        }
        Ok(())
    }

    /// Ask the oracle for the distinct (chain, height) roots of `queries`.
    pub(crate) fn notify_oracle(&mut self, queries: &[SubQuery]) -> Result<H256, LightClientError> {
        let requests = distinct_height_requests(queries);
        let encoded = encode_height_requests(&requests);
        let request_id = self.backend.send_request(self.roles.address, &encoded)?;

        info!(
            light_client = ?self.roles.address,
            request_id = ?request_id,
            heights = requests.len(),
            "[xq-02] Oracle notified"
        );
        self.pending.insert(request_id, requests);
        self.publisher.publish(GatewayEvent::OracleNotified {
            light_client: self.roles.address,
            request_id,
            oracle: self.roles.oracle,
            encoded_requests: encoded,
        });
        Ok(request_id)
    }

    /// Check that `request_id` is outstanding and came from the oracle.
    pub(crate) fn check_fulfilment(
        &self,
        caller: Address,
        request_id: &H256,
    ) -> Result<(), LightClientError> {
        self.require_oracle(caller)?;
        if !self.pending.contains(request_id) {
            return Err(LightClientError::UnknownRequest(*request_id));
        }
        Ok(())
    }

    pub(crate) fn take_request(&mut self, request_id: &H256) -> Vec<HeightRequest> {
        self.pending.remove(request_id).unwrap_or_default()
    }

    /// Store approved roots after an oracle delivery.
    pub(crate) fn apply_responses(
        &mut self,
        caller: Address,
        responses: &[OracleResponse],
    ) -> Result<(), LightClientError> {
        self.require_oracle(caller)?;
        if responses.is_empty() {
            return Err(LightClientError::EmptyResponse);
        }
        for response in responses {
            if let Some(previous) = self.roots.approve(response) {
                warn!(
                    chain_id = response.dst_chain_id,
                    height = %response.height,
                    previous = ?previous,
                    root = ?response.root,
                    "[xq-02] Approved state root overwritten with a different value"
                );
            }
            debug!(
                chain_id = response.dst_chain_id,
                height = %response.height,
                "[xq-02] State root approved"
            );
            self.publisher.publish(GatewayEvent::HeaderUpdated {
                light_client: self.roles.address,
                response: *response,
            });
        }
        Ok(())
    }

    pub(crate) fn verify(
        &self,
        caller: Address,
        proof: &[u8],
    ) -> Result<Vec<VerifiedSlot>, LightClientError> {
        if caller != self.roles.gateway {
            return Err(LightClientError::NotGateway { caller });
        }
        let proof = QueryProof::decode_bytes(proof)?;
        verify_query_proof(&self.roots, &proof.groups)
    }

    pub(crate) fn set_oracle(
        &mut self,
        caller: Address,
        oracle: Address,
    ) -> Result<(), LightClientError> {
        self.require_owner(caller)?;
        info!(
            light_client = ?self.roles.address,
            oracle = ?oracle,
            "[xq-02] Oracle principal changed"
        );
        self.roles.oracle = oracle;
        self.publisher.publish(GatewayEvent::OracleChanged {
            light_client: self.roles.address,
            oracle,
        });
        Ok(())
    }

    pub(crate) fn publish(&self, event: GatewayEvent) {
        self.publisher.publish(event);
    }
}
