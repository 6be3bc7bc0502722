//! # Push-Compute Light Client
//!
//! A single trusted compute job receives the whole batch and returns one
//! state root per distinct (chain, height). The job's answer arrives as a
//! text payload through [`PushComputeLightClient::fulfill`], or as decoded
//! responses through `update_header`. Requests are free.

use super::core::{LightClientCore, LightClientRoles};
use crate::algorithms::parse_compute_response;
use crate::config::PushComputeConfig;
use crate::domain::{LightClientError, VerifiedSlot};
use crate::ports::{LightClient, OracleBackend};
use shared_bus::EventPublisher;
use shared_types::{Address, ChainId, Hash, OracleResponse, SubQuery, H256, U256};
use std::sync::Arc;
use tracing::info;

/// Light client backed by a push-compute job.
pub struct PushComputeLightClient {
    config: PushComputeConfig,
    core: LightClientCore,
}

impl PushComputeLightClient {
    /// Create a light client bound to `roles.gateway`.
    pub fn new(
        config: PushComputeConfig,
        roles: LightClientRoles,
        backend: Arc<dyn OracleBackend>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            config,
            core: LightClientCore::new(roles, backend, publisher),
        }
    }

    /// Apply a compute job answer for an outstanding request.
    pub fn fulfill(
        &mut self,
        caller: Address,
        request_id: H256,
        payload: &str,
    ) -> Result<(), LightClientError> {
        self.core.check_fulfilment(caller, &request_id)?;
        let responses = parse_compute_response(payload)?;
        self.core.apply_responses(caller, &responses)?;
        self.core.take_request(&request_id);
        info!(
            request_id = ?request_id,
            roots = responses.len(),
            "[xq-02] Compute job fulfilled"
        );
        Ok(())
    }

    /// Outstanding compute jobs.
    pub fn pending_requests(&self) -> usize {
        self.core.pending.len()
    }
}

impl LightClient for PushComputeLightClient {
    fn address(&self) -> Address {
        self.core.roles.address
    }

    fn request_query(
        &mut self,
        _origin: Address,
        queries: &[SubQuery],
    ) -> Result<(), LightClientError> {
        LightClientCore::check_batch(queries, self.config.max_queries_per_request)?;
        self.core.notify_oracle(queries)?;
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

    fn estimate_fee(&self, _queries: &[SubQuery]) -> Result<U256, LightClientError> {
        Ok(U256::zero())
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::encode_compute_response;
    use crate::ports::MockOracle;
    use shared_bus::{GatewayEvent, RecordingPublisher};
    use shared_types::decode_height_requests;

    const GATEWAY: u64 = 0x9a7e;
    const OWNER: u64 = 0x0e;
    const ORACLE: u64 = 0x0c;

    fn addr(n: u64) -> Address {
        Address::from_low_u64_be(n)
    }

    fn client() -> (PushComputeLightClient, Arc<MockOracle>, Arc<RecordingPublisher>) {
        let oracle = Arc::new(MockOracle::default());
        let publisher = Arc::new(RecordingPublisher::new());
        let roles = LightClientRoles {
            address: addr(0x1c),
            gateway: addr(GATEWAY),
            owner: addr(OWNER),
            oracle: addr(ORACLE),
        };
        let client = PushComputeLightClient::new(
            PushComputeConfig::for_testing(),
            roles,
            oracle.clone(),
            publisher.clone(),
        );
        (client, oracle, publisher)
    }

    fn sub(chain: ChainId, height: u64, slot: u64) -> SubQuery {
        SubQuery::new(chain, addr(0xaa), U256::from(height), H256::from_low_u64_be(slot))
    }

    fn last_request_id(publisher: &RecordingPublisher) -> H256 {
        publisher
            .events()
            .iter()
            .rev()
            .find_map(|e| match e {
                GatewayEvent::OracleNotified { request_id, .. } => Some(*request_id),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_request_sends_distinct_heights() {
        let (mut client, oracle, publisher) = client();
        client
            .request_query(addr(1), &[sub(5, 10, 0), sub(5, 10, 1), sub(420, 3, 0)])
            .unwrap();

        let sent = oracle.sent.lock();
        let requests = decode_height_requests(&sent[0].1).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(client.pending_requests(), 1);
        assert!(matches!(publisher.events()[0], GatewayEvent::OracleNotified { .. }));
    }

    #[test]
    fn test_fee_is_zero() {
        let (client, _, _) = client();
        assert_eq!(client.estimate_fee(&[sub(5, 10, 0)]).unwrap(), U256::zero());
    }

    #[test]
    fn test_fulfill_applies_roots() {
        let (mut client, _, publisher) = client();
        client.request_query(addr(1), &[sub(5, 10, 0)]).unwrap();
        let request_id = last_request_id(&publisher);

        let response = OracleResponse {
            dst_chain_id: 5,
            height: U256::from(10),
            root: H256::repeat_byte(0x42),
        };
        client
            .fulfill(addr(ORACLE), request_id, &encode_compute_response(&[response]))
            .unwrap();

        assert_eq!(client.approved_state_root(5, U256::from(10)), Some(H256::repeat_byte(0x42)));
        assert_eq!(client.pending_requests(), 0);
        assert_eq!(
            client.fulfill(addr(ORACLE), request_id, "1,5,10,1"),
            Err(LightClientError::UnknownRequest(request_id))
        );
    }

    #[test]
    fn test_fulfill_accepts_job_output() {
        let (mut client, _, publisher) = client();
        client.request_query(addr(1), &[sub(5, 10, 0)]).unwrap();
        let request_id = last_request_id(&publisher);

        client
            .fulfill(addr(ORACLE), request_id, "\"1,5,10,66,\"")
            .unwrap();
        assert_eq!(client.approved_state_root(5, U256::from(10)), Some(H256::from_low_u64_be(66)));
    }

    #[test]
    fn test_fulfill_from_stranger_rejected() {
        let (mut client, _, publisher) = client();
        client.request_query(addr(1), &[sub(5, 10, 0)]).unwrap();
        let request_id = last_request_id(&publisher);
        assert!(matches!(
            client.fulfill(addr(0xbad), request_id, "1,5,10,1"),
            Err(LightClientError::NotOracle { .. })
        ));
        assert_eq!(client.pending_requests(), 1);
    }

    #[test]
    fn test_malformed_payload_keeps_request_pending() {
        let (mut client, _, publisher) = client();
        client.request_query(addr(1), &[sub(5, 10, 0)]).unwrap();
        let request_id = last_request_id(&publisher);
        assert!(client.fulfill(addr(ORACLE), request_id, "2,5").is_err());
        assert_eq!(client.pending_requests(), 1);
        assert_eq!(client.approved_state_root(5, U256::from(10)), None);
    }

    #[test]
    fn test_update_header_only_from_oracle() {
        let (mut client, _, _) = client();
        let response = OracleResponse {
            dst_chain_id: 5,
            height: U256::from(10),
            root: H256::repeat_byte(1),
        };
        assert!(matches!(
            client.update_header(addr(OWNER), &[response]),
            Err(LightClientError::NotOracle { .. })
        ));
        client.update_header(addr(ORACLE), &[response]).unwrap();
        assert!(client.approved_state_root(5, U256::from(10)).is_some());
    }

    #[test]
    fn test_set_oracle_moves_the_role() {
        let (mut client, _, publisher) = client();
        assert!(client.set_oracle(addr(ORACLE), addr(0x77)).is_err());
        client.set_oracle(addr(OWNER), addr(0x77)).unwrap();
        assert_eq!(client.oracle(), addr(0x77));
        assert!(publisher
            .events()
            .iter()
            .any(|e| matches!(e, GatewayEvent::OracleChanged { .. })));
    }

    #[test]
    fn test_verify_only_from_gateway() {
        let (client, _, _) = client();
        assert!(matches!(
            client.verify(addr(1), &[0xc0]),
            Err(LightClientError::NotGateway { .. })
        ));
        assert_eq!(client.verify(addr(GATEWAY), &[0xc0]).unwrap(), vec![]);
    }

    #[test]
    fn test_verify_rejects_malformed_proof_bytes() {
        let (client, _, _) = client();
        for bytes in [&[0xde, 0xad, 0xbe, 0xef][..], &[0xc0, 0x01, 0x02, 0x03][..]] {
            assert!(matches!(
                client.verify(addr(GATEWAY), bytes),
                Err(LightClientError::MalformedProof(_))
            ));
        }
    }

    #[test]
    fn test_oracle_failure_leaves_nothing_pending() {
        let oracle = Arc::new(MockOracle {
            should_fail: true,
            ..Default::default()
        });
        let publisher = Arc::new(RecordingPublisher::new());
        let roles = LightClientRoles {
            address: addr(0x1c),
            gateway: addr(GATEWAY),
            owner: addr(OWNER),
            oracle: addr(ORACLE),
        };
        let mut client =
            PushComputeLightClient::new(PushComputeConfig::for_testing(), roles, oracle, publisher.clone());
        assert!(client.request_query(addr(1), &[sub(5, 10, 0)]).is_err());
        assert_eq!(client.pending_requests(), 0);
        assert!(publisher.events().is_empty());
    }
}
