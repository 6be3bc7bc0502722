//! # Query Ledger
//!
//! Orchestrates the query lifecycle:
//!
//! ```text
//! submit_query ──→ Pending ──deliver_proof (relayer, verified)──→ Done
//!                     │                                         │
//!                     └─ proof rejected: stays Pending          └─ cache writes, callback
//! ```
//!
//! Every method runs to completion and either applies all of its effects
//! or none. A receiver failure is the one exception: it is reported after
//! the cache writes and the status flip, and undoes neither.

use super::dispatcher::CallbackDispatcher;
use crate::config::GatewayConfig;
use crate::domain::{
    CachedValue, CallbackOutcome, DeliveryReport, GatewayError, LedgerState, Query,
    QuerySubmission, RelayerGate, ResultCache,
};
use crate::ports::{QueryGatewayApi, QueryReceiver};
use shared_bus::{EventPublisher, GatewayEvent};
use shared_types::{
    cache_key, Address, Hash, QueryId, QueryRequest, QueryStatus, SubQuery, U256,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use xq_02_light_client::{SharedLightClient, VerifiedSlot};

/// The query gateway's state machine.
pub struct QueryLedger {
    config: GatewayConfig,
    state: LedgerState,
    cache: ResultCache,
    relayers: RelayerGate,
    light_clients: HashMap<Address, SharedLightClient>,
    dispatcher: CallbackDispatcher,
    publisher: Arc<dyn EventPublisher>,
}

impl QueryLedger {
    /// Create an empty ledger.
    pub fn new(config: GatewayConfig, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            relayers: RelayerGate::new(config.max_relayers),
            config,
            state: LedgerState::new(),
            cache: ResultCache::new(),
            light_clients: HashMap::new(),
            dispatcher: CallbackDispatcher::new(),
            publisher,
        }
    }

    /// Ledger configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Make a light client selectable by requesters. Returns its address.
    pub fn register_light_client(&mut self, light_client: SharedLightClient) -> Address {
        let address = light_client.read().address();
        info!(light_client = ?address, "[xq-03] Light client registered");
        self.light_clients.insert(address, light_client);
        address
    }

    /// Make `receiver` selectable as `callback`.
    pub fn register_receiver(&mut self, callback: Address, receiver: Arc<dyn QueryReceiver>) {
        debug!(callback = ?callback, "[xq-03] Receiver registered");
        self.dispatcher.register(callback, receiver);
    }

    /// Next nonce.
    pub fn nonce(&self) -> u64 {
        self.state.nonce
    }

    /// Sum of accepted submission fees.
    pub fn collected_fees(&self) -> U256 {
        self.state.collected_fees
    }

    /// Whether `address` may deliver proofs.
    pub fn is_relayer(&self, address: &Address) -> bool {
        self.relayers.is_relayer(address)
    }

    /// Current relayers.
    pub fn relayers(&self) -> Vec<Address> {
        self.relayers.relayers()
    }

    /// Raw cache entry for a cache key.
    pub fn cached(&self, key: &Hash) -> Option<&CachedValue> {
        self.cache.get(key)
    }

    fn light_client(&self, address: Address) -> Result<&SharedLightClient, GatewayError> {
        self.light_clients
            .get(&address)
            .ok_or(GatewayError::UnknownLightClient(address))
    }

    fn require_owner(&self, caller: Address) -> Result<(), GatewayError> {
        if caller != self.config.owner {
            return Err(GatewayError::NotOwner { caller });
        }
        Ok(())
    }
}

fn validate_queries(queries: &[SubQuery], max: usize) -> Result<(), GatewayError> {
    if queries.is_empty() {
        return Err(GatewayError::EmptyQuery);
    }
    if queries.len() > max {
        return Err(GatewayError::TooManyQueries {
            count: queries.len(),
            max,
        });
    }
    for (index, query) in queries.iter().enumerate() {
        let field = if query.dst_chain_id == 0 {
            "chain id"
        } else if query.height.is_zero() {
            "height"
        } else if query.slot.is_zero() {
            "slot"
        } else {
            continue;
        };
        return Err(GatewayError::InvalidSubQuery { index, field });
    }
    Ok(())
}

fn check_alignment(queries: &[SubQuery], slots: &[VerifiedSlot]) -> Result<(), GatewayError> {
    if queries.len() != slots.len() {
        return Err(GatewayError::ValueCountMismatch {
            expected: queries.len(),
            actual: slots.len(),
        });
    }
    match queries.iter().zip(slots).position(|(q, s)| !s.answers(q)) {
        Some(index) => Err(GatewayError::MisalignedProof { index }),
        None => Ok(()),
    }
}

impl QueryGatewayApi for QueryLedger {
    fn submit_query(&mut self, submission: QuerySubmission) -> Result<QueryId, GatewayError> {
        let QuerySubmission {
            submitter,
            queries,
            light_client,
            callback,
            message,
            fee,
        } = submission;

        validate_queries(&queries, self.config.max_query_batch)?;
        if light_client.is_zero() {
            return Err(GatewayError::ZeroAddress("light client"));
        }
        if callback.is_zero() {
            return Err(GatewayError::ZeroAddress("callback"));
        }
        let client = self.light_client(light_client)?.clone();
        if !self.dispatcher.is_receiver(&callback) {
            return Err(GatewayError::UnknownReceiver(callback));
        }
        let required = self.estimate_fee(light_client, &queries)?;
        if fee < required {
            return Err(GatewayError::InsufficientFee {
                required,
                provided: fee,
            });
        }

        let request = QueryRequest {
            callback,
            queries,
            message,
            light_client,
        };
        let encoded_request = request.encode();
        let nonce = self.state.nonce;
        let id = shared_types::query_id(&encoded_request, nonce);

        // Nothing is recorded until the light client accepts.
        client.write().request_query(submitter, &request.queries)?;

        self.state.nonce += 1;
        self.state.collected_fees = self.state.collected_fees.saturating_add(fee);
        self.state.queries.insert(
            id,
            Query {
                id,
                nonce,
                status: QueryStatus::Pending,
                submitter,
                encoded_request: encoded_request.clone(),
            },
        );

        info!(
            query_id = ?id,
            nonce,
            subqueries = request.queries.len(),
            light_client = ?light_client,
            "[xq-03] Query sent"
        );
        self.publisher.publish(GatewayEvent::QuerySent {
            submitter,
            query_id: id,
            encoded_request,
            message: request.message,
            light_client,
            callback,
        });
        Ok(id)
    }

    fn deliver_proof(
        &mut self,
        caller: Address,
        query_id: QueryId,
        proof: &[u8],
    ) -> Result<DeliveryReport, GatewayError> {
        if !self.relayers.is_relayer(&caller) {
            return Err(GatewayError::NotRelayer { caller });
        }
        let query = self
            .state
            .queries
            .get(&query_id)
            .ok_or(GatewayError::InvalidQueryId(query_id))?;
        if !query.status.can_transition_to(QueryStatus::Done) {
            return Err(GatewayError::InvalidStatus {
                query_id,
                status: query.status,
            });
        }
        let request = query.request().map_err(GatewayError::CorruptRequest)?;

        let slots = self
            .light_client(request.light_client)?
            .read()
            .verify(self.config.gateway_address, proof)
            .map_err(|e| {
                debug!(query_id = ?query_id, relayer = ?caller, error = %e, "[xq-03] Proof rejected");
                GatewayError::from(e)
            })?;
        check_alignment(&request.queries, &slots).inspect_err(|e| {
            debug!(query_id = ?query_id, relayer = ?caller, error = %e, "[xq-03] Proof rejected");
        })?;
        let values: Vec<Vec<u8>> = slots.into_iter().map(|slot| slot.value).collect();

        for (query, value) in request.queries.iter().zip(&values) {
            let key = cache_key(query.dst_chain_id, &query.to, &query.slot);
            self.cache.put(key, query.height, value.clone());
            self.publisher.publish(GatewayEvent::QueryDataSaved {
                key,
                height: query.height,
                value: value.clone(),
            });
        }
        if let Some(query) = self.state.queries.get_mut(&query_id) {
            query.status = QueryStatus::Done;
        }
        info!(
            query_id = ?query_id,
            relayer = ?caller,
            values = values.len(),
            "[xq-03] Query completed"
        );

        let outcome = self.dispatcher.deliver(
            request.callback,
            query_id,
            &request.message,
            request.light_client,
            &values,
        );
        let event = match &outcome {
            CallbackOutcome::Delivered => GatewayEvent::QueryCompleted {
                query_id,
                message: request.message,
                light_client: request.light_client,
                callback: request.callback,
                values: values.clone(),
            },
            CallbackOutcome::Failed { reason } => GatewayEvent::ReceiverFailed {
                query_id,
                reason: reason.clone(),
            },
        };
        self.publisher.publish(event);

        Ok(DeliveryReport {
            query_id,
            values,
            callback: outcome,
        })
    }

    fn estimate_fee(
        &self,
        light_client: Address,
        queries: &[SubQuery],
    ) -> Result<U256, GatewayError> {
        let fee = self.light_client(light_client)?.read().estimate_fee(queries)?;
        Ok(fee.saturating_add(self.config.protocol_fee))
    }

    fn get_cache(&self, queries: &[SubQuery]) -> Result<Vec<Vec<u8>>, GatewayError> {
        if queries.len() > self.config.max_cache_batch {
            return Err(GatewayError::TooManyQueries {
                count: queries.len(),
                max: self.config.max_cache_batch,
            });
        }
        Ok(queries
            .iter()
            .map(|q| {
                let key = cache_key(q.dst_chain_id, &q.to, &q.slot);
                self.cache
                    .lookup(&key, q.height)
                    .map(<[u8]>::to_vec)
                    .unwrap_or_default()
            })
            .collect())
    }

    fn query_status(&self, query_id: &QueryId) -> Result<QueryStatus, GatewayError> {
        self.get_query(query_id).map(|query| query.status)
    }

    fn get_query(&self, query_id: &QueryId) -> Result<&Query, GatewayError> {
        self.state
            .queries
            .get(query_id)
            .ok_or(GatewayError::InvalidQueryId(*query_id))
    }

    fn add_relayers(&mut self, caller: Address, relayers: &[Address]) -> Result<(), GatewayError> {
        self.require_owner(caller)?;
        for relayer in self.relayers.add(relayers)? {
            info!(relayer = ?relayer, "[xq-03] Relayer added");
            self.publisher.publish(GatewayEvent::RelayerAdded { relayer });
        }
        Ok(())
    }

    fn remove_relayers(
        &mut self,
        caller: Address,
        relayers: &[Address],
    ) -> Result<(), GatewayError> {
        self.require_owner(caller)?;
        for relayer in self.relayers.remove(relayers) {
            info!(relayer = ?relayer, "[xq-03] Relayer removed");
            self.publisher.publish(GatewayEvent::RelayerRemoved { relayer });
        }
        Ok(())
    }
}
