//! # Service Container
//!
//! Holds every service instance and wires them together.
//!
//! ## Initialization Order
//!
//! ```text
//! 1. Event bus
//! 2. Oracle networks, gas price feed
//! 3. Light clients (push-compute, node-operator)
//! 4. Query ledger: register light clients, receiver, relayers
//! ```
//!
//! Services that mutate state sit behind `parking_lot::RwLock`; each call
//! takes the lock for its whole duration, which gives the single global
//! order the ledger relies on.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use shared_bus::InMemoryEventBus;
use xq_02_light_client::{
    InMemoryOracleNetwork, LightClientRoles, ManualGasPriceFeed, NodeOperatorLightClient,
    PushComputeLightClient,
};
use xq_03_query_gateway::{GatewayError, InMemoryReceiver, QueryGatewayApi, QueryLedger};

use crate::container::config::NodeConfig;

/// Central container holding all service instances.
pub struct ServiceContainer {
    /// Configuration the services were built from.
    pub config: NodeConfig,
    /// Notification bus.
    pub bus: Arc<InMemoryEventBus>,
    /// Query ledger.
    pub ledger: Arc<RwLock<QueryLedger>>,
    /// Push-compute light client.
    pub push_compute: Arc<RwLock<PushComputeLightClient>>,
    /// Node-operator light client.
    pub node_operator: Arc<RwLock<NodeOperatorLightClient>>,
    /// Oracle queue of the push-compute job.
    pub compute_oracle: Arc<InMemoryOracleNetwork>,
    /// Oracle queue of the node-operator network.
    pub operator_oracle: Arc<InMemoryOracleNetwork>,
    /// Gas price feed of the node-operator light client.
    pub gas_feed: Arc<ManualGasPriceFeed>,
    /// Default receiver.
    pub receiver: Arc<InMemoryReceiver>,
}

impl ServiceContainer {
    /// Build and wire all services.
    pub fn new(config: NodeConfig) -> Result<Self, GatewayError> {
        let bus = Arc::new(InMemoryEventBus::with_capacity(
            config.runtime.event_bus_capacity,
        ));
        let compute_oracle = Arc::new(InMemoryOracleNetwork::new("push-compute"));
        let operator_oracle = Arc::new(InMemoryOracleNetwork::new("node-operator"));
        let gas_feed = Arc::new(ManualGasPriceFeed::new(config.runtime.gas_price));

        let gateway = config.gateway.gateway_address;
        let owner = config.gateway.owner;
        let principals = &config.principals;

        let push_compute = Arc::new(RwLock::new(PushComputeLightClient::new(
            config.push_compute.clone(),
            LightClientRoles {
                address: principals.push_compute,
                gateway,
                owner,
                oracle: principals.push_compute_oracle,
            },
            compute_oracle.clone(),
            bus.clone(),
        )));
        let node_operator = Arc::new(RwLock::new(NodeOperatorLightClient::new(
            config.node_operator.clone(),
            LightClientRoles {
                address: principals.node_operator,
                gateway,
                owner,
                oracle: principals.node_operator_oracle,
            },
            operator_oracle.clone(),
            gas_feed.clone(),
            bus.clone(),
        )));

        let receiver = Arc::new(InMemoryReceiver::new());
        let mut ledger = QueryLedger::new(config.gateway.clone(), bus.clone());
        ledger.register_light_client(push_compute.clone());
        ledger.register_light_client(node_operator.clone());
        ledger.register_receiver(principals.receiver, receiver.clone());
        if !config.relayers.is_empty() {
            ledger.add_relayers(owner, &config.relayers)?;
        }

        info!(
            gateway = ?gateway,
            relayers = config.relayers.len(),
            "Services wired"
        );

        Ok(Self {
            config,
            bus,
            ledger: Arc::new(RwLock::new(ledger)),
            push_compute,
            node_operator,
            compute_oracle,
            operator_oracle,
            gas_feed,
            receiver,
        })
    }
}
