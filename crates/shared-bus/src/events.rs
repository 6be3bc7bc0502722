//! # Gateway Events
//!
//! Notifications emitted by the query gateway and the light-client adapters.
//! These are the observable surface of the protocol: a relayer watches
//! `QuerySent` and `OracleNotified` to know what to fetch, and requesters
//! watch `QueryCompleted` / `ReceiverFailed` for outcomes.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, OracleResponse, QueryId, H256, U256};

/// Component id of the light-client adapters.
pub const LIGHT_CLIENT_COMPONENT: u8 = 2;

/// Component id of the query gateway.
pub const GATEWAY_COMPONENT: u8 = 3;

/// Every notification on the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatewayEvent {
    // =========================================================================
    // QUERY LIFECYCLE (gateway)
    // =========================================================================
    /// A query was accepted and is pending.
    QuerySent {
        /// Principal that submitted the query.
        submitter: Address,
        /// Assigned query id.
        query_id: QueryId,
        /// Full encoded request (pre-image of the id without the nonce).
        encoded_request: Vec<u8>,
        /// Opaque requester payload.
        message: Vec<u8>,
        /// Light client responsible for the query.
        light_client: Address,
        /// Receiver of the results.
        callback: Address,
    },

    /// One verified value was written to the result cache.
    QueryDataSaved {
        /// Cache key `keccak256(chain ++ address ++ slot)`.
        key: Hash,
        /// Height the value was proven at.
        height: U256,
        /// The value.
        value: Vec<u8>,
    },

    /// A query completed and its receiver accepted the results.
    QueryCompleted {
        /// Completed query.
        query_id: QueryId,
        /// Opaque requester payload.
        message: Vec<u8>,
        /// Light client that verified the proof.
        light_client: Address,
        /// Receiver that was invoked.
        callback: Address,
        /// Values in subquery order.
        values: Vec<Vec<u8>>,
    },

    /// A query completed but its receiver failed.
    ReceiverFailed {
        /// Completed query.
        query_id: QueryId,
        /// Failure description.
        reason: String,
    },

    // =========================================================================
    // HEADERS (light clients)
    // =========================================================================
    /// A light client asked its oracle for state roots.
    OracleNotified {
        /// Light client that sent the request.
        light_client: Address,
        /// Oracle-side request id.
        request_id: H256,
        /// Oracle principal.
        oracle: Address,
        /// RLP list of distinct (chain, height) pairs.
        encoded_requests: Vec<u8>,
    },

    /// A light client approved a state root.
    HeaderUpdated {
        /// Light client that stored the root.
        light_client: Address,
        /// The approved root.
        response: OracleResponse,
    },

    // =========================================================================
    // ADMINISTRATION
    // =========================================================================
    /// A relayer was allow-listed.
    RelayerAdded {
        /// New relayer.
        relayer: Address,
    },

    /// A relayer was removed.
    RelayerRemoved {
        /// Removed relayer.
        relayer: Address,
    },

    /// A source principal may now call `request_query` on a light client.
    WhitelistAdded {
        /// Light client.
        light_client: Address,
        /// Added principal.
        address: Address,
    },

    /// A source principal was removed from a light-client whitelist.
    WhitelistRemoved {
        /// Light client.
        light_client: Address,
        /// Removed principal.
        address: Address,
    },

    /// A light client's oracle principal changed.
    OracleChanged {
        /// Light client.
        light_client: Address,
        /// New oracle principal.
        oracle: Address,
    },
}

impl GatewayEvent {
    /// Topic of this event.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::QuerySent { .. }
            | Self::QueryDataSaved { .. }
            | Self::QueryCompleted { .. }
            | Self::ReceiverFailed { .. } => EventTopic::Query,
            Self::OracleNotified { .. } | Self::HeaderUpdated { .. } => EventTopic::LightClient,
            Self::RelayerAdded { .. }
            | Self::RelayerRemoved { .. }
            | Self::WhitelistAdded { .. }
            | Self::WhitelistRemoved { .. }
            | Self::OracleChanged { .. } => EventTopic::Admin,
        }
    }

    /// Component that emitted this event.
    #[must_use]
    pub fn source_component(&self) -> u8 {
        match self {
            Self::OracleNotified { .. }
            | Self::HeaderUpdated { .. }
            | Self::WhitelistAdded { .. }
            | Self::WhitelistRemoved { .. }
            | Self::OracleChanged { .. } => LIGHT_CLIENT_COMPONENT,
            _ => GATEWAY_COMPONENT,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Query lifecycle events.
    Query,
    /// Oracle requests and approved headers.
    LightClient,
    /// Allow-list and oracle administration.
    Admin,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Source components to include. Empty means all sources.
    pub source_components: Vec<u8>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            source_components: Vec::new(),
        }
    }

    /// Create a filter for events from specific components.
    #[must_use]
    pub fn from_components(components: Vec<u8>) -> Self {
        Self {
            topics: Vec::new(),
            source_components: components,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &GatewayEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let source_match = self.source_components.is_empty()
            || self.source_components.contains(&event.source_component());

        topic_match && source_match
    }
}
