//! # Inbound Ports
//!
//! The gateway API requesters, relayers and the owner call.

use crate::domain::{DeliveryReport, GatewayError, Query, QuerySubmission};
use shared_types::{Address, QueryId, QueryStatus, SubQuery, U256};

/// Query gateway API - inbound port.
///
/// Every call runs to completion before the next one starts.
pub trait QueryGatewayApi {
    /// Accept a query and forward it to its light client.
    fn submit_query(&mut self, submission: QuerySubmission) -> Result<QueryId, GatewayError>;

    /// Verify a relayer's proof, cache the values and notify the receiver.
    fn deliver_proof(
        &mut self,
        caller: Address,
        query_id: QueryId,
        proof: &[u8],
    ) -> Result<DeliveryReport, GatewayError>;

    /// Light client fee plus the protocol fee.
    fn estimate_fee(
        &self,
        light_client: Address,
        queries: &[SubQuery],
    ) -> Result<U256, GatewayError>;

    /// Cached values, one per subquery, empty when missing.
    fn get_cache(&self, queries: &[SubQuery]) -> Result<Vec<Vec<u8>>, GatewayError>;

    /// Lifecycle state of a query.
    fn query_status(&self, query_id: &QueryId) -> Result<QueryStatus, GatewayError>;

    /// A submitted query.
    fn get_query(&self, query_id: &QueryId) -> Result<&Query, GatewayError>;

    /// Admit relayers. Owner only.
    fn add_relayers(&mut self, caller: Address, relayers: &[Address]) -> Result<(), GatewayError>;

    /// Revoke relayers. Owner only.
    fn remove_relayers(&mut self, caller: Address, relayers: &[Address])
        -> Result<(), GatewayError>;
}
