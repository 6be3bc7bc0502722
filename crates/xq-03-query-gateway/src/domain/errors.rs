//! # Domain Errors
//!
//! Error types for the query gateway.

use rlp::DecoderError;
use shared_types::{Address, AllowListError, ErrorKind, QueryId, QueryStatus, U256};
use thiserror::Error;
use xq_02_light_client::LightClientError;

/// Query gateway errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// No subqueries were given.
    #[error("Query contains no subqueries")]
    EmptyQuery,

    /// The batch exceeds its cap.
    #[error("Too many subqueries: {count} > {max}")]
    TooManyQueries {
        /// Subqueries given
        count: usize,
        /// Cap
        max: usize,
    },

    /// A subquery has a zero chain id, height or slot.
    #[error("Subquery {index} has a zero {field}")]
    InvalidSubQuery {
        /// Position in the batch
        index: usize,
        /// Offending field
        field: &'static str,
    },

    /// A zero principal was given where a real one is required.
    #[error("Zero address given for {0}")]
    ZeroAddress(&'static str),

    /// The light client is not registered with the gateway.
    #[error("Unknown light client: {0:?}")]
    UnknownLightClient(Address),

    /// The callback does not implement a query receiver.
    #[error("Callback {0:?} is not a query receiver")]
    UnknownReceiver(Address),

    /// The attached fee is below the estimate.
    #[error("Insufficient fee: required {required}, provided {provided}")]
    InsufficientFee {
        /// Estimated fee
        required: U256,
        /// Fee attached
        provided: U256,
    },

    /// Caller is not an allow-listed relayer.
    #[error("Caller {caller:?} is not a relayer")]
    NotRelayer {
        /// Caller
        caller: Address,
    },

    /// Caller is not the gateway owner.
    #[error("Caller {caller:?} is not the owner")]
    NotOwner {
        /// Caller
        caller: Address,
    },

    /// No query with this id.
    #[error("Invalid query id: {0:?}")]
    InvalidQueryId(QueryId),

    /// The query is not pending.
    #[error("Query {query_id:?} is {status:?}, expected Pending")]
    InvalidStatus {
        /// Query
        query_id: QueryId,
        /// Current status
        status: QueryStatus,
    },

    /// The proof yields a different number of values than the query asked for.
    #[error("Proof yields {actual} values, query has {expected} subqueries")]
    ValueCountMismatch {
        /// Subqueries in the query
        expected: usize,
        /// Values proven
        actual: usize,
    },

    /// The value at `index` was proven for a different subquery.
    #[error("Proven value {index} does not answer subquery {index}")]
    MisalignedProof {
        /// Position in the batch
        index: usize,
    },

    /// Light client rejected the call.
    #[error("Light client error: {0}")]
    LightClient(#[from] LightClientError),

    /// Relayer allow-list rejected the change.
    #[error("Relayer list: {0}")]
    Relayers(#[from] AllowListError),

    /// A stored request no longer decodes.
    #[error("Stored request is corrupt: {0}")]
    CorruptRequest(DecoderError),
}

impl GatewayError {
    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyQuery
            | Self::TooManyQueries { .. }
            | Self::InvalidSubQuery { .. }
            | Self::ZeroAddress(_)
            | Self::InsufficientFee { .. }
            | Self::Relayers(_) => ErrorKind::Validation,
            Self::UnknownLightClient(_)
            | Self::UnknownReceiver(_)
            | Self::NotRelayer { .. }
            | Self::NotOwner { .. } => ErrorKind::Authorization,
            Self::InvalidQueryId(_) | Self::InvalidStatus { .. } => ErrorKind::State,
            Self::ValueCountMismatch { .. } | Self::MisalignedProof { .. } => ErrorKind::Proof,
            Self::LightClient(inner) => inner.kind(),
            Self::CorruptRequest(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::H256;

    #[test]
    fn test_kinds() {
        assert_eq!(GatewayError::EmptyQuery.kind(), ErrorKind::Validation);
        assert_eq!(
            GatewayError::NotRelayer { caller: Address::zero() }.kind(),
            ErrorKind::Authorization
        );
        assert_eq!(
            GatewayError::InvalidStatus {
                query_id: H256::zero(),
                status: QueryStatus::Done
            }
            .kind(),
            ErrorKind::State
        );
        assert!(GatewayError::MisalignedProof { index: 0 }.kind().is_retryable());
    }

    #[test]
    fn test_light_client_kind_passes_through() {
        let err: GatewayError = LightClientError::NotWhitelisted {
            origin: Address::repeat_byte(1),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Authorization);

        let err: GatewayError = LightClientError::DifferentTrieRoots {
            approved: H256::zero(),
            actual: H256::repeat_byte(1),
        }
        .into();
        assert!(err.kind().is_retryable());
    }
}
