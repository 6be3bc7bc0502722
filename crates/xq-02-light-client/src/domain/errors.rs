//! # Domain Errors
//!
//! Error types for the light-client adapters.

use shared_types::{Address, AllowListError, ChainId, ErrorKind, Hash, H256, U256};
use thiserror::Error;
use xq_01_proof_verifier::ProofError;

/// Light client error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LightClientError {
    /// Caller is not the owner of this light client.
    #[error("Not authorized: {caller:?} is not the owner")]
    NotOwner {
        /// Rejected caller
        caller: Address,
    },

    /// Caller is not the designated oracle principal.
    #[error("Only the oracle may deliver headers: {caller:?}")]
    NotOracle {
        /// Rejected caller
        caller: Address,
    },

    /// Caller is not the gateway this light client is bound to.
    #[error("Only the gateway may verify proofs: {caller:?}")]
    NotGateway {
        /// Rejected caller
        caller: Address,
    },

    /// Query origin is not whitelisted.
    #[error("Source not whitelisted: {origin:?}")]
    NotWhitelisted {
        /// Rejected origin
        origin: Address,
    },

    /// Fulfilment for a request this light client never sent (or already fulfilled).
    #[error("Source must be the oracle of the request: unknown request {0:?}")]
    UnknownRequest(H256),

    /// No subqueries.
    #[error("Empty query batch")]
    EmptyQuery,

    /// Too many subqueries for one oracle request.
    #[error("Too many queries: {count} > {max}")]
    TooManyQueries {
        /// Submitted count
        count: usize,
        /// Allowed maximum
        max: usize,
    },

    /// Header delivery without responses.
    #[error("Empty oracle response")]
    EmptyResponse,

    /// Oracle payload could not be parsed.
    #[error("Malformed oracle response: {0}")]
    MalformedResponse(String),

    /// Prepaid oracle budget cannot cover another request.
    #[error("Insufficient oracle budget: required {required}, available {available}")]
    InsufficientOracleBudget {
        /// Fee of one request
        required: U256,
        /// Remaining budget
        available: U256,
    },

    /// No approved state root for the (chain, height) of a proof group.
    #[error("No approved state root for chain {chain_id} at height {height}")]
    StateRootNotApproved {
        /// Destination chain
        chain_id: ChainId,
        /// Block height
        height: U256,
    },

    /// Account proof hangs from a different root than the approved one.
    #[error("Different trie roots: approved {approved:?}, proof {actual:?}")]
    DifferentTrieRoots {
        /// Approved state root
        approved: Hash,
        /// Root claimed by the proof
        actual: Hash,
    },

    /// Storage proof hangs from a different root than the account's storage root.
    #[error("Storage root mismatch: account {expected:?}, proof {actual:?}")]
    StorageRootMismatch {
        /// Proven storage root
        expected: Hash,
        /// Root claimed by the proof
        actual: Hash,
    },

    /// Merkle Patricia verification failed.
    #[error("Proof verification failed: {0}")]
    Proof(#[from] ProofError),

    /// Proof bytes are not a valid proof envelope.
    #[error("Malformed proof: {0}")]
    MalformedProof(#[from] rlp::DecoderError),

    /// Whitelist update rejected.
    #[error("Whitelist update rejected: {0}")]
    Whitelist(#[from] AllowListError),

    /// The oracle backend refused the request.
    #[error("Oracle backend error: {0}")]
    Oracle(String),
}

impl LightClientError {
    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotOwner { .. }
            | Self::NotOracle { .. }
            | Self::NotGateway { .. }
            | Self::NotWhitelisted { .. }
            | Self::UnknownRequest(_) => ErrorKind::Authorization,
            Self::EmptyQuery
            | Self::TooManyQueries { .. }
            | Self::EmptyResponse
            | Self::MalformedResponse(_)
            | Self::Whitelist(_) => ErrorKind::Validation,
            Self::InsufficientOracleBudget { .. } => ErrorKind::State,
            Self::StateRootNotApproved { .. }
            | Self::DifferentTrieRoots { .. }
            | Self::StorageRootMismatch { .. }
            | Self::Proof(_)
            | Self::MalformedProof(_) => ErrorKind::Proof,
            Self::Oracle(_) => ErrorKind::Internal,
        }
    }
}
