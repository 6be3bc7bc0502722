//! # xq-02-light-client
//!
//! Light-client adapters: the trust anchor of the query gateway.
//!
//! A light client asks an oracle backend for the state roots of the
//! (chain, height) pairs a query needs, records the roots the oracle
//! approves, and verifies delivered proofs against them.
//!
//! ## Backends
//!
//! | Backend | Oracle | Fee | Batch cap | Admission |
//! |---------|--------|-----|-----------|-----------|
//! | Push-compute | one trusted compute job | zero | 100 | anyone |
//! | Node-operator | request/response network | gas + oracle fee | 10 | whitelist |
//!
//! ## Trust Flow
//!
//! ```text
//! gateway ──request_query──→ light client ──send_request──→ oracle
//!                                 ↑                             │
//!                                 └──update_header / fulfill────┘
//! gateway ──verify(proof)──→ light client ──→ xq-01 (per group, per slot)
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! xq-02-light-client/
//! ├── domain/          # Approved roots, pending requests, proof layout, errors
//! ├── algorithms/      # Proof checking, fee formula, compute payload parsing
//! ├── ports/           # LightClient (inbound) + OracleBackend, GasPriceFeed
//! ├── adapters/        # In-memory oracle network, manual gas price feed
//! ├── application/     # PushComputeLightClient, NodeOperatorLightClient
//! └── config.rs        # Per-backend configuration
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{InMemoryOracleNetwork, ManualGasPriceFeed, OracleJob};
pub use algorithms::{
    assemble_proof_group, encode_compute_response, node_operator_fee, parse_compute_response,
    verify_query_proof,
};
pub use application::{LightClientRoles, NodeOperatorLightClient, PushComputeLightClient};
pub use config::{NodeOperatorConfig, PushComputeConfig, NODE_OPERATOR_MAX_QUERIES};
pub use domain::{
    ApprovedStateRoots, LightClientError, PendingRequests, ProofGroup, QueryProof, VerifiedSlot,
};
pub use ports::{
    GasPriceFeed, LightClient, MockGasPrice, MockOracle, OracleBackend, SharedLightClient,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
