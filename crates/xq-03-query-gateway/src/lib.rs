//! # xq-03-query-gateway
//!
//! The query ledger: accepts batched storage-slot queries against remote
//! ledgers, hands them to a light client, and completes them when an
//! allow-listed relayer delivers a proof the light client verifies.
//!
//! ## Query Lifecycle
//!
//! ```text
//! requester ──submit_query──→ QueryLedger ──request_query──→ light client ──→ oracle
//!                                  │ QuerySent
//!                                  ↓
//! relayer ──deliver_proof──→ QueryLedger ──verify──→ light client
//!                                  │ QueryDataSaved × n
//!                                  ↓
//!                        CallbackDispatcher ──→ receiver
//!                                  │ QueryCompleted | ReceiverFailed
//! ```
//!
//! ## Guarantees
//!
//! | Property | Mechanism |
//! |----------|-----------|
//! | Unique ids | `keccak256(encoded_request ++ nonce)`, nonce bumped per accepted query |
//! | At-most-once completion | Pending → Done is the only transition |
//! | Retryable proofs | a rejected proof changes nothing |
//! | Isolated receivers | errors and panics are captured after commit |
//!
//! ## Module Structure
//!
//! ```text
//! xq-03-query-gateway/
//! ├── domain/          # Query, LedgerState, ResultCache, RelayerGate, errors
//! ├── ports/           # QueryGatewayApi (inbound) + QueryReceiver (outbound)
//! ├── adapters/        # InMemoryReceiver
//! ├── application/     # QueryLedger, CallbackDispatcher
//! └── config.rs        # GatewayConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::InMemoryReceiver;
pub use application::{CallbackDispatcher, QueryLedger};
pub use config::{GatewayConfig, MAX_CACHE_BATCH, MAX_QUERY_BATCH, MAX_RELAYERS};
pub use domain::{
    CachedValue, CallbackOutcome, DeliveryReport, GatewayError, LedgerState, Query,
    QuerySubmission, RelayerGate, ResultCache,
};
pub use ports::{MockReceiver, QueryGatewayApi, QueryReceiver, ReceivedQuery, ReceiverError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
